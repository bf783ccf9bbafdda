//! Core identifiers shared by the store and view layers.

use crate::error::StoreError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Field name -> value for one table row. Store values are untyped strings.
pub type FieldMap = BTreeMap<String, String>;

/// Logical databases of the device state store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DbId {
    /// Configuration written by the config manager
    ConfigDb,
    /// Application-plane state consumed by the forwarding plane
    ApplDb,
    /// Control-plane state written by daemons
    StateDb,
}

impl DbId {
    pub const ALL: [DbId; 3] = [DbId::ConfigDb, DbId::ApplDb, DbId::StateDb];

    pub fn as_str(&self) -> &'static str {
        match self {
            DbId::ConfigDb => "CONFIG_DB",
            DbId::ApplDb => "APPL_DB",
            DbId::StateDb => "STATE_DB",
        }
    }

    /// Delimiter between the table name and the row key, and between the
    /// components of a composite row key.
    pub fn separator(&self) -> char {
        match self {
            DbId::ApplDb => ':',
            DbId::ConfigDb | DbId::StateDb => '|',
        }
    }
}

impl fmt::Display for DbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CONFIG_DB" | "CONFIG" => Ok(DbId::ConfigDb),
            "APPL_DB" | "APPL" => Ok(DbId::ApplDb),
            "STATE_DB" | "STATE" => Ok(DbId::StateDb),
            _ => Err(StoreError::UnknownDatabase(s.to_string())),
        }
    }
}

/// A table within one database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId {
    pub db: DbId,
    pub table: String,
}

impl TableId {
    pub fn new(db: DbId, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.db, self.table)
    }
}
