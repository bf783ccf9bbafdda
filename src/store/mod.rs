//! Table Store
//!
//! Point-in-time table snapshots and the fetch/write interfaces the view
//! engine consumes. Rows are addressed by their raw store key
//! (`TABLE|row` or `TABLE:row` depending on the database).

pub mod keys;
pub mod memory;
pub mod persistence;

pub use memory::MemoryTableStore;
pub use persistence::SledTableStore;

use crate::error::StoreError;
use crate::types::{DbId, FieldMap, TableId};
use std::collections::BTreeMap;

/// Immutable read of one table at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    id: TableId,
    rows: BTreeMap<String, FieldMap>,
}

impl TableSnapshot {
    /// Empty snapshot for a table with no rows
    pub fn empty(id: TableId) -> Self {
        Self {
            id,
            rows: BTreeMap::new(),
        }
    }

    pub fn from_rows(id: TableId, rows: BTreeMap<String, FieldMap>) -> Self {
        Self { id, rows }
    }

    pub fn id(&self) -> &TableId {
        &self.id
    }

    /// Composite row-key delimiter of the database this table lives in.
    pub fn separator(&self) -> char {
        self.id.db.separator()
    }

    pub fn row(&self, key: &str) -> Option<&FieldMap> {
        self.rows.get(key)
    }

    /// Row keys in iteration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &FieldMap)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Table Fetcher interface
///
/// Returns an empty snapshot when the table has no rows. An error means the
/// store itself could not be read.
pub trait TableFetcher: Send + Sync {
    fn fetch(&self, table: &TableId) -> Result<TableSnapshot, StoreError>;
}

/// Write interface used to seed local stores from datasets.
pub trait TableWriter {
    /// Merge `fields` into the row stored under the raw store key `key`.
    fn put_row(&self, db: DbId, key: &str, fields: FieldMap) -> Result<(), StoreError>;

    /// Remove every row of one database.
    fn flush_db(&self, db: DbId) -> Result<(), StoreError>;
}
