//! Interface naming: raw names or configured aliases.

use crate::access::get_field;
use crate::error::ViewError;
use crate::store::TableSnapshot;
use crate::types::{DbId, TableId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Configuration table holding per-port aliases.
pub const PORT_TABLE: &str = "PORT";

/// How interface names are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingMode {
    #[default]
    Default,
    Alias,
}

impl fmt::Display for NamingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingMode::Default => f.write_str("default"),
            NamingMode::Alias => f.write_str("alias"),
        }
    }
}

impl FromStr for NamingMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(NamingMode::Default),
            "alias" => Ok(NamingMode::Alias),
            _ => Err(ViewError::ConfigError(format!(
                "Invalid naming mode: {} (must be 'default' or 'alias')",
                s
            ))),
        }
    }
}

/// Maps a raw interface name to its display name.
pub trait AliasResolver: Send + Sync {
    fn display_name(&self, raw: &str) -> String;
}

/// Alias resolver backed by the `alias` field of `CONFIG_DB PORT`.
#[derive(Debug, Clone, Default)]
pub struct PortAliasResolver {
    aliases: HashMap<String, String>,
}

impl PortAliasResolver {
    pub fn table() -> TableId {
        TableId::new(DbId::ConfigDb, PORT_TABLE)
    }

    pub fn from_ports(ports: &TableSnapshot) -> Self {
        let aliases = ports
            .keys()
            .filter_map(|port| {
                let alias = get_field(ports, port, None, "alias", "");
                (!alias.is_empty()).then(|| (port.to_string(), alias.to_string()))
            })
            .collect();
        Self { aliases }
    }
}

impl AliasResolver for PortAliasResolver {
    fn display_name(&self, raw: &str) -> String {
        self.aliases
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }
}

/// Naming mode resolved for one query, with the resolver used in alias mode.
#[derive(Clone, Default)]
pub struct DisplayNames {
    mode: NamingMode,
    resolver: Option<Arc<dyn AliasResolver>>,
}

impl DisplayNames {
    /// Raw interface names
    pub fn raw() -> Self {
        Self::default()
    }

    pub fn alias(resolver: Arc<dyn AliasResolver>) -> Self {
        Self {
            mode: NamingMode::Alias,
            resolver: Some(resolver),
        }
    }

    pub fn mode(&self) -> NamingMode {
        self.mode
    }

    pub fn display(&self, raw: &str) -> String {
        match (self.mode, &self.resolver) {
            (NamingMode::Alias, Some(resolver)) => resolver.display_name(raw),
            _ => raw.to_string(),
        }
    }
}

impl fmt::Debug for DisplayNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayNames")
            .field("mode", &self.mode)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}
