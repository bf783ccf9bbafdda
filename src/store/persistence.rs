//! Persistence layer for the table store

use crate::error::StoreError;
use crate::store::keys::{row_key, table_prefix};
use crate::store::{TableFetcher, TableSnapshot, TableWriter};
use crate::types::{DbId, FieldMap, TableId};
use bincode;
use sled;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Sled-based table store: one tree per database, bincode-encoded field maps
/// under the raw store key.
pub struct SledTableStore {
    db: sled::Db,
}

impl SledTableStore {
    /// Open (or create) a store at the given directory
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)
            .map_err(|e| StoreError::Unavailable(format!("Failed to open sled database: {}", e)))?;
        Ok(Self { db })
    }

    pub fn from_db(db: sled::Db) -> Self {
        Self { db }
    }

    fn tree(&self, db: DbId) -> Result<sled::Tree, StoreError> {
        self.db.open_tree(db.as_str()).map_err(|e| {
            StoreError::Unavailable(format!("Failed to open tree {}: {}", db, e))
        })
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::Unavailable(format!("Failed to flush database: {}", e)))?;
        Ok(())
    }
}

impl TableFetcher for SledTableStore {
    fn fetch(&self, table: &TableId) -> Result<TableSnapshot, StoreError> {
        let tree = self.tree(table.db)?;
        let prefix = table_prefix(table);
        let mut rows = BTreeMap::new();

        for item in tree.scan_prefix(prefix.as_bytes()) {
            let (key, value) = item.map_err(|e| StoreError::FetchFailed {
                table: table.clone(),
                reason: e.to_string(),
            })?;
            let raw = String::from_utf8_lossy(&key);
            let Some(row) = row_key(table, &raw) else {
                continue;
            };
            let fields: FieldMap =
                bincode::deserialize(&value).map_err(|e| StoreError::FetchFailed {
                    table: table.clone(),
                    reason: format!("Failed to deserialize row {}: {}", raw, e),
                })?;
            rows.insert(row.to_string(), fields);
        }

        debug!(table = %table, rows = rows.len(), "Fetched table snapshot");
        Ok(TableSnapshot::from_rows(table.clone(), rows))
    }
}

impl TableWriter for SledTableStore {
    fn put_row(&self, db: DbId, key: &str, fields: FieldMap) -> Result<(), StoreError> {
        let tree = self.tree(db)?;
        let mut merged: FieldMap = match tree
            .get(key.as_bytes())
            .map_err(|e| StoreError::Unavailable(format!("Failed to read row {}: {}", key, e)))?
        {
            Some(existing) => bincode::deserialize(&existing).map_err(|e| {
                StoreError::InvalidDataset(format!("Failed to deserialize row {}: {}", key, e))
            })?,
            None => FieldMap::new(),
        };
        merged.extend(fields);

        let value = bincode::serialize(&merged).map_err(|e| {
            StoreError::InvalidDataset(format!("Failed to serialize row {}: {}", key, e))
        })?;
        tree.insert(key.as_bytes(), value)
            .map_err(|e| StoreError::Unavailable(format!("Failed to put row {}: {}", key, e)))?;
        Ok(())
    }

    fn flush_db(&self, db: DbId) -> Result<(), StoreError> {
        self.tree(db)?
            .clear()
            .map_err(|e| StoreError::Unavailable(format!("Failed to clear {}: {}", db, e)))
    }
}
