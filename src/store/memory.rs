//! In-process table store.

use crate::error::StoreError;
use crate::store::keys::{row_key, store_key};
use crate::store::{TableFetcher, TableSnapshot, TableWriter};
use crate::types::{DbId, FieldMap, TableId};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// Table store held in memory, keyed by raw store key per database.
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    dbs: RwLock<HashMap<DbId, BTreeMap<String, FieldMap>>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for building fixtures: merge `fields` into `table[row]`.
    pub fn insert<'a, I>(&self, table: &TableId, row: &str, fields: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let key = store_key(table, row);
        let mut dbs = self.dbs.write();
        let entry = dbs.entry(table.db).or_default().entry(key).or_default();
        for (field, value) in fields {
            entry.insert(field.to_string(), value.to_string());
        }
    }
}

impl TableFetcher for MemoryTableStore {
    fn fetch(&self, table: &TableId) -> Result<TableSnapshot, StoreError> {
        let dbs = self.dbs.read();
        let rows = dbs
            .get(&table.db)
            .map(|keys| {
                keys.iter()
                    .filter_map(|(raw, fields)| {
                        row_key(table, raw).map(|row| (row.to_string(), fields.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(TableSnapshot::from_rows(table.clone(), rows))
    }
}

impl TableWriter for MemoryTableStore {
    fn put_row(&self, db: DbId, key: &str, fields: FieldMap) -> Result<(), StoreError> {
        self.dbs
            .write()
            .entry(db)
            .or_default()
            .entry(key.to_string())
            .or_default()
            .extend(fields);
        Ok(())
    }

    fn flush_db(&self, db: DbId) -> Result<(), StoreError> {
        self.dbs.write().remove(&db);
        Ok(())
    }
}
