//! JSON datasets
//!
//! A dataset is a JSON object mapping raw store keys to field objects, as
//! dumped from one database:
//!
//! ```json
//! { "PORTCHANNEL|PortChannel101": { "admin_status": "up", "mtu": "9100" } }
//! ```
//!
//! Numbers and booleans are stored as their JSON text; arrays of scalars are
//! joined with `,`. Nested objects are rejected.

use crate::error::StoreError;
use crate::store::TableWriter;
use crate::types::{DbId, FieldMap};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: BTreeMap<String, FieldMap>,
}

impl Dataset {
    pub fn from_json_str(input: &str) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| StoreError::InvalidDataset(format!("Invalid JSON: {}", e)))?;
        let Value::Object(entries) = value else {
            return Err(StoreError::InvalidDataset(
                "Dataset must be a JSON object of rows".to_string(),
            ));
        };

        let mut rows = BTreeMap::new();
        for (key, row) in entries {
            let Value::Object(fields) = row else {
                return Err(StoreError::InvalidDataset(format!(
                    "Row {} must be an object of fields",
                    key
                )));
            };
            let mut parsed = FieldMap::new();
            for (field, value) in fields {
                let text = scalar_text(&value).ok_or_else(|| {
                    StoreError::InvalidDataset(format!(
                        "Field {} of row {} is not a scalar or list of scalars",
                        field, key
                    ))
                })?;
                parsed.insert(field, text);
            }
            rows.insert(key, parsed);
        }
        Ok(Self { rows })
    }

    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json_str(&input)
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

    /// Write every row into `db`, merging with existing rows. Returns the
    /// number of rows written.
    pub fn apply(&self, writer: &dyn TableWriter, db: DbId) -> Result<usize, StoreError> {
        for (key, fields) in &self.rows {
            writer.put_row(db, key, fields.clone())?;
        }
        info!(db = %db, rows = self.rows.len(), "Applied dataset");
        Ok(self.rows.len())
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Array(_) | Value::Object(_) => None,
                other => scalar_text(other),
            })
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(",")),
        Value::Object(_) => None,
    }
}
