//! Renderer
//!
//! Assembles derived records into an ordered, keyed structure. Field order
//! inside a record follows the view's declared schema and top-level order
//! follows the schema's key ordering, so identical input always serializes to
//! identical bytes.

use crate::error::ViewError;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::cmp::Ordering;

/// How top-level record keys are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrdering {
    /// Numeric keys ascending, then non-numeric keys lexicographically
    Numeric,
    /// Interface-style natural order: `Ethernet2` before `Ethernet10`
    Natural,
}

impl KeyOrdering {
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            KeyOrdering::Numeric => numeric_key(a).cmp(&numeric_key(b)),
            KeyOrdering::Natural => natural_key(a).cmp(&natural_key(b)),
        }
    }
}

/// All-digit keys compare by value without parsing: leading zeros dropped,
/// then shorter digit strings first, then digit by digit.
fn numeric_key(key: &str) -> (u8, usize, &str, &str) {
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        let digits = key.trim_start_matches('0');
        (0, digits.len(), digits, key)
    } else {
        (1, 0, "", key)
    }
}

fn natural_key(key: &str) -> (&str, Option<u64>, &str) {
    let stem = key.trim_end_matches(|c: char| c.is_ascii_digit());
    let number = key[stem.len()..].parse::<u64>().ok();
    (stem, number, key)
}

/// Fixed record layout of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Column heading of the record key in tabular output
    pub key_label: &'static str,
    pub fields: &'static [&'static str],
    pub ordering: KeyOrdering,
}

/// One rendered entity: its output key and field values in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRecord {
    pub key: String,
    pub values: Vec<String>,
}

impl RenderedRecord {
    pub fn new(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }
}

/// Ordered record set of one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    schema: RecordSchema,
    records: Vec<RenderedRecord>,
}

impl RenderedView {
    pub fn new(schema: RecordSchema, mut records: Vec<RenderedRecord>) -> Self {
        debug_assert!(records.iter().all(|r| r.values.len() == schema.fields.len()));
        records.sort_by(|a, b| schema.ordering.compare(&a.key, &b.key));
        Self { schema, records }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn records(&self) -> &[RenderedRecord] {
        &self.records
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    /// Value of `field` in the record keyed `key`.
    pub fn field(&self, key: &str, field: &str) -> Option<&str> {
        let index = self.schema.fields.iter().position(|f| *f == field)?;
        self.records
            .iter()
            .find(|r| r.key == key)
            .and_then(|r| r.values.get(index))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compact JSON: the wire payload handed to the transport.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ViewError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ViewError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

struct RecordFields<'a> {
    fields: &'static [&'static str],
    values: &'a [String],
}

impl Serialize for RecordFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in self.fields.iter().zip(self.values) {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

impl Serialize for RenderedView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(
                &record.key,
                &RecordFields {
                    fields: self.schema.fields,
                    values: &record.values,
                },
            )?;
        }
        map.end()
    }
}
