//! Expected-neighbor view: `show interfaces neighbor expected`
//!
//! Joins the configured neighbor of each local port with that neighbor's
//! device metadata. Everything here comes from `CONFIG_DB`.

use crate::access::get_field;
use crate::store::TableSnapshot;
use crate::types::{DbId, TableId};
use crate::views::enumerate::enumerate_entities;
use crate::views::naming::DisplayNames;
use crate::views::render::{KeyOrdering, RecordSchema, RenderedRecord, RenderedView};
use crate::views::{TableSet, View};
use std::collections::{HashMap, HashSet};

/// Rendered in place of any absent field.
pub const NONE: &str = "None";

pub const NEIGHBOR_SCHEMA: RecordSchema = RecordSchema {
    key_label: "LocalPort",
    fields: &[
        "neighbor",
        "neighbor_port",
        "neighbor_loopback",
        "neighbor_mgmt",
        "neighbor_type",
    ],
    ordering: KeyOrdering::Natural,
};

pub fn neighbor_table() -> TableId {
    TableId::new(DbId::ConfigDb, "DEVICE_NEIGHBOR")
}

pub fn metadata_table() -> TableId {
    TableId::new(DbId::ConfigDb, "DEVICE_NEIGHBOR_METADATA")
}

/// Expected neighbor of one local port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedNeighbor {
    pub local_port: String,
    pub neighbor: String,
    pub neighbor_port: String,
    pub loopback: String,
    pub mgmt: String,
    pub device_type: String,
}

impl ExpectedNeighbor {
    pub fn to_record(&self, key: impl Into<String>) -> RenderedRecord {
        RenderedRecord::new(
            key,
            vec![
                self.neighbor.clone(),
                self.neighbor_port.clone(),
                self.loopback.clone(),
                self.mgmt.clone(),
                self.device_type.clone(),
            ],
        )
    }
}

#[derive(Debug)]
pub struct NeighborContext {
    neighbors: TableSnapshot,
    metadata: TableSnapshot,
    names: DisplayNames,
}

impl NeighborContext {
    pub fn new(mut tables: TableSet, names: DisplayNames) -> Self {
        Self {
            neighbors: tables.take(&neighbor_table()),
            metadata: tables.take(&metadata_table()),
            names,
        }
    }

    pub fn derive(&self, port: &str) -> ExpectedNeighbor {
        let neighbor = get_field(&self.neighbors, port, None, "name", "");
        // Metadata is keyed by neighbor name; without one there is nothing to join.
        let meta = |field: &str| -> String {
            if neighbor.is_empty() {
                NONE.to_string()
            } else {
                get_field(&self.metadata, neighbor, None, field, NONE).to_string()
            }
        };
        ExpectedNeighbor {
            local_port: port.to_string(),
            neighbor: (if neighbor.is_empty() { NONE } else { neighbor }).to_string(),
            neighbor_port: get_field(&self.neighbors, port, None, "port", NONE).to_string(),
            loopback: meta("lo_addr"),
            mgmt: meta("mgmt_addr"),
            device_type: meta("type"),
        }
    }

    /// Output key per local port. A display name shared by several ports
    /// falls back to the raw names of those ports; if that still leaves a
    /// duplicate, every port is keyed by its raw name.
    pub fn record_keys<'a>(&self, ports: &[&'a str]) -> Vec<(&'a str, String)> {
        let displayed: Vec<String> = ports.iter().map(|port| self.names.display(port)).collect();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for name in &displayed {
            *counts.entry(name.as_str()).or_default() += 1;
        }

        let keys: Vec<(&'a str, String)> = ports
            .iter()
            .zip(&displayed)
            .map(|(port, name)| {
                if counts[name.as_str()] > 1 {
                    (*port, port.to_string())
                } else {
                    (*port, name.clone())
                }
            })
            .collect();

        let unique: HashSet<&str> = keys.iter().map(|(_, key)| key.as_str()).collect();
        if unique.len() == keys.len() {
            keys
        } else {
            ports.iter().map(|port| (*port, port.to_string())).collect()
        }
    }

    pub fn render(&self) -> RenderedView {
        let ports = enumerate_entities(&self.neighbors, "");
        let records = self
            .record_keys(&ports)
            .into_iter()
            .map(|(port, key)| self.derive(port).to_record(key))
            .collect();
        RenderedView::new(NEIGHBOR_SCHEMA, records)
    }
}

/// `interface/neighbor/expected`
#[derive(Debug, Default)]
pub struct NeighborExpectedView;

impl View for NeighborExpectedView {
    fn path(&self) -> &'static [&'static str] {
        &["interface", "neighbor", "expected"]
    }

    fn scope(&self) -> Vec<TableId> {
        vec![neighbor_table(), metadata_table()]
    }

    fn render(&self, tables: TableSet, names: &DisplayNames) -> RenderedView {
        NeighborContext::new(tables, names.clone()).render()
    }
}
