//! Derived Views
//!
//! A view turns a set of table snapshots into one ordered, human-facing record
//! per entity. Every view declares the tables it reads up front; the query
//! service fetches them all before any derivation starts, so a view never
//! touches the store itself.

pub mod enumerate;
pub mod naming;
pub mod neighbor;
pub mod portchannel;
pub mod render;

pub use enumerate::enumerate_entities;
pub use naming::{AliasResolver, DisplayNames, NamingMode, PortAliasResolver};
pub use neighbor::NeighborExpectedView;
pub use portchannel::PortChannelView;
pub use render::{KeyOrdering, RecordSchema, RenderedRecord, RenderedView};

use crate::store::TableSnapshot;
use crate::types::TableId;
use std::collections::HashMap;

/// Snapshots fetched for a single query.
#[derive(Debug, Default)]
pub struct TableSet {
    tables: HashMap<TableId, TableSnapshot>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, snapshot: TableSnapshot) {
        self.tables.insert(snapshot.id().clone(), snapshot);
    }

    pub fn get(&self, id: &TableId) -> Option<&TableSnapshot> {
        self.tables.get(id)
    }

    /// Remove a snapshot from the set. A table that was never fetched reads
    /// as empty.
    pub fn take(&mut self, id: &TableId) -> TableSnapshot {
        self.tables
            .remove(id)
            .unwrap_or_else(|| TableSnapshot::empty(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<TableSnapshot> for TableSet {
    fn from_iter<T: IntoIterator<Item = TableSnapshot>>(iter: T) -> Self {
        let mut set = TableSet::new();
        for snapshot in iter {
            set.insert(snapshot);
        }
        set
    }
}

/// A named view producer.
pub trait View: Send + Sync {
    /// Query path this view answers, e.g. `["interface", "portchannel"]`.
    fn path(&self) -> &'static [&'static str];

    /// Tables the view reads.
    fn scope(&self) -> Vec<TableId>;

    /// Derive and render the view. Infallible: absent data degrades to
    /// defaults.
    fn render(&self, tables: TableSet, names: &DisplayNames) -> RenderedView;
}
