//! Query entrypoint
//!
//! Resolves a query path to a registered view, fetches every table the view
//! needs, then derives and serializes the view. Fetching is fail-fast: the
//! first store error aborts the query and no partial view is produced.

use crate::error::ViewError;
use crate::store::TableFetcher;
use crate::types::TableId;
use crate::views::{
    AliasResolver, DisplayNames, NamingMode, NeighborExpectedView, PortAliasResolver,
    PortChannelView, RenderedView, TableSet, View,
};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Split a `/`-separated query path into elements, ignoring empty segments.
pub fn parse_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|e| !e.is_empty()).collect()
}

/// Path -> view producer table.
pub struct ViewRegistry {
    views: Vec<Arc<dyn View>>,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(PortChannelView));
        registry.register(Arc::new(NeighborExpectedView));
        registry
    }
}

impl ViewRegistry {
    pub fn empty() -> Self {
        Self { views: Vec::new() }
    }

    /// Register a view. A later registration for the same path wins.
    pub fn register(&mut self, view: Arc<dyn View>) {
        self.views.retain(|v| v.path() != view.path());
        self.views.push(view);
    }

    pub fn resolve(&self, path: &[&str]) -> Option<Arc<dyn View>> {
        self.views.iter().find(|v| v.path() == path).cloned()
    }

    /// Registered paths, `/`-joined and sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.views.iter().map(|v| v.path().join("/")).collect();
        paths.sort();
        paths
    }
}

/// Serves view queries against a table fetcher.
pub struct ShowService {
    fetcher: Arc<dyn TableFetcher>,
    registry: ViewRegistry,
    naming_mode: RwLock<NamingMode>,
    alias_resolver: Option<Arc<dyn AliasResolver>>,
}

impl ShowService {
    pub fn new(fetcher: Arc<dyn TableFetcher>) -> Self {
        Self {
            fetcher,
            registry: ViewRegistry::default(),
            naming_mode: RwLock::new(NamingMode::Default),
            alias_resolver: None,
        }
    }

    pub fn with_registry(mut self, registry: ViewRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_naming_mode(self, mode: NamingMode) -> Self {
        *self.naming_mode.write() = mode;
        self
    }

    /// Use `resolver` in alias mode instead of reading `CONFIG_DB PORT`.
    pub fn with_alias_resolver(mut self, resolver: Arc<dyn AliasResolver>) -> Self {
        self.alias_resolver = Some(resolver);
        self
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn naming_mode(&self) -> NamingMode {
        *self.naming_mode.read()
    }

    /// Change the naming mode for subsequent queries. Queries in flight keep
    /// the mode they started with.
    pub fn set_naming_mode(&self, mode: NamingMode) {
        *self.naming_mode.write() = mode;
    }

    /// Answer a `/`-separated query path with the serialized view.
    pub fn query_path(&self, path: &str) -> Result<Vec<u8>, ViewError> {
        self.query(&parse_path(path))
    }

    /// Answer a query with the serialized view.
    pub fn query(&self, path: &[&str]) -> Result<Vec<u8>, ViewError> {
        self.compute(path)?.to_json_bytes()
    }

    /// Fetch, derive and render without serializing.
    pub fn compute(&self, path: &[&str]) -> Result<RenderedView, ViewError> {
        let view = self
            .registry
            .resolve(path)
            .ok_or_else(|| ViewError::UnknownView(path.join("/")))?;

        let mode = self.naming_mode();
        let read_ports = mode == NamingMode::Alias && self.alias_resolver.is_none();

        let mut scope = view.scope();
        if read_ports {
            scope.push(PortAliasResolver::table());
        }
        let mut tables = self.fetch_all(&scope)?;

        let names = match mode {
            NamingMode::Default => DisplayNames::raw(),
            NamingMode::Alias => match &self.alias_resolver {
                Some(resolver) => DisplayNames::alias(Arc::clone(resolver)),
                None => {
                    let ports = tables.take(&PortAliasResolver::table());
                    DisplayNames::alias(Arc::new(PortAliasResolver::from_ports(&ports)))
                }
            },
        };

        let rendered = view.render(tables, &names);
        info!(
            view = %path.join("/"),
            naming_mode = %mode,
            records = rendered.len(),
            "Rendered view"
        );
        Ok(rendered)
    }

    fn fetch_all(&self, scope: &[TableId]) -> Result<TableSet, ViewError> {
        let unique: BTreeSet<&TableId> = scope.iter().collect();
        let mut tables = TableSet::new();
        for table in unique {
            let snapshot = self.fetcher.fetch(table).map_err(|e| {
                warn!(table = %table, error = %e, "Table fetch failed, aborting query");
                e
            })?;
            debug!(table = %table, rows = snapshot.len(), "Fetched table");
            tables.insert(snapshot);
        }
        Ok(tables)
    }
}
