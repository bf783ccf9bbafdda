//! Shared test utilities for integration tests
//!
//! Fixture loading, fault-injecting fetchers and environment isolation for
//! tests that touch `NETVIEW_*` or XDG variables.

use netview::dataset::Dataset;
use netview::error::StoreError;
use netview::store::{MemoryTableStore, TableFetcher, TableSnapshot, TableWriter};
use netview::types::{DbId, TableId};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a fixture dataset into `db` of the given store.
pub fn load_fixture(store: &dyn TableWriter, db: DbId, name: &str) {
    let dataset = Dataset::from_file(&fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e));
    dataset.apply(store, db).unwrap();
}

/// The three-entity port-channel fixture set across all databases
pub fn portchannel_store() -> MemoryTableStore {
    let store = MemoryTableStore::new();
    load_fixture(&store, DbId::ConfigDb, "PORTCHANNEL_EXPECTED.json");
    load_fixture(&store, DbId::StateDb, "LAG_TABLE_STATE_EXPECTED.json");
    load_fixture(&store, DbId::ApplDb, "LAG_TABLE_APPL_EXPECTED.json");
    load_fixture(&store, DbId::StateDb, "LAG_MEMBER_TABLE_STATE_EXPECTED.json");
    load_fixture(&store, DbId::ApplDb, "LAG_MEMBER_TABLE_APPL_EXPECTED.json");
    store
}

pub const PORTCHANNEL_EXPECTED: &str = r#"{"101":{"Team Dev":"PortChannel101","Protocol":"LACP(A)(Up)","Ports":"Ethernet0(S)"},"102":{"Team Dev":"PortChannel102","Protocol":"LACP(A)(Dw)","Ports":"Ethernet0(D)"},"103":{"Team Dev":"PortChannel103","Protocol":"LACP(I)(Up)","Ports":"Ethernet0(S) Ethernet8(D)"}}"#;

/// Wraps a store and fails every fetch of one table.
pub struct FailingFetcher<F> {
    pub inner: F,
    pub fail_on: TableId,
}

impl<F: TableFetcher> TableFetcher for FailingFetcher<F> {
    fn fetch(&self, table: &TableId) -> Result<TableSnapshot, StoreError> {
        if *table == self.fail_on {
            return Err(StoreError::FetchFailed {
                table: table.clone(),
                reason: "injected failure".to_string(),
            });
        }
        self.inner.fetch(table)
    }
}

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: &[&str] = &[
    "XDG_CONFIG_HOME",
    "NETVIEW_PROFILE",
    "NETVIEW_STORE__PATH",
    "NETVIEW_DISPLAY__NAMING_MODE",
    "NETVIEW_LOGGING__LEVEL",
];

/// Isolated environment: XDG_CONFIG_HOME points into a temp dir and the
/// netview variables are cleared. Restored on drop.
pub struct IsolatedEnv {
    pub dir: TempDir,
    saved: Vec<(&'static str, Option<String>)>,
    _guard: MutexGuard<'static, ()>,
}

impl IsolatedEnv {
    pub fn new() -> Self {
        let guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let saved = ISOLATED_VARS
            .iter()
            .map(|name| (*name, std::env::var(name).ok()))
            .collect();
        for name in ISOLATED_VARS {
            std::env::remove_var(name);
        }
        std::env::set_var("XDG_CONFIG_HOME", dir.path().join("xdg"));
        Self {
            dir,
            saved,
            _guard: guard,
        }
    }

    pub fn global_config_dir(&self) -> PathBuf {
        self.dir.path().join("xdg").join("netview")
    }

    pub fn set(&self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }
}

impl Drop for IsolatedEnv {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }
}
