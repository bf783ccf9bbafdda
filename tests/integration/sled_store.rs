//! Integration tests for the sled-backed table store

use super::test_utils::{fixture_path, load_fixture, PORTCHANNEL_EXPECTED};
use netview::dataset::Dataset;
use netview::query::ShowService;
use netview::store::{SledTableStore, TableFetcher, TableWriter};
use netview::types::DbId;
use netview::views::portchannel::config_table;
use std::sync::Arc;
use tempfile::TempDir;

fn load_portchannels(store: &SledTableStore) {
    load_fixture(store, DbId::ConfigDb, "PORTCHANNEL_EXPECTED.json");
    load_fixture(store, DbId::StateDb, "LAG_TABLE_STATE_EXPECTED.json");
    load_fixture(store, DbId::ApplDb, "LAG_TABLE_APPL_EXPECTED.json");
    load_fixture(store, DbId::StateDb, "LAG_MEMBER_TABLE_STATE_EXPECTED.json");
    load_fixture(store, DbId::ApplDb, "LAG_MEMBER_TABLE_APPL_EXPECTED.json");
}

#[test]
fn test_view_over_sled_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = SledTableStore::new(temp_dir.path()).unwrap();
    load_portchannels(&store);

    let service = ShowService::new(Arc::new(store));
    assert_eq!(
        service.query_path("interface/portchannel").unwrap(),
        PORTCHANNEL_EXPECTED.as_bytes()
    );
}

#[test]
fn test_rows_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        let store = SledTableStore::new(temp_dir.path()).unwrap();
        load_portchannels(&store);
        store.flush().unwrap();
    }

    let store = SledTableStore::new(temp_dir.path()).unwrap();
    assert_eq!(store.fetch(&config_table()).unwrap().len(), 3);
    let service = ShowService::new(Arc::new(store));
    assert_eq!(
        service.query_path("interface/portchannel").unwrap(),
        PORTCHANNEL_EXPECTED.as_bytes()
    );
}

#[test]
fn test_flush_db_empties_view() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SledTableStore::new(temp_dir.path()).unwrap());
    load_portchannels(&store);

    store.flush_db(DbId::ConfigDb).unwrap();
    let service = ShowService::new(store.clone());
    assert_eq!(service.query_path("interface/portchannel").unwrap(), b"{}");
    // Other databases keep their rows
    assert_eq!(
        store
            .fetch(&netview::views::portchannel::state_lag_table())
            .unwrap()
            .len(),
        3
    );
}

#[test]
fn test_dataset_apply_counts_rows() {
    let temp_dir = TempDir::new().unwrap();
    let store = SledTableStore::new(temp_dir.path()).unwrap();
    let dataset =
        Dataset::from_file(&fixture_path("LAG_MEMBER_TABLE_STATE_EXPECTED.json")).unwrap();
    assert_eq!(dataset.apply(&store, DbId::StateDb).unwrap(), 4);
}
