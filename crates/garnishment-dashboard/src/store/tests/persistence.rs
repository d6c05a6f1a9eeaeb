//! Write-through persistence, round-trips and corrupt-data recovery.

use super::{abcd_store, store_with, widget};
use crate::store::{
    storage_key, FileStorage, MemoryStorage, Storage, StorageError, WidgetStore,
};
use crate::widgets::{default_catalog, Widget, WidgetKind, WidthClass};

/// Storage whose writes always fail.
#[derive(Debug, Default)]
struct ReadOnlyStorage {
    inner: MemoryStorage,
}

impl Storage for ReadOnlyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            key: key.to_string(),
            path: std::path::PathBuf::from("/readonly"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

/// Storage whose reads always fail.
#[derive(Debug, Default)]
struct BrokenStorage;

impl Storage for BrokenStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Read {
            key: key.to_string(),
            path: std::path::PathBuf::from("/broken"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "i/o error"),
        })
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

fn stored(store: &WidgetStore<MemoryStorage>) -> Vec<Widget> {
    let json = store
        .storage()
        .get(&storage_key(store.user_id()))
        .expect("memory get")
        .expect("collection is stored");
    serde_json::from_str(&json).expect("stored collection parses")
}

#[test]
fn test_every_mutation_writes_through() {
    let mut store = abcd_store();
    store.set_title("A", "Renamed");
    assert_eq!(stored(&store)[0].title, "Renamed");

    store.reposition("D", 0);
    assert_eq!(stored(&store), store.widgets().to_vec());

    let id = store.add(WidgetKind::Followers, "F");
    assert!(stored(&store).iter().any(|w| w.id == id));

    store.remove(&id);
    assert!(!stored(&store).iter().any(|w| w.id == id));
}

#[test]
fn test_persist_then_load_round_trips() {
    let mut store = abcd_store();
    store.set_visibility("C", false);
    store.apply_resize("A", WidthClass::Two, 360, true);
    store.add(WidgetKind::parse("chart"), "Orders");
    store.persist().expect("memory persist");

    let before = store.widgets().to_vec();
    let user = store.user_id().to_string();
    let reloaded = WidgetStore::load(store.into_storage(), user);
    assert_eq!(reloaded.widgets(), before.as_slice());
}

#[test]
fn test_catalog_round_trips() {
    let mut store = WidgetStore::open(MemoryStorage::new());
    store.persist().expect("memory persist");
    let reloaded = WidgetStore::open(store.into_storage());
    assert_eq!(reloaded.widgets(), default_catalog().as_slice());
}

#[test]
fn test_users_are_isolated() {
    let mut alice = WidgetStore::load(MemoryStorage::new(), "alice");
    alice.remove("statistics");
    let storage = alice.into_storage();
    let bob = WidgetStore::load(storage.clone(), "bob");
    assert_eq!(bob.len(), 13);
    let alice = WidgetStore::load(storage, "alice");
    assert_eq!(alice.len(), 12);
}

#[test]
fn test_malformed_json_falls_back_to_catalog() {
    let storage = MemoryStorage::new().with_entry(&storage_key("tester"), "{not json");
    let store = WidgetStore::load(storage, "tester");
    assert_eq!(store.widgets(), default_catalog().as_slice());
}

#[test]
fn test_wrong_shape_falls_back_to_catalog() {
    let storage =
        MemoryStorage::new().with_entry(&storage_key("tester"), r#"{"widgets": []}"#);
    let store = WidgetStore::load(storage, "tester");
    assert_eq!(store.len(), 13);
}

#[test]
fn test_read_failure_falls_back_to_catalog() {
    let store = WidgetStore::load(BrokenStorage, "tester");
    assert_eq!(store.len(), 13);
    assert_eq!(store.user_id(), "tester");
}

#[test]
fn test_open_with_unreadable_user_id_uses_default() {
    let store = WidgetStore::open(BrokenStorage);
    assert_eq!(store.user_id(), "default-user");
}

#[test]
fn test_write_failure_keeps_memory_state() {
    let mut store = WidgetStore::load(ReadOnlyStorage::default(), "tester");
    assert!(store.set_title("chart", "Still here"));
    assert_eq!(store.get("chart").map(|w| w.title.as_str()), Some("Still here"));
    assert!(store.persist().is_err());
}

#[test]
fn test_empty_stored_collection_is_respected() {
    let store = store_with(Vec::new());
    assert!(store.is_empty());
    assert!(store.query(true).is_empty());
}

#[test]
fn test_load_keeps_stored_positions_verbatim() {
    let store = store_with(vec![widget("A", 1, 4), widget("B", 1, 9)]);
    let positions: Vec<usize> = store.widgets().iter().map(|w| w.position).collect();
    assert_eq!(positions, vec![4, 9]);
}

#[test]
fn test_similar_user_ids_keep_separate_files() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let mut dotted = WidgetStore::load(FileStorage::new(dir.path()), "bob.smith");
    assert!(dotted.set_title("chart", "Bob dot private"));

    let underscored = WidgetStore::load(FileStorage::new(dir.path()), "bob_smith");
    let chart = underscored.get("chart").expect("catalog chart exists");
    assert_ne!(chart.title, "Bob dot private");

    let reloaded = WidgetStore::load(FileStorage::new(dir.path()), "bob.smith");
    assert_eq!(
        reloaded.get("chart").map(|w| w.title.as_str()),
        Some("Bob dot private")
    );
}
