use std::fs;

use jobboard_engine::{
    file_name_for_key, load_bookmarks, save_bookmarks, FileKeyValueStore, KeyValueStore,
    MemoryKeyValueStore, StorageError, BOOKMARKS_KEY,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Read {
            key: key.to_string(),
            message: "device unavailable".to_string(),
        })
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            key: key.to_string(),
            message: "device unavailable".to_string(),
        })
    }
}

#[test]
fn key_maps_to_safe_file_name() {
    assert_eq!(file_name_for_key(BOOKMARKS_KEY), "bookmarkedJobs.json");
    assert_eq!(file_name_for_key("../etc/passwd"), "etc_passwd.json");
    assert_eq!(file_name_for_key("@@"), "store.json");
}

#[test]
fn file_store_round_trips_and_overwrites() {
    let temp = TempDir::new().unwrap();
    let store = FileKeyValueStore::new(temp.path().join("data"));

    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "first").unwrap();
    store.set("k", "second").unwrap();

    assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    assert_eq!(
        fs::read_to_string(store.path_for("k")).unwrap(),
        "second"
    );
}

#[test]
fn file_store_write_fails_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let not_a_dir = temp.path().join("not_a_dir");
    fs::write(&not_a_dir, "x").unwrap();

    let store = FileKeyValueStore::new(not_a_dir);
    let err = store.set(BOOKMARKS_KEY, "[]").unwrap_err();
    assert!(matches!(err, StorageError::Write { .. }));
}

#[test]
fn bookmarks_persist_as_json_array() {
    let temp = TempDir::new().unwrap();
    let store = FileKeyValueStore::new(temp.path());
    let bookmarks = vec![json!({"id": 1, "title": "A", "salary_range": "5k"})];

    save_bookmarks(&store, &bookmarks).unwrap();

    let raw = fs::read_to_string(store.path_for(BOOKMARKS_KEY)).unwrap();
    assert_eq!(serde_json::from_str::<serde_json::Value>(&raw).unwrap(), json!(bookmarks));
    assert_eq!(load_bookmarks(&store), bookmarks);
}

#[test]
fn absent_bookmarks_load_empty() {
    let store = MemoryKeyValueStore::new();
    assert!(load_bookmarks(&store).is_empty());
}

#[test]
fn unreadable_storage_loads_empty() {
    jobboard_logging::initialize_for_tests();
    assert!(load_bookmarks(&BrokenStore).is_empty());
}

#[test]
fn corrupt_or_wrong_shape_loads_empty() {
    jobboard_logging::initialize_for_tests();
    for blob in ["{not json", "{\"id\": 1}", "null", "\"text\""] {
        let store = MemoryKeyValueStore::with_value(BOOKMARKS_KEY, blob);
        assert!(load_bookmarks(&store).is_empty(), "blob {blob:?}");
    }
}

#[test]
fn save_reports_write_failures() {
    let err = save_bookmarks(&BrokenStore, &[json!({"id": 1, "title": "A"})]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to write @bookmarkedJobs: device unavailable"
    );
}
