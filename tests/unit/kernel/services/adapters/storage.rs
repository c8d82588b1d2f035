use super::*;
use tempfile::tempdir;

#[test]
fn test_memory_store_roundtrip() {
    let store = MemoryStore::new();
    assert!(store.get("searchHistory").unwrap().is_none());

    store.set("searchHistory", "[]").unwrap();
    assert_eq!(store.get("searchHistory").unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_json_file_store_missing_key() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested"));
    assert!(store.get("searchHistory").unwrap().is_none());
}

#[test]
fn test_json_file_store_creates_dir() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested"));

    store.set("searchSnippets", r#"{"a":1}"#).unwrap();

    let path = dir.path().join("nested").join("searchSnippets.json");
    assert!(path.exists());
    assert_eq!(
        store.get("searchSnippets").unwrap().as_deref(),
        Some(r#"{"a":1}"#)
    );
    assert!(!dir.path().join("nested").join("searchSnippets.json.tmp").exists());
}

#[test]
fn test_json_file_store_rejects_path_like_keys() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    assert!(matches!(
        store.set("../escape", "x"),
        Err(StoreError::InvalidKey(_))
    ));
    assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
}
