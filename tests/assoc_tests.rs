//! Tests for the linear associative store

use flashsim::{AssocStore, FlashError};

#[test]
fn test_set_and_get() {
    let mut store = AssocStore::new();
    store.set(b"key1", b"value1");
    store.set(b"key2", b"value2");

    assert_eq!(store.get(b"key1").unwrap().as_ref(), b"value1");
    assert_eq!(store.get(b"key2").unwrap().as_ref(), b"value2");
    assert_eq!(store.len(), 2);
}

#[test]
fn test_set_overwrites_existing_key() {
    let mut store = AssocStore::new();
    store.set(b"key1", b"value1");
    store.set(b"key1", b"new_value");

    assert_eq!(store.get(b"key1").unwrap().as_ref(), b"new_value");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_update_requires_existing_key() {
    let mut store = AssocStore::new();
    store.set(b"key1", b"value1");

    store.update(b"key1", b"value2").unwrap();
    assert_eq!(store.get(b"key1").unwrap().as_ref(), b"value2");

    assert_eq!(
        store.update(b"missing", b"x").unwrap_err(),
        FlashError::KeyNotFound
    );
}

#[test]
fn test_get_missing_key() {
    let store = AssocStore::new();
    assert_eq!(store.get(b"nope").unwrap_err(), FlashError::KeyNotFound);
}

#[test]
fn test_clear_empties_store() {
    let mut store = AssocStore::new();
    store.set(b"key1", b"value1");
    store.set(b"key2", b"value2");

    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.get(b"key1").unwrap_err(), FlashError::KeyNotFound);

    // Reusable after clearing
    store.set(b"key1", b"back");
    assert_eq!(store.get(b"key1").unwrap().as_ref(), b"back");
}
