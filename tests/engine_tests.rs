//! Tests for the engine facade
//!
//! These tests verify:
//! - Record round-trips through the physical and index paths together
//! - Index deduplication (update-in-place on duplicate keys)
//! - Cache FIFO eviction and the cache-shadow invariant
//! - Full reset via initialize/clear
//! - KeyNotFound as a normal outcome

use flashsim::{Config, Engine, FlashError};

// =============================================================================
// Helper Functions
// =============================================================================

fn small_cache_engine(cache_size: usize) -> Engine {
    let config = Config::builder().cache_size(cache_size).build();
    Engine::new(config).unwrap()
}

// =============================================================================
// Round-trips
// =============================================================================

#[test]
fn test_put_then_read_roundtrip() {
    let mut engine = Engine::with_defaults();
    engine.put(42, b"temperature", b"18.2").unwrap();

    assert_eq!(engine.read(42).unwrap().as_ref(), b"18.2");
    assert_eq!(engine.index_lookup(b"temperature").unwrap().as_ref(), b"18.2");
}

#[test]
fn test_raw_write_reads_as_absent_key() {
    let mut engine = Engine::with_defaults();

    // A raw payload is not a record; the lookup side reports absence,
    // not a fault
    engine.write(3, b"not a record payload").unwrap();
    assert_eq!(engine.read(3).unwrap_err(), FlashError::KeyNotFound);
}

#[test]
fn test_read_of_blank_page_is_key_not_found() {
    let mut engine = Engine::with_defaults();
    assert_eq!(engine.read(0).unwrap_err(), FlashError::KeyNotFound);
}

#[test]
fn test_oversized_record_rejected_consistently() {
    let mut engine = Engine::with_defaults();
    let big_value = vec![0xAB; 600];

    let err = engine.put(1, b"big", &big_value).unwrap_err();
    assert!(matches!(err, FlashError::DataTooLarge { .. }));

    // Nothing reached the page or the index
    assert!(!engine.page_used(1).unwrap());
    assert_eq!(engine.index_lookup(b"big").unwrap_err(), FlashError::KeyNotFound);
}

// =============================================================================
// Index Semantics
// =============================================================================

#[test]
fn test_duplicate_insert_shadows_nothing() {
    let mut engine = Engine::with_defaults();
    engine.index_insert(b"k", b"v1").unwrap();
    engine.index_insert(b"k", b"v2").unwrap();

    // Update-in-place: the second value wins and only one entry exists
    assert_eq!(engine.index_lookup(b"k").unwrap().as_ref(), b"v2");
    assert_eq!(engine.index_len(), 1);
}

#[test]
fn test_missing_key_is_normal_outcome() {
    let mut engine = Engine::with_defaults();
    assert_eq!(engine.index_lookup(b"ghost").unwrap_err(), FlashError::KeyNotFound);
    assert_eq!(engine.cache_get(b"ghost").unwrap_err(), FlashError::KeyNotFound);
}

#[test]
fn test_index_capacity_reports_out_of_memory() {
    let config = Config::builder().index_capacity(3).build();
    let mut engine = Engine::new(config).unwrap();

    engine.index_insert(b"a", b"1").unwrap();
    engine.index_insert(b"b", b"2").unwrap();
    engine.index_insert(b"c", b"3").unwrap();

    let err = engine.index_insert(b"d", b"4").unwrap_err();
    assert_eq!(err, FlashError::OutOfMemory { capacity: 3 });

    // Existing keys can still be updated at capacity
    engine.index_insert(b"a", b"1b").unwrap();
    assert_eq!(engine.index_lookup(b"a").unwrap().as_ref(), b"1b");
}

// =============================================================================
// Cache Semantics
// =============================================================================

#[test]
fn test_fifo_eviction_of_oldest_entry() {
    let mut engine = small_cache_engine(3);

    for (key, value) in [(b"k0", b"v0"), (b"k1", b"v1"), (b"k2", b"v2"), (b"k3", b"v3")] {
        engine.index_insert(key, value).unwrap();
        engine.index_lookup(key).unwrap(); // fills the cache
    }

    // Exactly the first-inserted key was evicted
    assert_eq!(engine.cache_get(b"k0").unwrap_err(), FlashError::KeyNotFound);
    assert_eq!(engine.cache_len(), 3);

    // The survivors keep FIFO order
    let keys = engine.cache_keys();
    assert_eq!(keys[0].as_ref(), b"k1");
    assert_eq!(keys[1].as_ref(), b"k2");
    assert_eq!(keys[2].as_ref(), b"k3");
}

#[test]
fn test_cache_hit_does_not_promote() {
    let mut engine = small_cache_engine(2);

    engine.index_insert(b"old", b"1").unwrap();
    engine.index_lookup(b"old").unwrap();
    engine.index_insert(b"mid", b"2").unwrap();
    engine.index_lookup(b"mid").unwrap();

    // Hitting the oldest entry must not save it from FIFO eviction
    engine.cache_get(b"old").unwrap();

    engine.index_insert(b"new", b"3").unwrap();
    engine.index_lookup(b"new").unwrap();

    assert_eq!(engine.cache_get(b"old").unwrap_err(), FlashError::KeyNotFound);
    assert_eq!(engine.cache_get(b"mid").unwrap().as_ref(), b"2");
}

#[test]
fn test_cache_shadows_index_updates() {
    let mut engine = Engine::with_defaults();

    engine.index_insert(b"k", b"v1").unwrap();
    engine.index_lookup(b"k").unwrap(); // v1 now cached

    // Updating the index must refresh the cached copy too
    engine.index_insert(b"k", b"v2").unwrap();
    assert_eq!(engine.cache_get(b"k").unwrap().as_ref(), b"v2");
    assert_eq!(engine.cache_len(), 1);
}

// =============================================================================
// Reset
// =============================================================================

#[test]
fn test_initialize_resets_everything() {
    let mut engine = Engine::with_defaults();
    engine.put(5, b"a", b"1").unwrap();
    engine.put(6, b"b", b"2").unwrap();
    engine.index_lookup(b"a").unwrap();

    engine.initialize();

    assert_eq!(engine.read(5).unwrap_err(), FlashError::KeyNotFound);
    assert_eq!(engine.index_lookup(b"a").unwrap_err(), FlashError::KeyNotFound);
    assert_eq!(engine.cache_get(b"a").unwrap_err(), FlashError::KeyNotFound);
    assert_eq!(engine.index_len(), 0);
    assert_eq!(engine.cache_len(), 0);
    assert!(!engine.page_used(5).unwrap());
    assert_eq!(engine.reserve_staged_for(), None);

    // Range violations still reject after a reset
    assert!(matches!(
        engine.read(5000),
        Err(FlashError::InvalidPage { .. })
    ));
}

#[test]
fn test_clear_is_idempotent() {
    let mut engine = Engine::with_defaults();
    engine.put(5, b"a", b"1").unwrap();

    engine.clear();
    engine.clear();
    engine.initialize();

    assert_eq!(engine.index_len(), 0);
    assert_eq!(engine.read(5).unwrap_err(), FlashError::KeyNotFound);

    // The engine is fully usable after a reset
    engine.put(5, b"a", b"again").unwrap();
    assert_eq!(engine.read(5).unwrap().as_ref(), b"again");
}
