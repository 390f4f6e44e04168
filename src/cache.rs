//! Read Cache
//!
//! Bounded insertion-ordered cache in front of the hash index. Eviction is
//! strictly FIFO: at capacity the single oldest entry goes, and a hit never
//! promotes an entry. Access recency does not matter here, only insertion
//! recency — the cache is a read-through shadow of the index, never a
//! source of truth.

use std::collections::VecDeque;

use bytes::Bytes;

/// FIFO read cache
pub struct ReadCache {
    entries: VecDeque<(Bytes, Bytes)>,
    capacity: usize,
}

impl ReadCache {
    /// Create an empty cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Linear scan in insertion order; `None` on miss, no promotion on hit
    pub fn get(&self, key: &[u8]) -> Option<Bytes> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Insert a key, evicting the oldest entry if at capacity
    ///
    /// A key already present is refreshed in place and keeps its position;
    /// the cache never holds two entries for one key.
    pub fn put(&mut self, key: Bytes, value: Bytes) {
        if self.refresh(&key, value.clone()) {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((key, value));
    }

    /// Overwrite the cached value for `key` if present, keeping its FIFO
    /// position; returns whether the key was cached
    ///
    /// Used when an index entry is updated, so the shadow can never serve
    /// a stale value.
    pub fn refresh(&mut self, key: &[u8], value: Bytes) -> bool {
        if let Some((_, v)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            *v = value;
            return true;
        }
        false
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Max entries before eviction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys in insertion order, oldest first (for tests and debugging)
    pub fn keys(&self) -> impl Iterator<Item = &Bytes> {
        self.entries.iter().map(|(k, _)| k)
    }
}
