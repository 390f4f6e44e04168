//! Linear associative store
//!
//! The toy public façade that ships alongside the engine: a plain list of
//! (key, value) pairs with linear-scan lookup. It shares nothing with the
//! engine — no pages, no checksums, no cache — and exists for callers who
//! want a dead-simple associative array with the same error vocabulary.

use bytes::Bytes;

use crate::error::{FlashError, Result};

/// A linear-scan associative array
#[derive(Default)]
pub struct AssocStore {
    entries: Vec<(Bytes, Bytes)>,
}

impl AssocStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, overwriting an existing entry or appending a new one
    pub fn set(&mut self, key: &[u8], value: &[u8]) {
        let value = Bytes::copy_from_slice(value);
        if let Some((_, v)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            *v = value;
            return;
        }
        self.entries.push((Bytes::copy_from_slice(key), value));
    }

    /// Get a key's value; absence is `KeyNotFound`
    pub fn get(&self, key: &[u8]) -> Result<Bytes> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .ok_or(FlashError::KeyNotFound)
    }

    /// Update an existing key only; `KeyNotFound` if absent
    pub fn update(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => {
                *v = Bytes::copy_from_slice(value);
                Ok(())
            }
            None => Err(FlashError::KeyNotFound),
        }
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
