//! Chained-bucket hash table implementation

use bytes::Bytes;

use crate::error::{FlashError, Result};

/// One node in a bucket chain
struct Entry {
    key: Bytes,
    value: Bytes,
    next: Option<Box<Entry>>,
}

/// The key-value hash index
pub struct HashIndex {
    buckets: Vec<Option<Box<Entry>>>,
    len: usize,
    capacity: usize,
}

impl HashIndex {
    /// Create an empty index with `buckets` chains and room for `capacity`
    /// entries in total
    pub fn new(buckets: usize, capacity: usize) -> Self {
        let mut chains = Vec::with_capacity(buckets);
        chains.resize_with(buckets, || None);
        Self {
            buckets: chains,
            len: 0,
            capacity,
        }
    }

    /// Polynomial rolling hash over the key bytes, left to right
    fn bucket_of(&self, key: &[u8]) -> usize {
        let mut hash: u32 = 0;
        for &byte in key {
            hash = hash.wrapping_mul(31).wrapping_add(byte as u32);
        }
        (hash as usize) % self.buckets.len()
    }

    /// Insert or update a key
    ///
    /// If the key already has an entry anywhere in its chain, its value is
    /// overwritten in place; otherwise a new node is appended at the chain
    /// tail. A new key past the entry capacity reports `OutOfMemory`.
    pub fn insert(&mut self, key: &[u8], value: Bytes) -> Result<()> {
        let bucket = self.bucket_of(key);

        // Update in place if the key is already chained
        let mut node = self.buckets[bucket].as_deref_mut();
        while let Some(entry) = node {
            if entry.key == key {
                entry.value = value;
                return Ok(());
            }
            node = entry.next.as_deref_mut();
        }

        if self.len == self.capacity {
            return Err(FlashError::OutOfMemory {
                capacity: self.capacity,
            });
        }

        // Append at the chain tail, preserving insertion order
        let mut slot = &mut self.buckets[bucket];
        while let Some(entry) = slot {
            slot = &mut entry.next;
        }
        *slot = Some(Box::new(Entry {
            key: Bytes::copy_from_slice(key),
            value,
            next: None,
        }));
        self.len += 1;
        Ok(())
    }

    /// Look a key up, scanning its chain in insertion order
    pub fn lookup(&self, key: &[u8]) -> Option<&Bytes> {
        let bucket = self.bucket_of(key);
        let mut node = self.buckets[bucket].as_deref();
        while let Some(entry) = node {
            if entry.key == key {
                return Some(&entry.value);
            }
            node = entry.next.as_deref();
        }
        None
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            // Unlink iteratively; a recursive Drop of a long chain could
            // blow the stack.
            let mut node = chain.take();
            while let Some(mut entry) = node {
                node = entry.next.take();
            }
        }
        self.len = 0;
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total entry capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Drop for HashIndex {
    fn drop(&mut self) {
        self.clear();
    }
}
