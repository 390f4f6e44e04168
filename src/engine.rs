//! Engine Module
//!
//! The facade composing the arena, reserve page, hash index, and read cache.
//!
//! ## Responsibilities
//! - Route writes through the erase-before-write arena discipline
//! - Guarantee all-or-nothing page updates via reserve-page staging
//! - Serve reads: integrity check → one recovery attempt → cache → index
//! - Map logical (key, value) records onto physical pages
//! - Keep the cache a faithful shadow of the index
//!
//! ## Concurrency Model
//! Single-threaded by contract: every operation takes `&mut self` (or
//! `&self` for pure reads) and runs to completion, with no suspension
//! points. A multi-threaded extension must wrap the whole engine in
//! exclusive access — the reserve page is a single slot and would race.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::arena::{Arena, ReservePage};
use crate::cache::ReadCache;
use crate::config::Config;
use crate::error::{FlashError, Result};
use crate::index::HashIndex;
use crate::record::Record;

/// The simulated block-device key-value engine
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Page/block arena (the "device")
    arena: Arena,

    /// Single staging slot for atomic writes and recovery
    reserve: ReservePage,

    /// Key → value index, independent of physical layout
    index: HashIndex,

    /// FIFO read cache in front of the index
    cache: ReadCache,

    /// One-shot injected staging fault (fault injection for tests/demos)
    stage_fault: bool,
}

impl Engine {
    /// Build an engine from a validated config
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            arena: Arena::new(&config),
            reserve: ReservePage::new(config.page_size),
            index: HashIndex::new(config.num_pages, config.index_capacity),
            cache: ReadCache::new(config.cache_size),
            config,
            stage_fault: false,
        })
    }

    /// Engine with the default device geometry
    pub fn with_defaults() -> Self {
        // The default config always validates
        Self::new(Config::default()).expect("default config is valid")
    }

    // =========================================================================
    // Physical Writes
    // =========================================================================

    /// Write raw payload bytes to a page
    ///
    /// Erase-before-write semantics apply; oversized payloads are rejected.
    /// Not staged: a page corrupted after a plain write has no reserve image
    /// to recover from.
    pub fn write(&mut self, page: usize, data: &[u8]) -> Result<()> {
        self.arena.write_page(page, data)
    }

    /// Atomically write raw payload bytes to a page
    ///
    /// Steps:
    /// 1. Build the full sealed page image in a scratch buffer
    /// 2. Stage it in the reserve page
    /// 3. Verify the staged image; on failure, clear the reserve and
    ///    report `StageFailed` — the target page is untouched
    /// 4. Commit the image over the real page in one step
    ///
    /// Either the page ends up holding the new bytes with a consistent
    /// trailer, or it still holds its pre-write content.
    pub fn atomic_write(&mut self, page: usize, data: &[u8]) -> Result<()> {
        self.arena.check_page(page)?;
        let image = self.arena.sealed_image(data)?;

        self.reserve.stage(page, &image);

        let fault = std::mem::take(&mut self.stage_fault);
        if fault || !self.reserve.can_restore(page) {
            self.reserve.clear();
            warn!(page, "staging failed; original page content preserved");
            return Err(FlashError::StageFailed { page });
        }

        self.arena.commit_image(page, &image)?;
        debug!(page, len = data.len(), "atomic write committed");
        Ok(())
    }

    /// Store a (key, value) record on a page and index it
    ///
    /// The record is atomically written, then the key is inserted into the
    /// index — the physical and logical paths stay consistent. Records that
    /// do not fit the page payload are rejected, not truncated.
    pub fn put(&mut self, page: usize, key: &[u8], value: &[u8]) -> Result<()> {
        let payload = Record::new(key, value).encode()?;
        if payload.len() > self.config.payload_capacity() {
            return Err(FlashError::DataTooLarge {
                len: payload.len(),
                capacity: self.config.payload_capacity(),
            });
        }
        self.atomic_write(page, &payload)?;
        self.index_insert(key, value)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Read the value stored on a page
    ///
    /// Search order:
    /// 1. Integrity-checked page read, with at most one reserve-page
    ///    restore attempt on checksum failure
    /// 2. Decode the payload as a record; a payload that is not a record
    ///    (e.g. a raw `write`) is a `KeyNotFound`, not a fault
    /// 3. Cache, then index, for the record's key; an index hit fills the
    ///    cache
    pub fn read(&mut self, page: usize) -> Result<Bytes> {
        let payload = self.recoverable_payload(page)?;
        let record = match Record::decode(&payload) {
            Ok(record) => record,
            Err(_) => return Err(FlashError::KeyNotFound),
        };
        self.index_lookup(&record.key)
    }

    /// Insert or update a key in the index
    ///
    /// A key that is already cached has its cached copy refreshed in place,
    /// so the cache never serves a value the index no longer holds.
    pub fn index_insert(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let value = Bytes::copy_from_slice(value);
        self.index.insert(key, value.clone())?;
        self.cache.refresh(key, value);
        Ok(())
    }

    /// Look a key up through the cache, then the index
    ///
    /// An index hit is inserted into the cache. Absence is `KeyNotFound` —
    /// a normal outcome, not a fault.
    pub fn index_lookup(&mut self, key: &[u8]) -> Result<Bytes> {
        if let Some(value) = self.cache.get(key) {
            return Ok(value);
        }
        let value = self
            .index
            .lookup(key)
            .cloned()
            .ok_or(FlashError::KeyNotFound)?;
        self.cache.put(Bytes::copy_from_slice(key), value.clone());
        Ok(value)
    }

    /// Look a key up in the cache only
    pub fn cache_get(&self, key: &[u8]) -> Result<Bytes> {
        self.cache.get(key).ok_or(FlashError::KeyNotFound)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Reset every component to its freshly-constructed state
    ///
    /// Idempotent, infallible. Identical to [`clear`](Self::clear); both
    /// names are kept for device-reset parity.
    pub fn initialize(&mut self) {
        self.reset();
    }

    /// Reset every component to its freshly-constructed state
    pub fn clear(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.arena.reset();
        self.reserve.clear();
        self.index.clear();
        self.cache.clear();
        self.stage_fault = false;
        debug!("engine state cleared");
    }

    // =========================================================================
    // Fault Injection
    // =========================================================================

    /// Force the next `atomic_write` staging attempt to fail
    ///
    /// One-shot; the write after the failed one proceeds normally.
    pub fn inject_stage_fault(&mut self) {
        self.stage_fault = true;
    }

    /// Flip one byte of a page in place, bypassing the checksum seal
    pub fn corrupt_page(&mut self, page: usize, offset: usize) -> Result<()> {
        self.arena.flip_byte(page, offset)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Raw page bytes, trailer included
    pub fn read_page_raw(&self, page: usize) -> Result<&[u8]> {
        self.arena.read_page(page)
    }

    /// Whether a page passes its integrity check
    pub fn verify(&self, page: usize) -> Result<bool> {
        self.arena.verify_page(page)
    }

    /// Whether a page has been written since the last reset
    pub fn page_used(&self, page: usize) -> Result<bool> {
        self.arena.page_used(page)
    }

    /// Page index the reserve currently holds an image for, if any
    pub fn reserve_staged_for(&self) -> Option<usize> {
        self.reserve.staged_for()
    }

    /// Entries currently held by the index
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    /// Entries currently held by the cache
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Cache keys in insertion order, oldest first
    pub fn cache_keys(&self) -> Vec<Bytes> {
        self.cache.keys().cloned().collect()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Page payload after integrity checking, with exactly one recovery
    /// attempt on failure
    fn recoverable_payload(&mut self, page: usize) -> Result<Vec<u8>> {
        if self.arena.verify_page(page)? {
            return Ok(self.arena.read_payload(page)?.to_vec());
        }

        warn!(page, "page failed integrity check, attempting reserve restore");
        if !self.reserve.can_restore(page) {
            return Err(FlashError::CorruptAndUnrecoverable { page });
        }

        let image = self.reserve.image().to_vec();
        self.arena.restore_image(page, &image)?;
        debug!(page, "page restored from reserve image");
        Ok(self.arena.read_payload(page)?.to_vec())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
