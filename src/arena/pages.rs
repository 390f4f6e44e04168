//! Page arena implementation
//!
//! Flat byte buffer addressed as `num_pages` pages of `page_size` bytes,
//! with flash-style erase bookkeeping.

use tracing::debug;

use crate::config::Config;
use crate::error::{FlashError, Result};
use crate::integrity;

/// The simulated device memory
pub struct Arena {
    page_size: usize,
    pages_per_block: usize,
    num_pages: usize,

    /// Raw device bytes, `num_pages * page_size` long
    cells: Vec<u8>,

    /// Per-page "has been written" flags
    page_used: Vec<bool>,

    /// Per-block "has been erased and written" flags
    block_used: Vec<bool>,
}

impl Arena {
    /// Create a zeroed arena with the given geometry
    ///
    /// Geometry must already be validated (see [`Config::validate`]).
    pub fn new(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            pages_per_block: config.pages_per_block(),
            num_pages: config.num_pages,
            cells: vec![0; config.num_pages * config.page_size],
            page_used: vec![false; config.num_pages],
            block_used: vec![false; config.num_blocks()],
        }
    }

    /// Reject out-of-range page indexes; never clamps
    pub fn check_page(&self, page: usize) -> Result<()> {
        if page >= self.num_pages {
            return Err(FlashError::InvalidPage {
                page,
                num_pages: self.num_pages,
            });
        }
        Ok(())
    }

    /// Write `data` to a page, applying erase-before-write semantics
    ///
    /// Steps:
    /// 1. Range-check the page and the payload size (rejection, not
    ///    truncation — nothing is mutated on failure)
    /// 2. Zero-fill the owning block on its first ever write
    /// 3. Zero-fill the page itself if it was written before
    /// 4. Copy the payload and seal the checksum trailer
    pub fn write_page(&mut self, page: usize, data: &[u8]) -> Result<()> {
        self.check_page(page)?;
        self.check_payload(data)?;

        self.erase_for_write(page);

        let span = self.page_span(page);
        self.cells[span.start..span.start + data.len()].copy_from_slice(data);
        integrity::seal(&mut self.cells[span]);

        debug!(page, len = data.len(), "page written");
        Ok(())
    }

    /// Commit a full, pre-sealed page image over a page
    ///
    /// Same erase bookkeeping as [`write_page`](Self::write_page), but the
    /// image is copied verbatim — the caller has already sealed it. Used by
    /// the atomic-write commit step.
    pub fn commit_image(&mut self, page: usize, image: &[u8]) -> Result<()> {
        self.check_page(page)?;
        debug_assert_eq!(image.len(), self.page_size);

        self.erase_for_write(page);
        let span = self.page_span(page);
        self.cells[span].copy_from_slice(image);
        Ok(())
    }

    /// Copy a reserve image over a page without touching the erase flags
    ///
    /// The target page has necessarily been written before (unwritten pages
    /// always verify clean), so its bookkeeping already holds.
    pub fn restore_image(&mut self, page: usize, image: &[u8]) -> Result<()> {
        self.check_page(page)?;
        debug_assert_eq!(image.len(), self.page_size);

        let span = self.page_span(page);
        self.cells[span].copy_from_slice(image);
        Ok(())
    }

    /// Raw bytes of a page, trailer included
    pub fn read_page(&self, page: usize) -> Result<&[u8]> {
        self.check_page(page)?;
        Ok(&self.cells[self.page_span(page)])
    }

    /// Payload bytes of a page (everything except the trailer)
    pub fn read_payload(&self, page: usize) -> Result<&[u8]> {
        let raw = self.read_page(page)?;
        Ok(&raw[..raw.len() - 1])
    }

    /// Check a page against its checksum trailer
    ///
    /// A range violation is an error, not a pass. A never-written page
    /// passes: its bytes are all zero and there is nothing to authenticate.
    pub fn verify_page(&self, page: usize) -> Result<bool> {
        self.check_page(page)?;
        if !self.page_used[page] {
            return Ok(true);
        }
        Ok(integrity::verify(&self.cells[self.page_span(page)]))
    }

    /// Build a full sealed page image from a payload, without touching the
    /// arena — the staging half of an atomic write
    pub fn sealed_image(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.check_payload(data)?;
        let mut image = vec![0u8; self.page_size];
        image[..data.len()].copy_from_slice(data);
        integrity::seal(&mut image);
        Ok(image)
    }

    /// XOR-flip one byte of a page in place, bypassing the trailer seal
    ///
    /// Fault injection for recovery tests and demos; a real device corrupts
    /// bits on its own.
    pub fn flip_byte(&mut self, page: usize, offset: usize) -> Result<()> {
        self.check_page(page)?;
        let offset = offset % self.page_size;
        let start = self.page_span(page).start;
        self.cells[start + offset] ^= 0xFF;
        Ok(())
    }

    /// Zero every cell and clear all flags
    pub fn reset(&mut self) {
        self.cells.fill(0);
        self.page_used.fill(false);
        self.block_used.fill(false);
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn payload_capacity(&self) -> usize {
        self.page_size - 1
    }

    /// Whether a page has been written since the last reset
    pub fn page_used(&self, page: usize) -> Result<bool> {
        self.check_page(page)?;
        Ok(self.page_used[page])
    }

    /// Whether a block has been erased-and-written since the last reset
    pub fn block_used(&self, block: usize) -> bool {
        self.block_used.get(block).copied().unwrap_or(false)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn page_span(&self, page: usize) -> std::ops::Range<usize> {
        let start = page * self.page_size;
        start..start + self.page_size
    }

    fn check_payload(&self, data: &[u8]) -> Result<()> {
        let capacity = self.payload_capacity();
        if data.len() > capacity {
            return Err(FlashError::DataTooLarge {
                len: data.len(),
                capacity,
            });
        }
        Ok(())
    }

    /// Erase bookkeeping shared by `write_page` and `commit_image`
    ///
    /// The caller has already range-checked `page`.
    fn erase_for_write(&mut self, page: usize) {
        let block = page / self.pages_per_block;
        if !self.block_used[block] {
            // First write anywhere in this block: erase the whole block.
            // The final block may extend past the arena; clamp to the end.
            let start = block * self.pages_per_block * self.page_size;
            let end = (start + self.pages_per_block * self.page_size).min(self.cells.len());
            self.cells[start..end].fill(0);
            self.block_used[block] = true;
            debug!(block, "block erased before first write");
        }

        if self.page_used[page] {
            // Rewriting a page that shares a freshly-erased block still
            // re-zeroes it: no in-place partial update without erase.
            let span = self.page_span(page);
            self.cells[span].fill(0);
        } else {
            self.page_used[page] = true;
        }
    }
}
