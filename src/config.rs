//! Configuration for flashsim
//!
//! Centralized device geometry and capacity limits with sensible defaults.

/// Main configuration for a simulated flash device
///
/// The defaults reproduce the classic layout: 512-byte pages, 16 KiB
/// erase-blocks (32 pages per block), 1000 pages, a 10-entry read cache.
/// None of these are magic; construct a custom [`Config`] through the
/// builder to model a different device.
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------
    /// Size of a single page in bytes (write granularity).
    /// The last byte of every page is its checksum trailer, so the usable
    /// payload is `page_size - 1` bytes.
    pub page_size: usize,

    /// Size of an erase-block in bytes. Must be a multiple of `page_size`;
    /// a block is zeroed as a unit before the first write to any of its pages.
    pub block_size: usize,

    /// Total number of addressable pages in the arena.
    pub num_pages: usize,

    // -------------------------------------------------------------------------
    // Index / Cache Capacity
    // -------------------------------------------------------------------------
    /// Max entries held by the read cache before FIFO eviction kicks in.
    pub cache_size: usize,

    /// Max entries the hash index will accept before reporting
    /// [`FlashError::OutOfMemory`](crate::FlashError::OutOfMemory).
    /// Defaults to `num_pages` (one record per page).
    pub index_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: 512,
            block_size: 16 * 1024,
            num_pages: 1000,
            cache_size: 10,
            index_capacity: 1000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Pages per erase-block
    pub fn pages_per_block(&self) -> usize {
        self.block_size / self.page_size
    }

    /// Number of erase-blocks covering the arena (the final block may be
    /// partially filled and is clamped at the arena end)
    pub fn num_blocks(&self) -> usize {
        self.num_pages.div_ceil(self.pages_per_block())
    }

    /// Usable payload bytes per page (everything except the checksum trailer)
    pub fn payload_capacity(&self) -> usize {
        self.page_size - 1
    }

    /// Validate geometry consistency
    pub fn validate(&self) -> crate::Result<()> {
        if self.page_size < 2 {
            return Err(crate::FlashError::Config(format!(
                "page_size must be at least 2 bytes (payload + trailer), got {}",
                self.page_size
            )));
        }
        if self.block_size == 0 || self.block_size % self.page_size != 0 {
            return Err(crate::FlashError::Config(format!(
                "block_size {} is not a non-zero multiple of page_size {}",
                self.block_size, self.page_size
            )));
        }
        if self.num_pages == 0 {
            return Err(crate::FlashError::Config(
                "num_pages must be non-zero".to_string(),
            ));
        }
        if self.cache_size == 0 {
            return Err(crate::FlashError::Config(
                "cache_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the page size in bytes
    pub fn page_size(mut self, bytes: usize) -> Self {
        self.config.page_size = bytes;
        self
    }

    /// Set the erase-block size in bytes
    pub fn block_size(mut self, bytes: usize) -> Self {
        self.config.block_size = bytes;
        self
    }

    /// Set the total number of pages
    pub fn num_pages(mut self, count: usize) -> Self {
        self.config.num_pages = count;
        self
    }

    /// Set the read-cache capacity (entries)
    pub fn cache_size(mut self, count: usize) -> Self {
        self.config.cache_size = count;
        self
    }

    /// Set the hash-index entry capacity
    pub fn index_capacity(mut self, count: usize) -> Self {
        self.config.index_capacity = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
