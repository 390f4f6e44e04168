//! Reserve page
//!
//! A single page-sized slot outside the addressable range. Every atomic
//! write stages its sealed page image here before committing; when a page
//! later fails verification, the image is the only recovery source.
//! One slot, one in-flight image — a later staging overwrites an earlier one.

use crate::integrity;

/// The recovery staging slot
pub struct ReservePage {
    /// Staged full page image (sealed), `page_size` bytes
    image: Vec<u8>,

    /// Which page the image was staged for; `None` until first staged
    staged_for: Option<usize>,
}

impl ReservePage {
    /// Create an empty reserve of the given page size
    pub fn new(page_size: usize) -> Self {
        Self {
            image: vec![0; page_size],
            staged_for: None,
        }
    }

    /// Stage a sealed page image for `page`, replacing any earlier image
    pub fn stage(&mut self, page: usize, image: &[u8]) {
        debug_assert_eq!(image.len(), self.image.len());
        self.image.copy_from_slice(image);
        self.staged_for = Some(page);
    }

    /// Drop the staged image (used after a failed staging attempt)
    pub fn clear(&mut self) {
        self.image.fill(0);
        self.staged_for = None;
    }

    /// Page index the current image was staged for, if any
    pub fn staged_for(&self) -> Option<usize> {
        self.staged_for
    }

    /// Whether the staged image can restore `page`: it must have been staged
    /// for that same page and still pass its own trailer check
    pub fn can_restore(&self, page: usize) -> bool {
        self.staged_for == Some(page) && integrity::verify(&self.image)
    }

    /// The staged image bytes
    pub fn image(&self) -> &[u8] {
        &self.image
    }
}
