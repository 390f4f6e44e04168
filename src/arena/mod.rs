//! Storage Arena Module
//!
//! The simulated flash device: a fixed-capacity byte arena partitioned into
//! pages and erase-blocks.
//!
//! ## Responsibilities
//! - Own the raw page bytes and the per-page / per-block "used" flags
//! - Enforce erase-before-write: a block is zeroed as a unit before the
//!   first write to any of its pages; a rewritten page is zeroed again
//!   before new bytes land (no in-place partial update without erase)
//! - Seal every written page with its checksum trailer
//! - Hold the reserve page: the single staging slot the recovery path
//!   restores a corrupted page from
//!
//! ## Layout
//! ```text
//! ┌───────────── block 0 ─────────────┐┌──── block 1 ────
//! │ page 0 │ page 1 │ ... │ page N-1  ││ page N │ ...
//! └────────┴────────┴─────┴───────────┘└────────┴────────
//!   each page: [ payload (page_size - 1) | trailer (1) ]
//! ```

mod pages;
mod reserve;

pub use pages::Arena;
pub use reserve::ReservePage;
