//! # flashsim
//!
//! A simulated flash block-device key-value store:
//! - Fixed-size byte arena partitioned into pages and erase-blocks
//! - Per-page checksum trailers with reserve-page crash recovery
//! - Collision-chained hash index, independent of the physical layout
//! - Bounded FIFO read cache
//! - Single-threaded, embedded-style usage (no locks, no background work)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Engine Facade                            │
//! │      write / atomic_write / put / read / initialize          │
//! └─────────┬──────────────────┬──────────────────┬─────────────┘
//!           │                  │                  │
//!           ▼                  ▼                  ▼
//!    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//!    │  Read Cache │    │ Hash Index  │    │    Arena    │
//!    │   (FIFO)    │    │  (chained)  │    │ pages/blocks│
//!    └─────────────┘    └─────────────┘    └──────┬──────┘
//!                                                 │
//!                                          ┌──────▼──────┐
//!                                          │ Reserve Page│
//!                                          │  (recovery) │
//!                                          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod integrity;
pub mod arena;
pub mod index;
pub mod cache;
pub mod record;
pub mod engine;
pub mod assoc;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FlashError, Result};
pub use config::Config;
pub use engine::Engine;
pub use assoc::AssocStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of flashsim
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
