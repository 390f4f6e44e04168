//! Error types for flashsim
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FlashError
pub type Result<T> = std::result::Result<T, FlashError>;

/// Unified error type for flashsim operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlashError {
    // -------------------------------------------------------------------------
    // Arena Errors
    // -------------------------------------------------------------------------
    #[error("invalid page index {page} (valid range 0..{num_pages})")]
    InvalidPage { page: usize, num_pages: usize },

    #[error("data of {len} bytes exceeds page payload capacity of {capacity} bytes")]
    DataTooLarge { len: usize, capacity: usize },

    // -------------------------------------------------------------------------
    // Recovery Errors
    // -------------------------------------------------------------------------
    #[error("staged write to page {page} could not be committed; original content preserved")]
    StageFailed { page: usize },

    #[error("page {page} failed its integrity check and no usable reserve image exists")]
    CorruptAndUnrecoverable { page: usize },

    // -------------------------------------------------------------------------
    // Index / Cache Errors
    // -------------------------------------------------------------------------
    #[error("key not found")]
    KeyNotFound,

    #[error("index is full ({capacity} entries)")]
    OutOfMemory { capacity: usize },

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("record encoding error: {0}")]
    Encoding(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}
