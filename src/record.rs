//! Page record format
//!
//! Pages store opaque payloads; the engine maps logical (key, value) pairs
//! onto them with this record. Encoding is bincode: two length-prefixed byte
//! strings, followed by whatever zero padding the page provides (bincode
//! ignores trailing bytes on decode).

use serde::{Deserialize, Serialize};

use crate::error::{FlashError, Result};

/// A (key, value) pair as stored on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl Record {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Encode into page payload bytes
    ///
    /// The caller checks the result against the page payload capacity;
    /// oversized records are rejected there, never truncated.
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| FlashError::Encoding(e.to_string()))
    }

    /// Decode from page payload bytes (zero padding after the record is fine)
    pub fn decode(payload: &[u8]) -> Result<Self> {
        bincode::deserialize(payload).map_err(|e| FlashError::Encoding(e.to_string()))
    }
}
