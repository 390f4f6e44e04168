//! Hash Index Module
//!
//! In-memory key-to-value index, independent of the physical page layout.
//!
//! ## Responsibilities
//! - Map caller-supplied keys to values via a chained-bucket hash table
//! - Resolve collisions with singly linked chains, insertion order preserved
//! - Guarantee at most one entry per key (duplicate inserts update in place)
//! - Bound total entries and report exhaustion explicitly
//!
//! ## Data Structure Choice
//! Classic chained hashing with a polynomial rolling hash
//! (`h = h * 31 + byte`), bucket count equal to the device page count.
//! The chains are real `Option<Box<...>>` links: collision behavior and
//! insertion order are part of the contract, not an implementation detail.

mod table;

pub use table::HashIndex;
