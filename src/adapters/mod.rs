//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external libraries:
//! - `json`: JSON files on disk for local storage
//! - `memory`: in-memory storage for tests
//! - `spreadsheet`: CSV import/export of patient records
//! - `sanitize`: PII filtering for logs

pub mod json;
pub mod memory;
pub mod sanitize;
pub mod spreadsheet;

// Re-export storage types for lib.rs
pub use json::{JsonStorage, StorageError};
pub use memory::MemoryStorage;
