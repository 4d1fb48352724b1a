//! # Medtrack
//!
//! Local-first patient record manager with a terminal UI.
//!
//! This crate provides:
//! - Account registration and login with Argon2id credential hashing
//! - Patient record CRUD scoped to the signed-in account
//! - Search/filter over the record set and CSV import/export
//! - All state persisted as JSON records in a local data directory
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (Account, Patient, credentials)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (JSON files, CSV, log sanitizing)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Account, Gender, Patient, PatientDraft, PatientUpdate};

/// Result type for Medtrack operations
pub type Result<T> = std::result::Result<T, MedtrackError>;

/// Main error type for Medtrack
#[derive(Debug, thiserror::Error)]
pub enum MedtrackError {
    #[error("Username '{0}' is already registered")]
    DuplicateUsername(String),

    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error("No account is signed in")]
    NoSession,

    #[error("Credential operation failed: {0}")]
    Credential(#[from] domain::CredentialError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Unsupported import file: {0}")]
    UnsupportedFile(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
