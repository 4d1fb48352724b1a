//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no storage or UI dependencies.
//! All persisted types are serializable.

mod account;
pub mod credential;
mod patient;

pub use account::Account;
pub use credential::CredentialError;
pub use patient::{Gender, Patient, PatientDraft, PatientUpdate};
