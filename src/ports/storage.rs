//! Storage port: Trait for persistent storage operations.
//!
//! This trait abstracts the persistence backend from the application logic.
//! The persisted state is three logical records: the accounts collection,
//! the active-session marker, and the patients collection. Every mutating
//! operation rewrites its whole record; there are no partial updates and
//! no cross-process coordination (last writer wins).

use crate::domain::{Account, Patient};

/// Trait for local storage operations.
///
/// All data is stored locally and never transmitted.
pub trait Storage: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Replace the full accounts collection.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_accounts(&self, accounts: &[Account]) -> Result<(), Self::Error>;

    /// Load the full accounts collection.
    ///
    /// An absent record reads as an empty collection.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_accounts(&self) -> Result<Vec<Account>, Self::Error>;

    /// Write the active-session marker.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_session(&self, account: &Account) -> Result<(), Self::Error>;

    /// Load the active-session marker.
    ///
    /// # Returns
    /// `None` if no session is active.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_session(&self) -> Result<Option<Account>, Self::Error>;

    /// Remove the active-session marker. A no-op when absent.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear_session(&self) -> Result<(), Self::Error>;

    /// Replace the full patients collection.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_patients(&self, patients: &[Patient]) -> Result<(), Self::Error>;

    /// Load the full patients collection (all owners interleaved).
    ///
    /// An absent record reads as an empty collection.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_patients(&self) -> Result<Vec<Patient>, Self::Error>;

    /// Clear all data (accounts, session, patients).
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear_all(&self) -> Result<(), Self::Error>;
}
