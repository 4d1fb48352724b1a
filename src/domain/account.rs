//! Account types for local authentication.

use serde::{Deserialize, Serialize};

/// A registered account.
///
/// Accounts are created on registration and never mutated or deleted.
/// The password itself is never stored; only its Argon2id PHC hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: String,

    /// Login name, unique across all accounts
    pub username: String,

    /// Argon2id hash of the password (PHC string format)
    pub password_hash: String,
}

impl Account {
    /// Create a new account with a fresh identifier.
    #[must_use]
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}
