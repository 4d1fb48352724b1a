//! Identity service: account registration, sign-in and the persisted session.
//!
//! Passwords are never stored; accounts carry an Argon2id hash and sign-in
//! verifies against it. The session record marks which account is signed in
//! so a restart lands on the dashboard instead of the login screen.

use std::sync::Arc;

use crate::domain::credential::{hash_password, verify_password};
use crate::domain::Account;
use crate::ports::Storage;
use crate::{MedtrackError, Result};

/// Service for account lifecycle and session persistence.
pub struct IdentityService<S>
where
    S: Storage,
{
    storage: Arc<S>,
}

impl<S> IdentityService<S>
where
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new identity service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Register a new account and sign it in.
    ///
    /// # Errors
    /// Returns `DuplicateUsername` when the username is already taken, or an
    /// error if hashing or storage fails.
    pub fn register(&self, username: &str, password: &str) -> Result<Account> {
        let mut accounts = self.load_accounts()?;

        if accounts.iter().any(|a| a.username == username) {
            return Err(MedtrackError::DuplicateUsername(username.to_string()));
        }

        let account = Account::new(username, hash_password(password)?);
        accounts.push(account.clone());
        self.storage
            .save_accounts(&accounts)
            .map_err(|e| MedtrackError::Storage(e.into()))?;
        self.storage
            .save_session(&account)
            .map_err(|e| MedtrackError::Storage(e.into()))?;

        tracing::info!("Registered account {}", account.id);
        Ok(account)
    }

    /// Verify credentials and mark the account as signed in.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// `AuthenticationFailed`; callers cannot tell the cases apart.
    ///
    /// # Errors
    /// Returns `AuthenticationFailed` on bad credentials, or an error if
    /// verification or storage fails.
    pub fn login(&self, username: &str, password: &str) -> Result<Account> {
        let accounts = self.load_accounts()?;

        if let Some(account) = accounts.iter().find(|a| a.username == username) {
            if verify_password(password, &account.password_hash)? {
                self.storage
                    .save_session(account)
                    .map_err(|e| MedtrackError::Storage(e.into()))?;
                tracing::info!("Account {} signed in", account.id);
                return Ok(account.clone());
            }
        }

        tracing::warn!("Rejected sign-in attempt");
        Err(MedtrackError::AuthenticationFailed)
    }

    /// Discard the persisted session. Signing out without a session is a no-op.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn logout(&self) -> Result<()> {
        self.storage
            .clear_session()
            .map_err(|e| MedtrackError::Storage(e.into()))?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// The account recorded as signed in, if any.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn current_session(&self) -> Result<Option<Account>> {
        self.storage
            .load_session()
            .map_err(|e| MedtrackError::Storage(e.into()))
    }

    fn load_accounts(&self) -> Result<Vec<Account>> {
        self.storage
            .load_accounts()
            .map_err(|e| MedtrackError::Storage(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{JsonStorage, MemoryStorage};

    fn create_test_service() -> (Arc<MemoryStorage>, IdentityService<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let service = IdentityService::new(Arc::clone(&storage));
        (storage, service)
    }

    #[test]
    fn test_register_signs_in_and_persists_account() {
        let (storage, service) = create_test_service();

        let account = service
            .register("alice", "correct horse battery")
            .expect("Should register");
        assert_eq!(account.username, "alice");

        let session = service.current_session().expect("Should load session");
        assert_eq!(session.map(|a| a.id), Some(account.id.clone()));

        let accounts = storage.load_accounts().expect("Should load accounts");
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, account.id);
    }

    #[test]
    fn test_register_never_stores_plaintext_password() {
        let (storage, service) = create_test_service();

        service
            .register("alice", "correct horse battery")
            .expect("Should register");

        let accounts = storage.load_accounts().expect("Should load accounts");
        assert_ne!(accounts[0].password_hash, "correct horse battery");
        assert!(!accounts[0].password_hash.contains("correct horse battery"));
        assert!(accounts[0].password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_register_rejects_duplicate_username() {
        let (storage, service) = create_test_service();

        service.register("alice", "first pass").expect("Should register");
        let err = service
            .register("alice", "second pass")
            .expect_err("Should reject duplicate");
        assert!(matches!(err, MedtrackError::DuplicateUsername(u) if u == "alice"));

        // The rejected attempt must not have touched the collection
        let accounts = storage.load_accounts().expect("Should load accounts");
        assert_eq!(accounts.len(), 1);
    }

    #[test]
    fn test_login_accepts_correct_password_only() {
        let (_storage, service) = create_test_service();

        let registered = service
            .register("alice", "correct horse battery")
            .expect("Should register");
        service.logout().expect("Should sign out");

        let err = service
            .login("alice", "wrong password")
            .expect_err("Should reject wrong password");
        assert!(matches!(err, MedtrackError::AuthenticationFailed));

        let err = service
            .login("nobody", "correct horse battery")
            .expect_err("Should reject unknown username");
        assert!(matches!(err, MedtrackError::AuthenticationFailed));

        let account = service
            .login("alice", "correct horse battery")
            .expect("Should sign in");
        assert_eq!(account.id, registered.id);
    }

    #[test]
    fn test_logout_clears_session() {
        let (_storage, service) = create_test_service();

        service.register("alice", "pass phrase").expect("Should register");
        service.logout().expect("Should sign out");

        let session = service.current_session().expect("Should load session");
        assert!(session.is_none());

        // Without a session, signing out again is still fine
        service.logout().expect("Should tolerate missing session");
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = tempfile::tempdir().expect("Should create temp dir");

        let first = IdentityService::new(Arc::new(
            JsonStorage::new(dir.path()).expect("Should open storage"),
        ));
        first
            .register("grace", "long enough secret")
            .expect("Should register");

        let second = IdentityService::new(Arc::new(
            JsonStorage::new(dir.path()).expect("Should open storage"),
        ));
        let restored = second.current_session().expect("Should load session");
        assert_eq!(restored.map(|a| a.username), Some("grace".to_string()));
    }
}
