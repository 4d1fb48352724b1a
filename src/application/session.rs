//! Active session: the signed-in account held by the running app.

use std::sync::Arc;

use crate::application::identity::IdentityService;
use crate::domain::Account;
use crate::ports::Storage;
use crate::Result;

/// The in-memory view of who is signed in.
///
/// Wraps [`IdentityService`] so every state change also updates the
/// persisted session marker. `restore` brings the marker back after a
/// restart.
pub struct ActiveSession<S>
where
    S: Storage,
{
    identity: IdentityService<S>,
    account: Option<Account>,
}

impl<S> ActiveSession<S>
where
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a session with nobody signed in.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            identity: IdentityService::new(storage),
            account: None,
        }
    }

    /// Load the persisted session marker, if any.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn restore(&mut self) -> Result<Option<&Account>> {
        self.account = self.identity.current_session()?;
        if let Some(account) = &self.account {
            tracing::info!("Restored session for account {}", account.id);
        }
        Ok(self.account.as_ref())
    }

    /// The signed-in account, if any.
    #[must_use]
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// The signed-in account id, if any.
    #[must_use]
    pub fn account_id(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.id.as_str())
    }

    /// Sign in with existing credentials.
    ///
    /// # Errors
    /// Returns `AuthenticationFailed` on bad credentials.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&Account> {
        let account = self.identity.login(username, password)?;
        Ok(self.account.insert(account))
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    /// Returns `DuplicateUsername` when the username is taken.
    pub fn register(&mut self, username: &str, password: &str) -> Result<&Account> {
        let account = self.identity.register(username, password)?;
        Ok(self.account.insert(account))
    }

    /// Sign out and clear the persisted marker.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn logout(&mut self) -> Result<()> {
        self.identity.logout()?;
        self.account = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;

    #[test]
    fn test_restore_without_marker_is_none() {
        let mut session = ActiveSession::new(Arc::new(MemoryStorage::new()));
        assert!(session.restore().expect("Should restore").is_none());
        assert!(session.account().is_none());
    }

    #[test]
    fn test_register_login_logout_cycle() {
        let mut session = ActiveSession::new(Arc::new(MemoryStorage::new()));

        session
            .register("alice", "long enough secret")
            .expect("Should register");
        assert_eq!(
            session.account().map(|a| a.username.as_str()),
            Some("alice")
        );
        assert!(session.account_id().is_some());

        session.logout().expect("Should sign out");
        assert!(session.account().is_none());
        assert!(session.account_id().is_none());

        session
            .login("alice", "long enough secret")
            .expect("Should sign in");
        assert_eq!(
            session.account().map(|a| a.username.as_str()),
            Some("alice")
        );
    }

    #[test]
    fn test_restore_picks_up_marker_from_storage() {
        let storage = Arc::new(MemoryStorage::new());

        let mut first = ActiveSession::new(Arc::clone(&storage));
        first
            .register("grace", "long enough secret")
            .expect("Should register");

        let mut second = ActiveSession::new(storage);
        let restored = second.restore().expect("Should restore");
        assert_eq!(restored.map(|a| a.username.as_str()), Some("grace"));
    }
}
