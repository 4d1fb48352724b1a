//! In-memory adapter: Implementation of Storage for tests and tooling.
//!
//! Mirrors the record layout of the JSON adapter without touching disk.
//! The state is behind a `Mutex`; a poisoned mutex (from panic in another
//! thread) will cause panic. This fail-fast behavior is intentional.

use std::sync::Mutex;

use crate::domain::{Account, Patient};
use crate::ports::Storage;

use super::json::StorageError;

#[derive(Default)]
struct State {
    accounts: Vec<Account>,
    session: Option<Account>,
    patients: Vec<Patient>,
}

/// In-memory storage adapter.
#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<State>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    type Error = StorageError;

    fn save_accounts(&self, accounts: &[Account]) -> Result<(), Self::Error> {
        self.state.lock().expect("Lock failed").accounts = accounts.to_vec();
        Ok(())
    }

    fn load_accounts(&self) -> Result<Vec<Account>, Self::Error> {
        Ok(self.state.lock().expect("Lock failed").accounts.clone())
    }

    fn save_session(&self, account: &Account) -> Result<(), Self::Error> {
        self.state.lock().expect("Lock failed").session = Some(account.clone());
        Ok(())
    }

    fn load_session(&self) -> Result<Option<Account>, Self::Error> {
        Ok(self.state.lock().expect("Lock failed").session.clone())
    }

    fn clear_session(&self) -> Result<(), Self::Error> {
        self.state.lock().expect("Lock failed").session = None;
        Ok(())
    }

    fn save_patients(&self, patients: &[Patient]) -> Result<(), Self::Error> {
        self.state.lock().expect("Lock failed").patients = patients.to_vec();
        Ok(())
    }

    fn load_patients(&self) -> Result<Vec<Patient>, Self::Error> {
        Ok(self.state.lock().expect("Lock failed").patients.clone())
    }

    fn clear_all(&self) -> Result<(), Self::Error> {
        let mut state = self.state.lock().expect("Lock failed");
        *state = State::default();
        Ok(())
    }
}
