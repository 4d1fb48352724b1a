//! JSON file adapter: Implementation of Storage.
//!
//! Each logical record is one JSON document in the data directory:
//! `accounts.json`, `session.json` and `patients.json`. Mutations
//! serialize and rewrite the whole document; an absent file reads as an
//! empty collection (or no session). There is no locking and no
//! cross-process coordination: concurrent writers race and the last one
//! wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{Account, Patient};
use crate::ports::Storage;

const ACCOUNTS_FILE: &str = "accounts.json";
const SESSION_FILE: &str = "session.json";
const PATIENTS_FILE: &str = "patients.json";

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON file storage adapter.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create a storage rooted at the given data directory.
    ///
    /// The directory is created if it does not exist.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, StorageError> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            root: dir.as_ref().to_path_buf(),
        })
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn read_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StorageError> {
        match fs::read_to_string(self.record_path(name)) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_record<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(value)?;
        fs::write(self.record_path(name), contents)?;
        Ok(())
    }

    fn remove_record(&self, name: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.record_path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Storage for JsonStorage {
    type Error = StorageError;

    fn save_accounts(&self, accounts: &[Account]) -> Result<(), Self::Error> {
        self.write_record(ACCOUNTS_FILE, accounts)?;
        tracing::debug!("Rewrote accounts record ({} accounts)", accounts.len());
        Ok(())
    }

    fn load_accounts(&self) -> Result<Vec<Account>, Self::Error> {
        self.read_collection(ACCOUNTS_FILE)
    }

    fn save_session(&self, account: &Account) -> Result<(), Self::Error> {
        self.write_record(SESSION_FILE, account)?;
        tracing::debug!("Wrote session marker");
        Ok(())
    }

    fn load_session(&self) -> Result<Option<Account>, Self::Error> {
        match fs::read_to_string(self.record_path(SESSION_FILE)) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear_session(&self) -> Result<(), Self::Error> {
        self.remove_record(SESSION_FILE)?;
        tracing::debug!("Removed session marker");
        Ok(())
    }

    fn save_patients(&self, patients: &[Patient]) -> Result<(), Self::Error> {
        self.write_record(PATIENTS_FILE, patients)?;
        tracing::debug!("Rewrote patients record ({} patients)", patients.len());
        Ok(())
    }

    fn load_patients(&self) -> Result<Vec<Patient>, Self::Error> {
        self.read_collection(PATIENTS_FILE)
    }

    fn clear_all(&self) -> Result<(), Self::Error> {
        self.remove_record(ACCOUNTS_FILE)?;
        self.remove_record(SESSION_FILE)?;
        self.remove_record(PATIENTS_FILE)?;
        tracing::warn!("Cleared all data from storage");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, PatientDraft};

    fn draft(name: &str) -> PatientDraft {
        PatientDraft {
            name: name.to_string(),
            age: 45,
            gender: Gender::Male,
            diagnosis: "Hypertension".to_string(),
            prescription: "Lisinopril 10mg daily".to_string(),
        }
    }

    #[test]
    fn test_absent_records_read_empty() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let storage = JsonStorage::new(dir.path()).expect("Should create storage");

        assert!(storage.load_accounts().expect("Should load").is_empty());
        assert!(storage.load_patients().expect("Should load").is_empty());
        assert!(storage.load_session().expect("Should load").is_none());
    }

    #[test]
    fn test_accounts_roundtrip() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let storage = JsonStorage::new(dir.path()).expect("Should create storage");

        let accounts = vec![
            Account::new("alice", "$argon2id$a"),
            Account::new("bob", "$argon2id$b"),
        ];
        storage.save_accounts(&accounts).expect("Should save");

        let loaded = storage.load_accounts().expect("Should load");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].username, "alice");
        assert_eq!(loaded[1].id, accounts[1].id);
    }

    #[test]
    fn test_session_marker_lifecycle() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let storage = JsonStorage::new(dir.path()).expect("Should create storage");

        let account = Account::new("alice", "$argon2id$a");
        storage.save_session(&account).expect("Should save");

        let restored = storage.load_session().expect("Should load").expect("Should exist");
        assert_eq!(restored.id, account.id);

        storage.clear_session().expect("Should clear");
        assert!(storage.load_session().expect("Should load").is_none());

        // Clearing again is a no-op, not an error
        storage.clear_session().expect("Should clear twice");
    }

    #[test]
    fn test_patients_survive_a_reopen() {
        let dir = tempfile::tempdir().expect("Should create temp dir");

        {
            let storage = JsonStorage::new(dir.path()).expect("Should create storage");
            let patients = vec![Patient::new(draft("John Smith"), "account-1")];
            storage.save_patients(&patients).expect("Should save");
        }

        let reopened = JsonStorage::new(dir.path()).expect("Should reopen storage");
        let loaded = reopened.load_patients().expect("Should load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "John Smith");
        assert_eq!(loaded[0].created_at, loaded[0].updated_at);
    }

    #[test]
    fn test_clear_all_removes_every_record() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let storage = JsonStorage::new(dir.path()).expect("Should create storage");

        let account = Account::new("alice", "$argon2id$a");
        storage.save_accounts(std::slice::from_ref(&account)).expect("Should save");
        storage.save_session(&account).expect("Should save");
        storage
            .save_patients(&[Patient::new(draft("John Smith"), &account.id)])
            .expect("Should save");

        storage.clear_all().expect("Should clear");

        assert!(storage.load_accounts().expect("Should load").is_empty());
        assert!(storage.load_session().expect("Should load").is_none());
        assert!(storage.load_patients().expect("Should load").is_empty());
    }
}
