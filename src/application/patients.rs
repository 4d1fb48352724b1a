//! Patient records service: CRUD over the stored patient collection.
//!
//! Every mutation rewrites the full collection through the storage port.
//! Listing is scoped to the owning account; updates and deletes address
//! records by id and report a missing id through the return value rather
//! than an error.

use std::sync::Arc;

use crate::domain::{Patient, PatientDraft, PatientUpdate};
use crate::ports::Storage;
use crate::{MedtrackError, Result};

/// Service for reading and mutating patient records.
pub struct PatientService<S>
where
    S: Storage,
{
    storage: Arc<S>,
}

impl<S> PatientService<S>
where
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new patient records service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// The patients created by `account_id`, in insertion order.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn list_for(&self, account_id: &str) -> Result<Vec<Patient>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|p| p.created_by == account_id)
            .collect())
    }

    /// Append a new record owned by `account_id`.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn create(&self, account_id: &str, draft: PatientDraft) -> Result<Patient> {
        let mut patients = self.load_all()?;
        let patient = Patient::new(draft, account_id);
        patients.push(patient.clone());
        self.save_all(&patients)?;

        tracing::info!("Created patient record {}", patient.id);
        Ok(patient)
    }

    /// Apply `update` to the record with `id`.
    ///
    /// Returns `Ok(None)` when no stored record has that id; nothing is
    /// written in that case.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn update(&self, id: &str, update: PatientUpdate) -> Result<Option<Patient>> {
        let mut patients = self.load_all()?;
        let Some(patient) = patients.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        patient.apply(update);
        let updated = patient.clone();
        self.save_all(&patients)?;

        tracing::info!("Updated patient record {}", updated.id);
        Ok(Some(updated))
    }

    /// Remove the record with `id`, reporting whether anything was removed.
    ///
    /// The collection is rewritten even when no record matched.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut patients = self.load_all()?;
        let before = patients.len();
        patients.retain(|p| p.id != id);
        let removed = patients.len() < before;
        self.save_all(&patients)?;

        if removed {
            tracing::info!("Deleted patient record {}", id);
        }
        Ok(removed)
    }

    fn load_all(&self) -> Result<Vec<Patient>> {
        self.storage
            .load_patients()
            .map_err(|e| MedtrackError::Storage(e.into()))
    }

    fn save_all(&self, patients: &[Patient]) -> Result<()> {
        self.storage
            .save_patients(patients)
            .map_err(|e| MedtrackError::Storage(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use crate::domain::Gender;
    use std::thread;
    use std::time::Duration;

    fn create_test_service() -> PatientService<MemoryStorage> {
        PatientService::new(Arc::new(MemoryStorage::new()))
    }

    fn draft(name: &str, age: u32, gender: Gender) -> PatientDraft {
        PatientDraft {
            name: name.to_string(),
            age,
            gender,
            diagnosis: "Seasonal allergies".to_string(),
            prescription: "Loratadine 10mg daily".to_string(),
        }
    }

    #[test]
    fn test_create_assigns_identity_and_owner() {
        let service = create_test_service();

        let patient = service
            .create("acct-1", draft("John Smith", 45, Gender::Male))
            .expect("Should create");

        assert!(!patient.id.is_empty());
        assert_eq!(patient.created_by, "acct-1");
        assert_eq!(patient.created_at, patient.updated_at);
    }

    #[test]
    fn test_list_scoped_to_owning_account() {
        let service = create_test_service();

        service
            .create("acct-1", draft("John Smith", 45, Gender::Male))
            .expect("Should create");
        service
            .create("acct-2", draft("Sarah Johnson", 32, Gender::Female))
            .expect("Should create");
        service
            .create("acct-1", draft("Michael Brown", 28, Gender::Male))
            .expect("Should create");

        let mine = service.list_for("acct-1").expect("Should list");
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|p| p.created_by == "acct-1"));
        assert_eq!(mine[0].name, "John Smith");
        assert_eq!(mine[1].name, "Michael Brown");

        let theirs = service.list_for("acct-2").expect("Should list");
        assert_eq!(theirs.len(), 1);

        let nobody = service.list_for("acct-3").expect("Should list");
        assert!(nobody.is_empty());
    }

    #[test]
    fn test_update_merges_present_fields_only() {
        let service = create_test_service();

        let patient = service
            .create("acct-1", draft("John Smith", 45, Gender::Male))
            .expect("Should create");

        // Timestamp resolution guard
        thread::sleep(Duration::from_millis(5));

        let updated = service
            .update(
                &patient.id,
                PatientUpdate {
                    diagnosis: Some("Hypertension".to_string()),
                    ..PatientUpdate::default()
                },
            )
            .expect("Should update")
            .expect("Record should exist");

        assert_eq!(updated.diagnosis, "Hypertension");
        assert_eq!(updated.name, "John Smith");
        assert_eq!(updated.age, 45);
        assert!(updated.updated_at > patient.updated_at);
        assert_eq!(updated.created_at, patient.created_at);
    }

    #[test]
    fn test_update_unknown_id_is_none() {
        let service = create_test_service();

        let result = service
            .update("missing-id", PatientUpdate::default())
            .expect("Should not error");
        assert!(result.is_none());
    }

    #[test]
    fn test_delete_reports_removal() {
        let service = create_test_service();

        let patient = service
            .create("acct-1", draft("John Smith", 45, Gender::Male))
            .expect("Should create");
        service
            .create("acct-1", draft("Sarah Johnson", 32, Gender::Female))
            .expect("Should create");

        // Deleting a missing id finds nothing and changes nothing
        assert!(!service.delete("missing-id").expect("Should not error"));
        assert_eq!(service.list_for("acct-1").expect("Should list").len(), 2);

        assert!(service.delete(&patient.id).expect("Should delete"));
        let remaining = service.list_for("acct-1").expect("Should list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Sarah Johnson");

        // Second delete finds nothing
        assert!(!service.delete(&patient.id).expect("Should not error"));
    }
}
