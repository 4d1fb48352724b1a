//! Patient workspace: the working set of records for the signed-in account.
//!
//! Holds the loaded patient list plus the active search text and gender
//! filter. Mutations go through [`PatientService`] and the in-memory view
//! is kept in step, so screens can render from this one place.

use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::application::patients::PatientService;
use crate::domain::{Gender, Patient, PatientDraft, PatientUpdate};
use crate::ports::Storage;
use crate::{MedtrackError, Result};

/// Gender restriction applied on top of the text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenderFilter {
    #[default]
    All,
    Only(Gender),
}

impl GenderFilter {
    /// Cycle All -> Male -> Female -> Other -> All.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(Gender::Male),
            Self::Only(Gender::Male) => Self::Only(Gender::Female),
            Self::Only(Gender::Female) => Self::Only(Gender::Other),
            Self::Only(Gender::Other) => Self::All,
        }
    }

    /// Whether a record with `gender` passes this filter.
    #[must_use]
    pub fn matches(self, gender: Gender) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == gender,
        }
    }
}

impl std::fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Only(gender) => write!(f, "{gender}"),
        }
    }
}

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkspaceStats {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub other: usize,
    pub created_this_month: usize,
}

/// The signed-in account's records plus view filters.
pub struct PatientWorkspace<S>
where
    S: Storage,
{
    records: PatientService<S>,
    account_id: Option<String>,
    patients: Vec<Patient>,
    /// Case-insensitive text matched against names and diagnoses.
    pub search: String,
    /// Gender restriction combined with the search.
    pub gender_filter: GenderFilter,
}

impl<S> PatientWorkspace<S>
where
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create an empty workspace with no account selected.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            records: PatientService::new(storage),
            account_id: None,
            patients: Vec::new(),
            search: String::new(),
            gender_filter: GenderFilter::All,
        }
    }

    /// Point the workspace at an account and load its records.
    ///
    /// Filters reset; passing `None` empties the working set.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn set_account(&mut self, account_id: Option<&str>) -> Result<()> {
        self.account_id = account_id.map(str::to_string);
        self.clear_filters();
        self.reload()
    }

    /// Re-read the account's records from storage.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn reload(&mut self) -> Result<()> {
        self.patients = match &self.account_id {
            Some(id) => self.records.list_for(id)?,
            None => Vec::new(),
        };
        Ok(())
    }

    /// All loaded records, insertion order.
    #[must_use]
    pub fn records(&self) -> &[Patient] {
        &self.patients
    }

    /// The record with `id`, if loaded.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Records passing the active search and gender filters.
    ///
    /// A record matches when the search text occurs (case-insensitively) in
    /// its name or diagnosis and its gender passes the filter. An empty
    /// search matches everything.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Patient> {
        let needle = self.search.to_lowercase();
        self.patients
            .iter()
            .filter(|p| {
                (p.name.to_lowercase().contains(&needle)
                    || p.diagnosis.to_lowercase().contains(&needle))
                    && self.gender_filter.matches(p.gender)
            })
            .collect()
    }

    /// Reset search text and gender filter.
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.gender_filter = GenderFilter::All;
    }

    /// Whether any filter differs from its default.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || self.gender_filter != GenderFilter::All
    }

    /// Create a record owned by the current account.
    ///
    /// # Errors
    /// Returns `NoSession` when no account is selected.
    pub fn add_patient(&mut self, draft: PatientDraft) -> Result<Patient> {
        let account_id = self.account_id.clone().ok_or(MedtrackError::NoSession)?;
        let patient = self.records.create(&account_id, draft)?;
        self.patients.push(patient.clone());
        Ok(patient)
    }

    /// Create one record per draft, in order. Returns how many were added.
    ///
    /// # Errors
    /// Returns `NoSession` when no account is selected; an error partway
    /// through leaves the earlier records created.
    pub fn import_drafts(&mut self, drafts: Vec<PatientDraft>) -> Result<usize> {
        let count = drafts.len();
        for draft in drafts {
            self.add_patient(draft)?;
        }
        tracing::info!("Imported {count} patient records");
        Ok(count)
    }

    /// Apply `update` to the record with `id`, then reload from storage.
    ///
    /// Returns `Ok(None)` when no stored record has that id.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn update_patient(&mut self, id: &str, update: PatientUpdate) -> Result<Option<Patient>> {
        let updated = self.records.update(id, update)?;
        if updated.is_some() {
            self.reload()?;
        }
        Ok(updated)
    }

    /// Remove the record with `id`, reporting whether anything was removed.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn delete_patient(&mut self, id: &str) -> Result<bool> {
        let removed = self.records.delete(id)?;
        self.reload()?;
        Ok(removed)
    }

    /// Aggregate counts over the loaded records, ignoring filters.
    #[must_use]
    pub fn stats(&self) -> WorkspaceStats {
        let now = Utc::now();
        let mut stats = WorkspaceStats {
            total: self.patients.len(),
            ..WorkspaceStats::default()
        };

        for patient in &self.patients {
            match patient.gender {
                Gender::Male => stats.male += 1,
                Gender::Female => stats.female += 1,
                Gender::Other => stats.other += 1,
            }
            if patient.created_at.year() == now.year()
                && patient.created_at.month() == now.month()
            {
                stats.created_this_month += 1;
            }
        }

        stats
    }

    /// The most recently updated records, newest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<&Patient> {
        let mut recent: Vec<&Patient> = self.patients.iter().collect();
        recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        recent.truncate(limit);
        recent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use std::thread;
    use std::time::Duration;

    fn create_test_workspace() -> PatientWorkspace<MemoryStorage> {
        let mut workspace = PatientWorkspace::new(Arc::new(MemoryStorage::new()));
        workspace
            .set_account(Some("acct-1"))
            .expect("Should select account");
        workspace
    }

    fn draft(name: &str, age: u32, gender: Gender, diagnosis: &str) -> PatientDraft {
        PatientDraft {
            name: name.to_string(),
            age,
            gender,
            diagnosis: diagnosis.to_string(),
            prescription: "As directed".to_string(),
        }
    }

    #[test]
    fn test_add_requires_account() {
        let mut workspace = PatientWorkspace::new(Arc::new(MemoryStorage::new()));

        let err = workspace
            .add_patient(draft("John Smith", 45, Gender::Male, "Hypertension"))
            .expect_err("Should require a session");
        assert!(matches!(err, MedtrackError::NoSession));
    }

    #[test]
    fn test_filter_combines_search_and_gender() {
        let mut workspace = create_test_workspace();
        workspace
            .add_patient(draft("Ann", 30, Gender::Female, "Asthma"))
            .expect("Should add");
        workspace
            .add_patient(draft("Bob", 40, Gender::Male, "Arthritis"))
            .expect("Should add");

        // Empty search matches everything
        assert_eq!(workspace.filtered().len(), 2);

        workspace.search = "an".to_string();
        let hits = workspace.filtered();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ann");

        workspace.search.clear();
        workspace.gender_filter = GenderFilter::Only(Gender::Female);
        let hits = workspace.filtered();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ann");

        // Both filters must pass
        workspace.search = "bob".to_string();
        assert!(workspace.filtered().is_empty());
    }

    #[test]
    fn test_search_matches_diagnosis_case_insensitively() {
        let mut workspace = create_test_workspace();
        workspace
            .add_patient(draft("John Smith", 45, Gender::Male, "Hypertension"))
            .expect("Should add");
        workspace
            .add_patient(draft("Sarah Johnson", 32, Gender::Female, "Type 2 Diabetes"))
            .expect("Should add");

        workspace.search = "HYPER".to_string();
        let hits = workspace.filtered();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "John Smith");
    }

    #[test]
    fn test_clear_filters_resets_view() {
        let mut workspace = create_test_workspace();
        workspace
            .add_patient(draft("Ann", 30, Gender::Female, "Asthma"))
            .expect("Should add");

        workspace.search = "zzz".to_string();
        workspace.gender_filter = GenderFilter::Only(Gender::Male);
        assert!(workspace.has_active_filters());
        assert!(workspace.filtered().is_empty());

        workspace.clear_filters();
        assert!(!workspace.has_active_filters());
        assert_eq!(workspace.filtered().len(), 1);
    }

    #[test]
    fn test_workspace_scoped_to_account() {
        let storage = Arc::new(MemoryStorage::new());
        let records = PatientService::new(Arc::clone(&storage));
        records
            .create("acct-1", draft("Ann", 30, Gender::Female, "Asthma"))
            .expect("Should create");
        records
            .create("acct-2", draft("Bob", 40, Gender::Male, "Arthritis"))
            .expect("Should create");

        let mut workspace = PatientWorkspace::new(storage);
        workspace
            .set_account(Some("acct-1"))
            .expect("Should select account");
        assert_eq!(workspace.records().len(), 1);
        assert_eq!(workspace.records()[0].name, "Ann");

        workspace.set_account(None).expect("Should deselect");
        assert!(workspace.records().is_empty());
    }

    #[test]
    fn test_update_and_delete_keep_view_in_step() {
        let mut workspace = create_test_workspace();
        let ann = workspace
            .add_patient(draft("Ann", 30, Gender::Female, "Asthma"))
            .expect("Should add");
        workspace
            .add_patient(draft("Bob", 40, Gender::Male, "Arthritis"))
            .expect("Should add");

        let updated = workspace
            .update_patient(
                &ann.id,
                PatientUpdate {
                    age: Some(31),
                    ..PatientUpdate::default()
                },
            )
            .expect("Should update")
            .expect("Record should exist");
        assert_eq!(updated.age, 31);
        assert_eq!(workspace.get(&ann.id).expect("Should be loaded").age, 31);

        assert!(workspace.delete_patient(&ann.id).expect("Should delete"));
        assert!(workspace.get(&ann.id).is_none());
        assert_eq!(workspace.records().len(), 1);
    }

    #[test]
    fn test_update_reloads_rows_written_behind_the_view() {
        let storage = Arc::new(MemoryStorage::new());
        let mut workspace = PatientWorkspace::new(Arc::clone(&storage));
        workspace
            .set_account(Some("acct-1"))
            .expect("Should select account");
        let ann = workspace
            .add_patient(draft("Ann", 30, Gender::Female, "Asthma"))
            .expect("Should add");

        // Another writer appends to the same collection behind this view
        let other = PatientService::new(storage);
        other
            .create("acct-1", draft("Bob", 40, Gender::Male, "Arthritis"))
            .expect("Should create");
        assert_eq!(workspace.records().len(), 1);

        workspace
            .update_patient(
                &ann.id,
                PatientUpdate {
                    age: Some(31),
                    ..PatientUpdate::default()
                },
            )
            .expect("Should update")
            .expect("Record should exist");

        let names: Vec<_> = workspace.records().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Ann", "Bob"]);
        assert_eq!(workspace.get(&ann.id).expect("Should be loaded").age, 31);
    }

    #[test]
    fn test_import_drafts_creates_owned_records() {
        let mut workspace = create_test_workspace();

        let added = workspace
            .import_drafts(vec![
                draft("Ann", 30, Gender::Female, "Asthma"),
                draft("Bob", 40, Gender::Male, "Arthritis"),
            ])
            .expect("Should import");
        assert_eq!(added, 2);
        assert_eq!(workspace.records().len(), 2);
        assert!(workspace.records().iter().all(|p| p.created_by == "acct-1"));
    }

    #[test]
    fn test_stats_counts_by_gender_and_month() {
        let mut workspace = create_test_workspace();
        workspace
            .add_patient(draft("Ann", 30, Gender::Female, "Asthma"))
            .expect("Should add");
        workspace
            .add_patient(draft("Bob", 40, Gender::Male, "Arthritis"))
            .expect("Should add");
        workspace
            .add_patient(draft("Kit", 25, Gender::Other, "Migraine"))
            .expect("Should add");

        let stats = workspace.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.male, 1);
        assert_eq!(stats.female, 1);
        assert_eq!(stats.other, 1);
        // Just created, so all fall in the current month
        assert_eq!(stats.created_this_month, 3);
    }

    #[test]
    fn test_recent_orders_by_last_update() {
        let mut workspace = create_test_workspace();
        let ann = workspace
            .add_patient(draft("Ann", 30, Gender::Female, "Asthma"))
            .expect("Should add");
        workspace
            .add_patient(draft("Bob", 40, Gender::Male, "Arthritis"))
            .expect("Should add");

        thread::sleep(Duration::from_millis(5));
        workspace
            .update_patient(
                &ann.id,
                PatientUpdate {
                    diagnosis: Some("Allergic asthma".to_string()),
                    ..PatientUpdate::default()
                },
            )
            .expect("Should update");

        let recent = workspace.recent(5);
        assert_eq!(recent[0].name, "Ann");
        assert_eq!(recent[1].name, "Bob");

        let capped = workspace.recent(1);
        assert_eq!(capped.len(), 1);
    }
}
