//! Patient record types.

use serde::{Deserialize, Serialize};

/// Gender classification used by patient records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse a gender from free-form text.
    ///
    /// Import files may carry anything; unknown or empty values fall back
    /// to `Other` so a row is never rejected for its gender alone.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Other,
        }
    }

    /// The next gender in cycle order (for select-style form input).
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Other,
            Self::Other => Self::Male,
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Male => (59, 130, 246),    // Blue (#3B82F6)
            Self::Female => (236, 72, 153),  // Pink (#EC4899)
            Self::Other => (167, 139, 250),  // Violet (#A78BFA)
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A stored patient record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Unique identifier
    pub id: String,

    /// Full patient name
    pub name: String,

    /// Age in years
    pub age: u32,

    /// Gender classification
    pub gender: Gender,

    /// Free-text diagnosis
    pub diagnosis: String,

    /// Free-text prescription and treatment notes
    pub prescription: String,

    /// Identifier of the account that created the record
    pub created_by: String,

    /// Timestamp of record creation
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Timestamp of the last update
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// The creatable subset of a patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDraft {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub diagnosis: String,
    pub prescription: String,
}

/// A partial update to a patient record.
///
/// Absent fields are left untouched; present fields are applied verbatim,
/// including empty strings. Field validation is a form concern, not a
/// store concern.
#[derive(Debug, Clone, Default)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
}

impl PatientUpdate {
    /// An update that replaces every mutable field with the draft's values.
    #[must_use]
    pub fn from_draft(draft: PatientDraft) -> Self {
        Self {
            name: Some(draft.name),
            age: Some(draft.age),
            gender: Some(draft.gender),
            diagnosis: Some(draft.diagnosis),
            prescription: Some(draft.prescription),
        }
    }
}

impl Patient {
    /// Create a new patient record owned by `created_by`.
    ///
    /// `created_at` and `updated_at` are stamped with the same instant.
    #[must_use]
    pub fn new(draft: PatientDraft, created_by: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name,
            age: draft.age,
            gender: draft.gender,
            diagnosis: draft.diagnosis,
            prescription: draft.prescription,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and stamp `updated_at`.
    ///
    /// `id`, `created_by` and `created_at` are never touched.
    pub fn apply(&mut self, update: PatientUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(diagnosis) = update.diagnosis {
            self.diagnosis = diagnosis;
        }
        if let Some(prescription) = update.prescription {
            self.prescription = prescription;
        }
        self.updated_at = chrono::Utc::now();
    }

    /// The draft view of this record (import/export field set).
    #[must_use]
    pub fn draft(&self) -> PatientDraft {
        PatientDraft {
            name: self.name.clone(),
            age: self.age,
            gender: self.gender,
            diagnosis: self.diagnosis.clone(),
            prescription: self.prescription.clone(),
        }
    }
}
