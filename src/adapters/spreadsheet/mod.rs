//! Spreadsheet adapter: CSV import and export of patient records.
//!
//! Import accepts tabular files whose media type is on a fixed allow-list
//! and turns rows into patient drafts, silently dropping rows that lack a
//! name, a positive age or a diagnosis. Export writes a fixed column order
//! with a date-stamped filename. A blank template (headers plus a few
//! illustrative rows) can be written for hand-filling.

use std::path::{Path, PathBuf};

use crate::domain::{Gender, Patient, PatientDraft};
use crate::{MedtrackError, Result};

/// Column headers expected by the importer (matched case-insensitively).
pub const IMPORT_HEADERS: [&str; 5] = ["Name", "Age", "Gender", "Diagnosis", "Prescription"];

/// Column order written by the exporter.
const EXPORT_HEADERS: [&str; 9] = [
    "Patient ID",
    "Name",
    "Age",
    "Gender",
    "Diagnosis",
    "Prescription",
    "Created By",
    "Created Date",
    "Last Updated",
];

/// Media types the importer accepts.
const ALLOWED_MEDIA_TYPES: [&str; 1] = ["text/csv"];

/// File name used by [`write_template`]. Not date-stamped.
pub const TEMPLATE_FILE_NAME: &str = "medtrack-patient-template.csv";

/// Map a file extension to its media type, for the import allow-list.
#[must_use]
pub fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "csv" => Some("text/csv"),
        "xls" => Some("application/vnd.ms-excel"),
        "xlsx" => Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        _ => None,
    }
}

/// Check that a file is importable before parsing it.
///
/// # Errors
/// Returns `UnsupportedFile` when the file is missing or its media type is
/// not on the allow-list.
pub fn validate_import_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(MedtrackError::UnsupportedFile(format!(
            "{} is not a readable file",
            path.display()
        )));
    }

    match media_type_for(path) {
        Some(media_type) if ALLOWED_MEDIA_TYPES.contains(&media_type) => Ok(()),
        Some(media_type) => Err(MedtrackError::UnsupportedFile(format!(
            "{media_type} is not supported; save the sheet as CSV first"
        ))),
        None => Err(MedtrackError::UnsupportedFile(
            "unrecognized file extension (expected .csv)".to_string(),
        )),
    }
}

/// Parse an import file into patient drafts.
///
/// Headers are matched case-insensitively against [`IMPORT_HEADERS`]. Rows
/// missing a name, a positive integer age or a diagnosis are dropped, not
/// reported; an unknown gender falls back to `Other`. A structurally valid
/// file with no usable rows yields an empty vec.
///
/// # Errors
/// Returns `UnsupportedFile` for files failing [`validate_import_file`] and
/// `Spreadsheet` for unparsable contents.
pub fn import_patients(path: &Path) -> Result<Vec<PatientDraft>> {
    validate_import_file(path)?;

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let name_col = column("Name");
    let age_col = column("Age");
    let gender_col = column("Gender");
    let diagnosis_col = column("Diagnosis");
    let prescription_col = column("Prescription");

    let mut drafts = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |col: Option<usize>| {
            col.and_then(|i| record.get(i))
                .map(str::trim)
                .unwrap_or("")
                .to_string()
        };

        let name = field(name_col);
        let age: u32 = field(age_col).parse().unwrap_or(0);
        let diagnosis = field(diagnosis_col);

        if name.is_empty() || age == 0 || diagnosis.is_empty() {
            continue;
        }

        drafts.push(PatientDraft {
            name,
            age,
            gender: Gender::parse(&field(gender_col)),
            diagnosis,
            prescription: field(prescription_col),
        });
    }

    tracing::info!("Imported {} patient drafts from spreadsheet", drafts.len());
    Ok(drafts)
}

/// Export patients as `{stem}-{YYYY-MM-DD}.csv` in `dir`.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn export_patients(patients: &[Patient], dir: &Path, stem: &str) -> Result<PathBuf> {
    let file_name = format!("{stem}-{}.csv", chrono::Utc::now().format("%Y-%m-%d"));
    let path = dir.join(file_name);

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(EXPORT_HEADERS)?;
    for patient in patients {
        writer.write_record([
            patient.id.as_str(),
            patient.name.as_str(),
            &patient.age.to_string(),
            &patient.gender.to_string(),
            patient.diagnosis.as_str(),
            patient.prescription.as_str(),
            patient.created_by.as_str(),
            &patient.created_at.to_rfc3339(),
            &patient.updated_at.to_rfc3339(),
        ])?;
    }
    writer.flush()?;

    tracing::info!("Exported {} patients to {}", patients.len(), path.display());
    Ok(path)
}

/// Export only the patients whose ids appear in `ids`.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn export_selected(
    patients: &[Patient],
    ids: &[String],
    dir: &Path,
    stem: &str,
) -> Result<PathBuf> {
    let selected: Vec<Patient> = patients
        .iter()
        .filter(|p| ids.contains(&p.id))
        .cloned()
        .collect();
    export_patients(&selected, dir, stem)
}

/// Write a blank import template with illustrative rows.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn write_template(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(TEMPLATE_FILE_NAME);

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(IMPORT_HEADERS)?;
    for draft in template_rows() {
        writer.write_record([
            draft.name.as_str(),
            &draft.age.to_string(),
            &draft.gender.to_string(),
            draft.diagnosis.as_str(),
            draft.prescription.as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(path)
}

fn template_rows() -> Vec<PatientDraft> {
    sample_patients().into_iter().take(3).collect()
}

/// Predefined drafts for templates and demo seeding.
#[must_use]
pub fn sample_patients() -> Vec<PatientDraft> {
    let rows = [
        ("John Smith", 45, Gender::Male, "Hypertension", "Lisinopril 10mg daily"),
        ("Sarah Johnson", 32, Gender::Female, "Type 2 Diabetes", "Metformin 500mg twice daily"),
        ("Michael Brown", 28, Gender::Male, "Asthma", "Albuterol inhaler as needed"),
        ("Emily Davis", 55, Gender::Female, "Osteoarthritis", "Ibuprofen 400mg three times daily"),
        ("David Wilson", 41, Gender::Male, "Depression", "Sertraline 50mg daily"),
    ];

    rows.into_iter()
        .map(|(name, age, gender, diagnosis, prescription)| PatientDraft {
            name: name.to_string(),
            age,
            gender,
            diagnosis: diagnosis.to_string(),
            prescription: prescription.to_string(),
        })
        .collect()
}
