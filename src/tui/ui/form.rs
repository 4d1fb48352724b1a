//! Patient record entry form, used for both new records and edits.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{Gender, Patient, PatientDraft};
use crate::tui::styles::Theme;

/// How a field accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Select,
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub kind: FieldKind,
}

const NAME: usize = 0;
const AGE: usize = 1;
const GENDER: usize = 2;
const DIAGNOSIS: usize = 3;
const PRESCRIPTION: usize = 4;

/// Patient form state
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    /// Id of the record being edited, `None` for a new record.
    pub editing: Option<String>,
    pub error_message: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField {
                    label: "Name",
                    hint: "Full patient name (at least 2 characters)",
                    value: String::new(),
                    kind: FieldKind::Text,
                },
                FormField {
                    label: "Age",
                    hint: "Years (1-150)",
                    value: String::new(),
                    kind: FieldKind::Number,
                },
                FormField {
                    label: "Gender",
                    hint: "",
                    value: Gender::Male.to_string(),
                    kind: FieldKind::Select,
                },
                FormField {
                    label: "Diagnosis",
                    hint: "Conditions and findings (at least 5 characters)",
                    value: String::new(),
                    kind: FieldKind::Text,
                },
                FormField {
                    label: "Prescription",
                    hint: "Medication, dosage and instructions (at least 5 characters)",
                    value: String::new(),
                    kind: FieldKind::Text,
                },
            ],
            selected_field: 0,
            editing: None,
            error_message: None,
        }
    }
}

impl PatientFormState {
    /// A form prefilled from an existing record, submitting as an edit.
    #[must_use]
    pub fn for_patient(patient: &Patient) -> Self {
        let mut state = Self::default();
        state.fields[NAME].value = patient.name.clone();
        state.fields[AGE].value = patient.age.to_string();
        state.fields[GENDER].value = patient.gender.to_string();
        state.fields[DIAGNOSIS].value = patient.diagnosis.clone();
        state.fields[PRESCRIPTION].value = patient.prescription.clone();
        state.editing = Some(patient.id.clone());
        state
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Kind of the currently selected field.
    #[must_use]
    pub fn selected_kind(&self) -> FieldKind {
        self.fields[self.selected_field].kind
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        match field.kind {
            FieldKind::Text => {
                if !c.is_control() {
                    field.value.push(c);
                    self.error_message = None;
                }
            }
            FieldKind::Number => {
                if c.is_ascii_digit() {
                    field.value.push(c);
                    self.error_message = None;
                }
            }
            FieldKind::Select => {}
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        let field = &mut self.fields[self.selected_field];
        if field.kind != FieldKind::Select {
            field.value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        let field = &mut self.fields[self.selected_field];
        if field.kind == FieldKind::Select {
            field.value = Gender::Male.to_string();
        } else {
            field.value.clear();
        }
    }

    /// Advance the gender selection.
    pub fn cycle_gender(&mut self) {
        let value = &mut self.fields[GENDER].value;
        *value = Gender::parse(value).next().to_string();
    }

    /// Validate and convert to a draft. Text fields are trimmed.
    ///
    /// # Errors
    /// Returns every failed check, joined into one message.
    pub fn to_draft(&self) -> Result<PatientDraft, String> {
        let mut errors = Vec::new();

        let name = self.fields[NAME].value.trim();
        if name.is_empty() {
            errors.push("Patient name is required".to_string());
        } else if name.chars().count() < 2 {
            errors.push("Patient name must be at least 2 characters".to_string());
        }

        let age_text = self.fields[AGE].value.trim();
        let age: u32 = if age_text.is_empty() {
            errors.push("Age is required".to_string());
            0
        } else {
            match age_text.parse() {
                Ok(age) if (1..=150).contains(&age) => age,
                _ => {
                    errors.push("Age must be a number between 1 and 150".to_string());
                    0
                }
            }
        };

        let diagnosis = self.fields[DIAGNOSIS].value.trim();
        if diagnosis.is_empty() {
            errors.push("Diagnosis is required".to_string());
        } else if diagnosis.chars().count() < 5 {
            errors.push("Diagnosis must be at least 5 characters".to_string());
        }

        let prescription = self.fields[PRESCRIPTION].value.trim();
        if prescription.is_empty() {
            errors.push("Prescription is required".to_string());
        } else if prescription.chars().count() < 5 {
            errors.push("Prescription must be at least 5 characters".to_string());
        }

        if !errors.is_empty() {
            return Err(errors.join(", "));
        }

        Ok(PatientDraft {
            name: name.to_string(),
            age,
            gender: Gender::parse(&self.fields[GENDER].value),
            diagnosis: diagnosis.to_string(),
            prescription: prescription.to_string(),
        })
    }

    /// Load sample data for testing
    pub fn load_sample_data(&mut self) {
        self.fields[NAME].value = "John Smith".to_string();
        self.fields[AGE].value = "45".to_string();
        self.fields[GENDER].value = Gender::Male.to_string();
        self.fields[DIAGNOSIS].value = "Hypertension".to_string();
        self.fields[PRESCRIPTION].value = "Lisinopril 10mg daily".to_string();
        self.error_message = None;
    }
}

/// Render the patient entry form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], state.editing.is_some());
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect, editing: bool) {
    let title = if editing {
        "Edit Patient"
    } else {
        "New Patient"
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled(title, Theme::title()),
        Span::styled(" │ Patient Record Entry", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let field_height = 3;
    let constraints: Vec<Constraint> = state
        .fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for (i, field) in state.fields.iter().enumerate() {
        let is_selected = i == state.selected_field;
        let border_style = if is_selected {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        let title_style = if is_selected {
            Theme::focused()
        } else {
            Theme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = match field.kind {
            FieldKind::Select => {
                let gender = Gender::parse(&field.value);
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(field.value.clone(), Theme::gender(gender)),
                    if is_selected {
                        Span::styled("  [Space] changes", Theme::text_muted())
                    } else {
                        Span::raw("")
                    },
                ])
            }
            _ => {
                let value_display = if field.value.is_empty() {
                    Span::styled(field.hint, Theme::text_muted())
                } else {
                    Span::styled(field.value.clone(), Theme::text())
                };
                Line::from(vec![
                    Span::raw(" "),
                    value_display,
                    if is_selected {
                        Span::styled("▌", Theme::cursor())
                    } else {
                        Span::raw("")
                    },
                ])
            }
        };

        f.render_widget(Paragraph::new(content).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.clone(), Theme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Navigate ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Save ", Theme::key_desc()),
            Span::styled("[Space] ", Theme::key_hint()),
            Span::styled("Change Gender ", Theme::key_desc()),
            Span::styled("[Ctrl+S] ", Theme::key_hint()),
            Span::styled("Sample Data ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Cancel", Theme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_draft_collects_all_failures() {
        let state = PatientFormState::default();
        let err = state.to_draft().expect_err("Empty form should fail");
        assert!(err.contains("Patient name is required"));
        assert!(err.contains("Age is required"));
        assert!(err.contains("Diagnosis is required"));
        assert!(err.contains("Prescription is required"));
    }

    #[test]
    fn test_to_draft_trims_and_parses() {
        let mut state = PatientFormState::default();
        state.fields[NAME].value = "  John Smith  ".to_string();
        state.fields[AGE].value = "45".to_string();
        state.fields[DIAGNOSIS].value = "Hypertension".to_string();
        state.fields[PRESCRIPTION].value = "Lisinopril 10mg daily ".to_string();

        let draft = state.to_draft().expect("Should validate");
        assert_eq!(draft.name, "John Smith");
        assert_eq!(draft.age, 45);
        assert_eq!(draft.gender, Gender::Male);
        assert_eq!(draft.prescription, "Lisinopril 10mg daily");
    }

    #[test]
    fn test_to_draft_rejects_out_of_range_age() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        state.fields[AGE].value = "151".to_string();

        let err = state.to_draft().expect_err("Should reject");
        assert!(err.contains("between 1 and 150"));
    }

    #[test]
    fn test_number_field_accepts_digits_only() {
        let mut state = PatientFormState::default();
        state.selected_field = AGE;
        state.input_char('4');
        state.input_char('x');
        state.input_char('2');
        assert_eq!(state.fields[AGE].value, "42");
    }

    #[test]
    fn test_cycle_gender_wraps_around() {
        let mut state = PatientFormState::default();
        assert_eq!(state.fields[GENDER].value, "Male");
        state.cycle_gender();
        assert_eq!(state.fields[GENDER].value, "Female");
        state.cycle_gender();
        assert_eq!(state.fields[GENDER].value, "Other");
        state.cycle_gender();
        assert_eq!(state.fields[GENDER].value, "Male");
    }

    #[test]
    fn test_for_patient_prefills_and_marks_editing() {
        let patient = Patient::new(
            PatientDraft {
                name: "Sarah Johnson".to_string(),
                age: 32,
                gender: Gender::Female,
                diagnosis: "Type 2 Diabetes".to_string(),
                prescription: "Metformin 500mg twice daily".to_string(),
            },
            "acct-1",
        );

        let state = PatientFormState::for_patient(&patient);
        assert_eq!(state.editing.as_deref(), Some(patient.id.as_str()));
        assert_eq!(state.fields[NAME].value, "Sarah Johnson");
        assert_eq!(state.fields[GENDER].value, "Female");

        let draft = state.to_draft().expect("Prefilled form should validate");
        assert_eq!(draft, patient.draft());
    }
}
