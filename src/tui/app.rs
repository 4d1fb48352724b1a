//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration
//! - Session restore on startup

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{spreadsheet, JsonStorage};
use crate::application::{ActiveSession, PatientWorkspace};
use crate::domain::{Patient, PatientUpdate};

use super::ui::{
    dashboard::render_dashboard,
    export::{render_export, ExportState},
    form::{render_patient_form, FieldKind, PatientFormState},
    import::{render_import, ImportPhase, ImportState},
    login::{render_login, AuthMode, LoginState},
    patients::{render_patients, PatientsFocus, PatientsState},
    render_footer,
};

/// Current screen/view in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    Patients,
    PatientForm,
    Import,
    Export,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Signed-in account, backed by the persisted session marker
    session: ActiveSession<JsonStorage>,

    /// The signed-in account's records plus view filters
    workspace: PatientWorkspace<JsonStorage>,

    /// Directory CSV exports and templates are written to
    export_dir: PathBuf,

    /// Login screen state
    login_state: LoginState,

    /// Patient list state
    patients_state: PatientsState,

    /// Patient form state
    form_state: PatientFormState,

    /// Import flow state
    import_state: ImportState,

    /// Export screen state
    export_state: ExportState,
}

impl App {
    /// Create a new application instance using default adapters.
    ///
    /// This is a convenience method that constructs the storage internally.
    /// For more control, use `with_dependencies()`.
    ///
    /// # Errors
    /// Returns error if the data directory cannot be prepared.
    pub fn new() -> Result<Self> {
        let data_dir =
            std::env::var("MEDTRACK_DATA_DIR").unwrap_or_else(|_| "medtrack_data".to_string());
        let storage = Arc::new(JsonStorage::new(&data_dir)?);

        let export_dir =
            std::env::var("MEDTRACK_EXPORT_DIR").unwrap_or_else(|_| ".".to_string());

        Self::with_dependencies(storage, PathBuf::from(export_dir))
    }

    /// Create application with injected dependencies (Composition Root pattern).
    ///
    /// This allows `main.rs` or tests to construct the storage externally.
    ///
    /// # Errors
    /// Returns error if initialization fails.
    pub fn with_dependencies(storage: Arc<JsonStorage>, export_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            screen: Screen::Login,
            should_quit: false,
            session: ActiveSession::new(Arc::clone(&storage)),
            workspace: PatientWorkspace::new(storage),
            export_dir,
            login_state: LoginState::default(),
            patients_state: PatientsState::default(),
            form_state: PatientFormState::default(),
            import_state: ImportState::default(),
            export_state: ExportState::default(),
        })
    }

    /// Pick up a persisted session so a restart lands on the dashboard.
    ///
    /// # Errors
    /// Returns error if storage fails.
    fn restore_session(&mut self) -> Result<()> {
        if self.session.restore()?.is_some() {
            self.workspace.set_account(self.session.account_id())?;
            self.screen = Screen::Dashboard;
        }
        Ok(())
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        self.restore_session()?;

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let footer_area = chunks[1];

                match self.screen {
                    Screen::Login => render_login(f, content_area, &self.login_state),
                    Screen::Dashboard => {
                        let username = self
                            .session
                            .account()
                            .map(|a| a.username.as_str())
                            .unwrap_or("unknown");
                        let recent = self.workspace.recent(5);
                        render_dashboard(
                            f,
                            content_area,
                            username,
                            self.workspace.stats(),
                            &recent,
                        );
                    }
                    Screen::Patients => {
                        let rows = self.workspace.filtered();
                        render_patients(
                            f,
                            content_area,
                            &self.patients_state,
                            &self.workspace.search,
                            self.workspace.gender_filter,
                            &rows,
                            self.workspace.records().len(),
                        );
                    }
                    Screen::PatientForm => render_patient_form(f, content_area, &self.form_state),
                    Screen::Import => render_import(f, content_area, &self.import_state),
                    Screen::Export => render_export(
                        f,
                        content_area,
                        &self.export_state,
                        self.workspace.records().len(),
                        self.workspace.filtered().len(),
                    ),
                }

                render_footer(f, footer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Patients => self.handle_patients_key(key),
            Screen::PatientForm => self.handle_form_key(key, modifiers),
            Screen::Import => self.handle_import_key(key, modifiers),
            Screen::Export => self.handle_export_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => self.login_state.toggle_mode(),
            KeyCode::Up => self.login_state.prev_field(),
            KeyCode::Down => self.login_state.next_field(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => self.login_state.delete_char(),
            KeyCode::Char(c) => self.login_state.input_char(c),
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        let username = self.login_state.username.trim().to_string();
        let password = self.login_state.password.clone();

        if username.is_empty() || password.is_empty() {
            self.login_state.error_message = Some("Please fill in all fields".to_string());
            return;
        }

        let result = match self.login_state.mode {
            AuthMode::SignIn => self.session.login(&username, &password).map(|_| ()),
            AuthMode::Register => self.session.register(&username, &password).map(|_| ()),
        };

        match result {
            Ok(()) => {
                if let Err(e) = self.workspace.set_account(self.session.account_id()) {
                    tracing::error!("Failed to load records: {e}");
                }
                self.login_state = LoginState::default();
                self.patients_state = PatientsState::default();
                self.screen = Screen::Dashboard;
            }
            Err(e) => {
                self.login_state.password.clear();
                self.login_state.error_message = Some(e.to_string());
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.patients_state = PatientsState::default();
                self.screen = Screen::Patients;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.form_state = PatientFormState::default();
                self.screen = Screen::PatientForm;
            }
            KeyCode::Char('i') | KeyCode::Char('I') => {
                self.import_state = ImportState::default();
                self.screen = Screen::Import;
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                self.export_state = ExportState::default();
                self.screen = Screen::Export;
            }
            KeyCode::Char('l') | KeyCode::Char('L') => self.sign_out(),
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn sign_out(&mut self) {
        if let Err(e) = self.session.logout() {
            tracing::error!("Failed to sign out: {e}");
        }
        if let Err(e) = self.workspace.set_account(None) {
            tracing::error!("Failed to clear the records view: {e}");
        }
        self.login_state = LoginState::default();
        self.screen = Screen::Login;
    }

    fn handle_patients_key(&mut self, key: KeyCode) {
        // A pending delete confirmation captures the keys
        if let Some((id, _)) = self.patients_state.confirm_delete.clone() {
            match key {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.patients_state.confirm_delete = None;
                    self.patients_state.status = Some(match self.workspace.delete_patient(&id) {
                        Ok(true) => "Patient record deleted".to_string(),
                        Ok(false) => "Patient record was already gone".to_string(),
                        Err(e) => e.to_string(),
                    });
                    self.clamp_patient_selection();
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.patients_state.confirm_delete = None;
                }
                _ => {}
            }
            return;
        }

        match self.patients_state.focus {
            PatientsFocus::Search => self.handle_patients_search_key(key),
            PatientsFocus::List => self.handle_patients_list_key(key),
        }
    }

    fn handle_patients_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter => {
                self.patients_state.focus = PatientsFocus::List;
            }
            KeyCode::Backspace => {
                self.workspace.search.pop();
                self.clamp_patient_selection();
            }
            KeyCode::Char(c) => {
                self.workspace.search.push(c);
                self.clamp_patient_selection();
            }
            _ => {}
        }
    }

    fn handle_patients_list_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Dashboard,
            KeyCode::Up => {
                self.patients_state.status = None;
                self.patients_state.selected = self.patients_state.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                self.patients_state.status = None;
                let count = self.workspace.filtered().len();
                if count > 0 && self.patients_state.selected + 1 < count {
                    self.patients_state.selected += 1;
                }
            }
            KeyCode::Char('/') => {
                self.patients_state.focus = PatientsFocus::Search;
            }
            KeyCode::Char('g') | KeyCode::Char('G') => {
                self.workspace.gender_filter = self.workspace.gender_filter.next();
                self.clamp_patient_selection();
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.workspace.clear_filters();
                self.clamp_patient_selection();
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.form_state = PatientFormState::default();
                self.screen = Screen::PatientForm;
            }
            KeyCode::Enter => self.open_selected_for_edit(),
            KeyCode::Char('d') | KeyCode::Char('D') => self.request_delete_selected(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.export_filtered_view(),
            _ => {}
        }
    }

    fn clamp_patient_selection(&mut self) {
        let count = self.workspace.filtered().len();
        if count == 0 {
            self.patients_state.selected = 0;
        } else if self.patients_state.selected >= count {
            self.patients_state.selected = count - 1;
        }
    }

    fn open_selected_for_edit(&mut self) {
        let rows = self.workspace.filtered();
        if let Some(patient) = rows.get(self.patients_state.selected) {
            self.form_state = PatientFormState::for_patient(patient);
            self.screen = Screen::PatientForm;
        }
    }

    fn request_delete_selected(&mut self) {
        let rows = self.workspace.filtered();
        if let Some(patient) = rows.get(self.patients_state.selected) {
            self.patients_state.confirm_delete = Some((patient.id.clone(), patient.name.clone()));
        }
    }

    fn handle_form_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => self.close_form(),
            KeyCode::Up => self.form_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_state.next_field(),
            KeyCode::Char('s') | KeyCode::Char('S')
                if modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(' ') if self.form_state.selected_kind() == FieldKind::Select => {
                self.form_state.cycle_gender();
            }
            KeyCode::Char(c) => self.form_state.input_char(c),
            KeyCode::Backspace => self.form_state.delete_char(),
            KeyCode::Delete => self.form_state.clear_field(),
            KeyCode::Enter => self.submit_patient_form(),
            _ => {}
        }
    }

    fn close_form(&mut self) {
        self.form_state = PatientFormState::default();
        self.clamp_patient_selection();
        self.screen = Screen::Patients;
    }

    fn submit_patient_form(&mut self) {
        let draft = match self.form_state.to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                self.form_state.error_message = Some(message);
                return;
            }
        };

        let result = match self.form_state.editing.clone() {
            Some(id) => self
                .workspace
                .update_patient(&id, PatientUpdate::from_draft(draft))
                .map(|updated| match updated {
                    Some(patient) => format!("Updated {}", patient.name),
                    None => "Patient record no longer exists".to_string(),
                }),
            None => self
                .workspace
                .add_patient(draft)
                .map(|patient| format!("Added {}", patient.name)),
        };

        match result {
            Ok(status) => {
                self.patients_state.status = Some(status);
                self.close_form();
            }
            Err(e) => {
                self.form_state.error_message = Some(e.to_string());
            }
        }
    }

    fn handle_import_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match self.import_state.phase {
            ImportPhase::EnterPath => match key {
                KeyCode::Esc => self.screen = Screen::Dashboard,
                KeyCode::Enter => self.load_import_preview(),
                KeyCode::Char('t') | KeyCode::Char('T')
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    self.import_state.message =
                        Some(match spreadsheet::write_template(&self.export_dir) {
                            Ok(path) => format!("Template written to {}", path.display()),
                            Err(e) => e.to_string(),
                        });
                }
                KeyCode::Char(c) => {
                    self.import_state.message = None;
                    self.import_state.path_input.push(c);
                }
                KeyCode::Backspace => {
                    self.import_state.path_input.pop();
                }
                _ => {}
            },
            ImportPhase::Preview => match key {
                KeyCode::Enter => self.confirm_import(),
                KeyCode::Esc => self.import_state = ImportState::default(),
                _ => {}
            },
            ImportPhase::Done | ImportPhase::Failed => {
                if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                    self.screen = Screen::Dashboard;
                }
            }
        }
    }

    fn load_import_preview(&mut self) {
        let path = PathBuf::from(self.import_state.path_input.trim());
        match spreadsheet::import_patients(&path) {
            Ok(drafts) if drafts.is_empty() => {
                self.import_state.message = Some(
                    "No valid patient data found in the file. Please check the format."
                        .to_string(),
                );
            }
            Ok(drafts) => {
                self.import_state.drafts = drafts;
                self.import_state.message = None;
                self.import_state.phase = ImportPhase::Preview;
            }
            Err(e) => {
                self.import_state.message = Some(e.to_string());
            }
        }
    }

    fn confirm_import(&mut self) {
        let drafts = std::mem::take(&mut self.import_state.drafts);
        match self.workspace.import_drafts(drafts) {
            Ok(count) => {
                self.import_state.phase = ImportPhase::Done;
                self.import_state.message = Some(format!("Imported {count} patients"));
            }
            Err(e) => {
                self.import_state.phase = ImportPhase::Failed;
                self.import_state.message = Some(e.to_string());
            }
        }
    }

    fn handle_export_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Dashboard,
            KeyCode::Char('a') | KeyCode::Char('A') => {
                let rows = self.workspace.records().to_vec();
                self.finish_export(
                    spreadsheet::export_patients(&rows, &self.export_dir, "medtrack-patients"),
                    rows.len(),
                );
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                let rows: Vec<Patient> =
                    self.workspace.filtered().into_iter().cloned().collect();
                self.finish_export(
                    spreadsheet::export_patients(
                        &rows,
                        &self.export_dir,
                        "medtrack-patients-filtered",
                    ),
                    rows.len(),
                );
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                match spreadsheet::write_template(&self.export_dir) {
                    Ok(path) => {
                        self.export_state.error = None;
                        self.export_state.message =
                            Some(format!("Template written to {}", path.display()));
                    }
                    Err(e) => {
                        self.export_state.message = None;
                        self.export_state.error = Some(e.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    fn export_filtered_view(&mut self) {
        let rows: Vec<Patient> = self.workspace.filtered().into_iter().cloned().collect();
        self.patients_state.status = Some(
            match spreadsheet::export_patients(
                &rows,
                &self.export_dir,
                "medtrack-patients-filtered",
            ) {
                Ok(path) => format!("Exported {} patients to {}", rows.len(), path.display()),
                Err(e) => e.to_string(),
            },
        );
    }

    fn finish_export(&mut self, result: crate::Result<PathBuf>, count: usize) {
        match result {
            Ok(path) => {
                self.export_state.error = None;
                self.export_state.message =
                    Some(format!("Exported {count} patients to {}", path.display()));
            }
            Err(e) => {
                self.export_state.message = None;
                self.export_state.error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_app() -> (TempDir, App) {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let storage = Arc::new(JsonStorage::new(dir.path()).expect("Should open storage"));
        let app = App::with_dependencies(storage, dir.path().to_path_buf())
            .expect("Should build app");
        (dir, app)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn register(app: &mut App, username: &str, password: &str) {
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        type_text(app, username);
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        type_text(app, password);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
    }

    #[test]
    fn test_register_flow_reaches_dashboard() {
        let (_dir, mut app) = create_test_app();
        assert_eq!(app.screen, Screen::Login);

        register(&mut app, "alice", "long enough secret");
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn test_login_shows_error_on_bad_credentials() {
        let (_dir, mut app) = create_test_app();

        type_text(&mut app, "nobody");
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        type_text(&mut app, "wrong");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.screen, Screen::Login);
        assert!(app.login_state.error_message.is_some());
        // Password field is wiped on failure
        assert!(app.login_state.password.is_empty());
    }

    #[test]
    fn test_restored_session_skips_login() {
        let dir = tempfile::tempdir().expect("Should create temp dir");

        {
            let storage = Arc::new(JsonStorage::new(dir.path()).expect("Should open storage"));
            let mut first = App::with_dependencies(storage, dir.path().to_path_buf())
                .expect("Should build app");
            register(&mut first, "grace", "long enough secret");
            assert_eq!(first.screen, Screen::Dashboard);
        }

        let storage = Arc::new(JsonStorage::new(dir.path()).expect("Should open storage"));
        let mut second = App::with_dependencies(storage, dir.path().to_path_buf())
            .expect("Should build app");
        second.restore_session().expect("Should restore");
        assert_eq!(second.screen, Screen::Dashboard);
    }

    #[test]
    fn test_form_save_adds_record_and_returns_to_list() {
        let (_dir, mut app) = create_test_app();
        register(&mut app, "alice", "long enough secret");

        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::PatientForm);

        app.handle_key(KeyCode::Char('s'), KeyModifiers::CONTROL);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.screen, Screen::Patients);
        assert_eq!(app.workspace.records().len(), 1);
        assert_eq!(app.workspace.records()[0].name, "John Smith");
        assert!(app.patients_state.status.is_some());
    }

    #[test]
    fn test_invalid_form_stays_with_error() {
        let (_dir, mut app) = create_test_app();
        register(&mut app, "alice", "long enough secret");

        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.screen, Screen::PatientForm);
        assert!(app.form_state.error_message.is_some());
        assert!(app.workspace.records().is_empty());
    }

    #[test]
    fn test_import_preview_and_confirm_creates_records() {
        let (dir, mut app) = create_test_app();
        register(&mut app, "alice", "long enough secret");

        let csv_path = dir.path().join("arrivals.csv");
        std::fs::write(
            &csv_path,
            "Name,Age,Gender,Diagnosis,Prescription\n\
             John Smith,45,Male,Hypertension,Lisinopril 10mg daily\n\
             Sarah Johnson,32,Female,Type 2 Diabetes,Metformin 500mg twice daily\n",
        )
        .expect("Should write");

        app.handle_key(KeyCode::Char('i'), KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Import);
        assert_eq!(app.import_state.phase, ImportPhase::EnterPath);

        type_text(&mut app, csv_path.to_str().expect("Should be UTF-8"));
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.import_state.phase, ImportPhase::Preview);
        assert_eq!(app.import_state.drafts.len(), 2);
        assert!(app.workspace.records().is_empty());

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.import_state.phase, ImportPhase::Done);
        assert_eq!(app.workspace.records().len(), 2);
        assert_eq!(app.workspace.records()[0].name, "John Smith");
        assert_eq!(app.workspace.records()[1].name, "Sarah Johnson");
    }

    #[test]
    fn test_import_of_headers_only_file_reports_no_rows() {
        let (dir, mut app) = create_test_app();
        register(&mut app, "alice", "long enough secret");

        let csv_path = dir.path().join("empty.csv");
        std::fs::write(&csv_path, "Name,Age,Gender,Diagnosis,Prescription\n")
            .expect("Should write");

        app.handle_key(KeyCode::Char('i'), KeyModifiers::NONE);
        type_text(&mut app, csv_path.to_str().expect("Should be UTF-8"));
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.import_state.phase, ImportPhase::EnterPath);
        assert!(app
            .import_state
            .message
            .as_deref()
            .expect("Should have a message")
            .contains("No valid patient data found"));
        assert!(app.workspace.records().is_empty());
    }

    #[test]
    fn test_sign_out_returns_to_login() {
        let (_dir, mut app) = create_test_app();
        register(&mut app, "alice", "long enough secret");

        app.handle_key(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Login);
        assert!(app.session.account().is_none());
        assert!(app.workspace.records().is_empty());
    }

    #[test]
    fn test_ctrl_q_quits_from_any_screen() {
        let (_dir, mut app) = create_test_app();
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
