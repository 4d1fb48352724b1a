//! Sign-in / registration screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::styles::{Theme, LOGO};

/// Which auth action Enter submits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

/// Login screen state.
#[derive(Default)]
pub struct LoginState {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
    /// 0 = username, 1 = password
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl LoginState {
    /// Switch between sign-in and registration.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::Register,
            AuthMode::Register => AuthMode::SignIn,
        };
        self.error_message = None;
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % 2;
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.selected_field {
            0 => self.username.push(c),
            _ => self.password.push(c),
        }
        self.error_message = None;
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        match self.selected_field {
            0 => self.username.pop(),
            _ => self.password.pop(),
        };
    }
}

/// Render the sign-in / registration screen.
pub fn render_login(f: &mut Frame, area: Rect, state: &LoginState) {
    // Center a fixed-size panel
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(18),
            Constraint::Min(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(50),
            Constraint::Min(1),
        ])
        .split(vertical[1]);
    let panel = horizontal[1];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Logo
            Constraint::Length(1), // Mode tabs
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(2), // Error
            Constraint::Length(3), // Hints
        ])
        .split(panel);

    let logo = Paragraph::new(LOGO)
        .style(Theme::subtitle())
        .alignment(Alignment::Center);
    f.render_widget(logo, chunks[0]);

    render_mode_tabs(f, chunks[1], state.mode);
    render_input(
        f,
        chunks[2],
        "Username",
        &state.username,
        state.selected_field == 0,
        false,
    );
    render_input(
        f,
        chunks[3],
        "Password",
        &state.password,
        state.selected_field == 1,
        true,
    );

    if let Some(err) = &state.error_message {
        let error = Paragraph::new(Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.clone(), Theme::danger()),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(error, chunks[4]);
    }

    let hints = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("[Tab] ", Theme::key_hint()),
            Span::styled("Switch Mode  ", Theme::key_desc()),
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Field  ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Submit", Theme::key_desc()),
        ]),
        Line::from(vec![Span::styled(
            "Accounts live only in this machine's data directory.",
            Theme::text_muted(),
        )]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(hints, chunks[5]);
}

fn render_mode_tabs(f: &mut Frame, area: Rect, mode: AuthMode) {
    let (sign_in_style, register_style) = match mode {
        AuthMode::SignIn => (Theme::focused(), Theme::text_muted()),
        AuthMode::Register => (Theme::text_muted(), Theme::focused()),
    };

    let tabs = Paragraph::new(Line::from(vec![
        Span::styled(" Sign In ", sign_in_style),
        Span::styled("│", Theme::text_muted()),
        Span::styled(" Register ", register_style),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(tabs, area);
}

fn render_input(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_selected: bool,
    mask: bool,
) {
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
        .title(Span::styled(format!(" {label} "), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let shown = if mask {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(shown, Theme::text()),
        if is_selected {
            Span::styled("▌", Theme::cursor())
        } else {
            Span::raw("")
        },
    ]))
    .block(block);

    f.render_widget(content, area);
}
