//! CSV import flow: pick a file, preview the parsed rows, confirm.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::adapters::spreadsheet::IMPORT_HEADERS;
use crate::domain::PatientDraft;
use crate::tui::styles::Theme;

/// Where the import flow currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportPhase {
    #[default]
    EnterPath,
    Preview,
    Done,
    Failed,
}

/// Import screen state.
#[derive(Default)]
pub struct ImportState {
    pub phase: ImportPhase,
    pub path_input: String,
    pub drafts: Vec<PatientDraft>,
    /// Error or success text for the current phase.
    pub message: Option<String>,
}

/// Render the import screen for its current phase.
pub fn render_import(f: &mut Frame, area: Rect, state: &ImportState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Hints
        ])
        .split(area);

    render_header(f, chunks[0]);

    match state.phase {
        ImportPhase::EnterPath => render_path_entry(f, chunks[1], state),
        ImportPhase::Preview => render_preview(f, chunks[1], state),
        ImportPhase::Done | ImportPhase::Failed => render_outcome(f, chunks[1], state),
    }

    render_hints(f, chunks[2], state.phase);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Import Patients", Theme::title()),
        Span::styled(" │ from a CSV file", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_path_entry(f: &mut Frame, area: Rect, state: &ImportState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Path input
            Constraint::Length(2), // Error line
            Constraint::Min(0),    // Format help
        ])
        .margin(1)
        .split(area);

    let input_block = Block::default()
        .title(Span::styled(" File path ", Theme::focused()))
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());
    let input = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(state.path_input.clone(), Theme::text()),
        Span::styled("▌", Theme::cursor()),
    ]))
    .block(input_block);
    f.render_widget(input, chunks[0]);

    if let Some(message) = &state.message {
        let error = Paragraph::new(Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(message.clone(), Theme::danger()),
        ]))
        .wrap(Wrap { trim: true });
        f.render_widget(error, chunks[1]);
    }

    let help = vec![
        Line::from(vec![Span::styled(
            "Expected columns:",
            Theme::text_secondary(),
        )]),
        Line::from(vec![Span::styled(
            format!("  {}", IMPORT_HEADERS.join(", ")),
            Theme::text(),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Rows without a name, a valid age or a diagnosis are skipped.",
            Theme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Excel workbooks are not read directly; save the sheet as CSV first.",
            Theme::text_muted(),
        )]),
    ];
    let help_block = Block::default()
        .title(Span::styled(" Format ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());
    f.render_widget(Paragraph::new(help).block(help_block), chunks[2]);
}

fn render_preview(f: &mut Frame, area: Rect, state: &ImportState) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Preview ({} patients found) ", state.drafts.len()),
            Theme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let mut lines = Vec::new();
    for draft in state.drafts.iter().take(10) {
        lines.push(Line::from(vec![
            Span::styled(draft.name.clone(), Theme::text()),
            Span::styled(
                format!("  {} years │ ", draft.age),
                Theme::text_secondary(),
            ),
            Span::styled(draft.gender.to_string(), Theme::gender(draft.gender)),
            Span::styled(format!(" │ {}", draft.diagnosis), Theme::text_secondary()),
        ]));
    }
    if state.drafts.len() > 10 {
        lines.push(Line::from(vec![Span::styled(
            format!("... and {} more patients", state.drafts.len() - 10),
            Theme::text_muted(),
        )]));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_outcome(f: &mut Frame, area: Rect, state: &ImportState) {
    let (style, fallback) = if state.phase == ImportPhase::Done {
        (Theme::success(), "Import complete")
    } else {
        (Theme::danger(), "Import failed")
    };
    let text = state.message.as_deref().unwrap_or(fallback);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let outcome = Paragraph::new(Line::from(vec![Span::styled(text.to_string(), style)]))
        .block(block);
    f.render_widget(outcome, area);
}

fn render_hints(f: &mut Frame, area: Rect, phase: ImportPhase) {
    let hints = match phase {
        ImportPhase::EnterPath => Line::from(vec![
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Load File  ", Theme::key_desc()),
            Span::styled("[Ctrl+T] ", Theme::key_hint()),
            Span::styled("Write Template  ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Back", Theme::key_desc()),
        ]),
        ImportPhase::Preview => Line::from(vec![
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Import These Patients  ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Choose Another File", Theme::key_desc()),
        ]),
        ImportPhase::Done | ImportPhase::Failed => Line::from(vec![
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Back to Dashboard", Theme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(hints).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );
    f.render_widget(footer, area);
}
