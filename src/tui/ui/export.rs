//! CSV export screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::Theme;

/// Export screen state.
#[derive(Default)]
pub struct ExportState {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Render the export screen.
///
/// `total` and `filtered` are the record counts behind the two export
/// choices.
pub fn render_export(f: &mut Frame, area: Rect, state: &ExportState, total: usize, filtered: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Options
            Constraint::Length(3), // Result line
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_options(f, chunks[1], total, filtered);
    render_result(f, chunks[2], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Export Patients", Theme::title()),
        Span::styled(" │ to a CSV file", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_options(f: &mut Frame, area: Rect, total: usize, filtered: usize) {
    let options = vec![
        Line::from(vec![
            Span::styled("[A] ", Theme::key_hint()),
            Span::styled(format!("Export all records ({total})"), Theme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[F] ", Theme::key_hint()),
            Span::styled(
                format!("Export the current filtered view ({filtered})"),
                Theme::key_desc(),
            ),
        ]),
        Line::from(vec![
            Span::styled("[T] ", Theme::key_hint()),
            Span::styled("Write a blank import template", Theme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Back to dashboard", Theme::key_desc()),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Files are written to the export directory with a date-stamped name.",
            Theme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .title(Span::styled(" Choose an export ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    f.render_widget(Paragraph::new(options).block(block), area);
}

fn render_result(f: &mut Frame, area: Rect, state: &ExportState) {
    let content = if let Some(error) = &state.error {
        Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(error.clone(), Theme::danger()),
        ])
    } else if let Some(message) = &state.message {
        Line::from(vec![Span::styled(message.clone(), Theme::success())])
    } else {
        Line::from("")
    };

    let result = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Theme::border()),
        );
    f.render_widget(result, area);
}
