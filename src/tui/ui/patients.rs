//! Patient list view with search and gender filtering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::truncate;
use crate::application::GenderFilter;
use crate::domain::Patient;
use crate::tui::styles::Theme;

/// Which panel receives typed characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatientsFocus {
    #[default]
    List,
    Search,
}

/// Patient list screen state.
#[derive(Default)]
pub struct PatientsState {
    pub focus: PatientsFocus,
    /// Index into the filtered rows.
    pub selected: usize,
    /// Record pending delete confirmation (id, name).
    pub confirm_delete: Option<(String, String)>,
    /// Transient status line, replaced by the next action.
    pub status: Option<String>,
}

/// Render the patient list with its search bar and footer.
///
/// `rows` is the already-filtered view; `total` is the unfiltered count.
pub fn render_patients(
    f: &mut Frame,
    area: Rect,
    state: &PatientsState,
    search: &str,
    filter: GenderFilter,
    rows: &[&Patient],
    total: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search + filter bar
            Constraint::Min(0),    // List
            Constraint::Length(4), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], rows.len(), total);
    render_filter_bar(f, chunks[1], state, search, filter);
    render_list(f, chunks[2], state, search, filter, rows);
    render_footer(f, chunks[3], state);
}

fn render_header(f: &mut Frame, area: Rect, shown: usize, total: usize) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Patients", Theme::title()),
        Span::styled(
            format!(" │ showing {shown} of {total} records"),
            Theme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_filter_bar(
    f: &mut Frame,
    area: Rect,
    state: &PatientsState,
    search: &str,
    filter: GenderFilter,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let searching = state.focus == PatientsFocus::Search;
    let search_block = Block::default()
        .title(Span::styled(
            " Search (name or diagnosis) ",
            if searching {
                Theme::focused()
            } else {
                Theme::text_secondary()
            },
        ))
        .borders(Borders::ALL)
        .border_style(if searching {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let search_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(search.to_string(), Theme::text()),
        if searching {
            Span::styled("▌", Theme::cursor())
        } else {
            Span::raw("")
        },
    ]);
    f.render_widget(Paragraph::new(search_line).block(search_block), chunks[0]);

    let filter_block = Block::default()
        .title(Span::styled(" Gender ", Theme::text_secondary()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let filter_style = match filter {
        GenderFilter::All => Theme::text(),
        GenderFilter::Only(gender) => Theme::gender(gender),
    };
    let filter_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(filter.to_string(), filter_style),
        Span::styled("  [G] cycles", Theme::text_muted()),
    ]);
    f.render_widget(Paragraph::new(filter_line).block(filter_block), chunks[1]);
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    state: &PatientsState,
    search: &str,
    filter: GenderFilter,
    rows: &[&Patient],
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if rows.is_empty() {
        let has_filters = !search.is_empty() || filter != GenderFilter::All;
        let message = if has_filters {
            "No patients match your search. Press [C] to clear filters."
        } else {
            "No patients yet. Press [N] to add one."
        };
        let empty = Paragraph::new(Line::from(vec![Span::styled(
            message,
            Theme::text_muted(),
        )]))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    // Stateless scrolling: keep the selected row inside the visible window.
    let visible = inner.height as usize;
    let offset = if state.selected >= visible {
        state.selected + 1 - visible
    } else {
        0
    };

    let mut lines = Vec::with_capacity(visible);
    for (i, patient) in rows.iter().enumerate().skip(offset).take(visible) {
        let is_selected = i == state.selected;
        let row_text = format!(
            " {:<22} {:>3}  {:<6}  {:<34} upd {}",
            truncate(&patient.name, 20),
            patient.age,
            patient.gender,
            truncate(&patient.diagnosis, 30),
            patient.updated_at.format("%Y-%m-%d"),
        );

        if is_selected {
            lines.push(Line::from(Span::styled(row_text, Theme::selected())));
        } else {
            lines.push(Line::from(Span::styled(row_text, Theme::text())));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_footer(f: &mut Frame, area: Rect, state: &PatientsState) {
    let content = if let Some((_, name)) = &state.confirm_delete {
        vec![
            Line::from(vec![
                Span::styled("Delete the record for ", Theme::danger()),
                Span::styled(name.clone(), Theme::title()),
                Span::styled("? This cannot be undone.", Theme::danger()),
            ]),
            Line::from(vec![
                Span::styled("[Y] ", Theme::key_hint()),
                Span::styled("Delete Record  ", Theme::key_desc()),
                Span::styled("[N] ", Theme::key_hint()),
                Span::styled("Cancel", Theme::key_desc()),
            ]),
        ]
    } else if let Some(status) = &state.status {
        vec![
            Line::from(vec![Span::styled(status.clone(), Theme::info())]),
            hint_line(),
        ]
    } else {
        vec![
            hint_line(),
            Line::from(vec![
                Span::styled("[/] ", Theme::key_hint()),
                Span::styled("Search  ", Theme::key_desc()),
                Span::styled("[G] ", Theme::key_hint()),
                Span::styled("Gender Filter  ", Theme::key_desc()),
                Span::styled("[C] ", Theme::key_hint()),
                Span::styled("Clear Filters  ", Theme::key_desc()),
                Span::styled("[X] ", Theme::key_hint()),
                Span::styled("Export View  ", Theme::key_desc()),
                Span::styled("[Esc] ", Theme::key_hint()),
                Span::styled("Back", Theme::key_desc()),
            ]),
        ]
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

fn hint_line() -> Line<'static> {
    Line::from(vec![
        Span::styled("[↑↓] ", Theme::key_hint()),
        Span::styled("Select  ", Theme::key_desc()),
        Span::styled("[Enter] ", Theme::key_hint()),
        Span::styled("Edit  ", Theme::key_desc()),
        Span::styled("[N] ", Theme::key_hint()),
        Span::styled("New  ", Theme::key_desc()),
        Span::styled("[D] ", Theme::key_hint()),
        Span::styled("Delete", Theme::key_desc()),
    ])
}
