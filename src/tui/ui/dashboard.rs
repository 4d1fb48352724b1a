//! Dashboard view: Main overview screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::truncate;
use crate::application::WorkspaceStats;
use crate::domain::{Gender, Patient};
use crate::tui::styles::Theme;

/// Render the main dashboard view.
pub fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    username: &str,
    stats: WorkspaceStats,
    recent: &[&Patient],
) {
    // Split into header and main content
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0], username);
    render_main_content(f, chunks[1], stats, recent);
}

fn render_header(f: &mut Frame, area: Rect, username: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("MedTrack", Theme::title()),
        Span::styled(" │ ", Theme::text_muted()),
        Span::styled("Patient Records", Theme::text_secondary()),
        Span::styled(" │ Signed in as ", Theme::text_muted()),
        Span::styled(username.to_string(), Theme::focused()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_main_content(f: &mut Frame, area: Rect, stats: WorkspaceStats, recent: &[&Patient]) {
    // Split into left (stats) and right (recent patients)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Stats panels
            Constraint::Percentage(60), // Recent patients
        ])
        .split(area);

    render_stat_panels(f, chunks[0], stats);
    render_recent_patients(f, chunks[1], recent);
}

fn render_stat_panels(f: &mut Frame, area: Rect, stats: WorkspaceStats) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Overview
            Constraint::Length(5), // Gender distribution
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    // Overview
    let overview_items = vec![
        Line::from(vec![
            Span::styled("  Total records: ", Theme::text_secondary()),
            Span::styled(stats.total.to_string(), Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Added this month: ", Theme::text_secondary()),
            Span::styled(stats.created_this_month.to_string(), Theme::success()),
        ]),
    ];

    let overview_block = Block::default()
        .title(Span::styled(" Overview ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let overview = Paragraph::new(overview_items).block(overview_block);
    f.render_widget(overview, chunks[0]);

    // Gender Distribution
    let gender_block = Block::default()
        .title(Span::styled(" Gender Distribution ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let gender_inner = gender_block.inner(chunks[1]);
    f.render_widget(gender_block, chunks[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(gender_inner);

    render_gender_gauge(f, rows[0], Gender::Male, stats.male, stats.total);
    render_gender_gauge(f, rows[1], Gender::Female, stats.female, stats.total);
    render_gender_gauge(f, rows[2], Gender::Other, stats.other, stats.total);

    // Quick Actions
    let actions = vec![
        Line::from(vec![
            Span::styled("[P] ", Theme::key_hint()),
            Span::styled("Patients", Theme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[N] ", Theme::key_hint()),
            Span::styled("New Patient", Theme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[I] ", Theme::key_hint()),
            Span::styled("Import CSV", Theme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[E] ", Theme::key_hint()),
            Span::styled("Export CSV", Theme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[L] ", Theme::key_hint()),
            Span::styled("Sign Out", Theme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Q] ", Theme::key_hint()),
            Span::styled("Quit", Theme::key_desc()),
        ]),
    ];

    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let actions_list = Paragraph::new(actions).block(actions_block);
    f.render_widget(actions_list, chunks[2]);
}

fn render_gender_gauge(f: &mut Frame, area: Rect, gender: Gender, count: usize, total: usize) {
    let share = if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    };

    let gauge = Gauge::default()
        .gauge_style(Theme::gender(gender))
        .ratio(share)
        .label(format!("{gender} {count} ({:.1}%)", share * 100.0));

    f.render_widget(gauge, area);
}

fn render_recent_patients(f: &mut Frame, area: Rect, recent: &[&Patient]) {
    let block = Block::default()
        .title(Span::styled(" Recent Patients ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if recent.is_empty() {
        let empty_msg = Paragraph::new(Line::from(vec![Span::styled(
            "No patients yet. Press [N] to add your first record.",
            Theme::text_muted(),
        )]))
        .block(block);
        f.render_widget(empty_msg, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::with_capacity(recent.len() * 3);
    for patient in recent {
        lines.push(Line::from(vec![
            Span::styled(patient.name.clone(), Theme::text()),
            Span::styled(format!("  {} years  ", patient.age), Theme::text_secondary()),
            Span::styled(patient.gender.to_string(), Theme::gender(patient.gender)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  ", Theme::text()),
            Span::styled(truncate(&patient.diagnosis, 60), Theme::text_secondary()),
            Span::styled(
                format!("  updated {}", patient.updated_at.format("%Y-%m-%d")),
                Theme::text_muted(),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let list = Paragraph::new(lines);
    f.render_widget(list, inner);
}
