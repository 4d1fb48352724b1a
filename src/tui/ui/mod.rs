//! UI module: View components for the TUI.

pub mod dashboard;
pub mod export;
pub mod form;
pub mod import;
pub mod login;
pub mod patients;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::Theme;

/// Footer shown under every screen.
pub fn render_footer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "All records stay in this machine's data directory. Nothing leaves it.",
            Theme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Press Ctrl+Q to quit from any screen.",
            Theme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Cut `text` to at most `max_chars`, appending an ellipsis when shortened.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
