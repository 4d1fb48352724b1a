//! Shared look of the record manager: one palette, preset styles.
//!
//! The palette leans on blues and slates so the screens read as a clinical
//! tool rather than a toy, with enough contrast for small terminals.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::Gender;

// Palette. Hex values are the Tailwind shades the original UI used.
const ROYAL_BLUE: Color = Color::Rgb(37, 99, 235); // #2563EB
const SKY: Color = Color::Rgb(96, 165, 250); // #60A5FA
const SLATE: Color = Color::Rgb(148, 163, 184); // #94A3B8
const SLATE_DIM: Color = Color::Rgb(100, 116, 139); // #64748B
const EMERALD: Color = Color::Rgb(16, 185, 129); // #10B981
const RED: Color = Color::Rgb(239, 68, 68); // #EF4444
const BLUE: Color = Color::Rgb(59, 130, 246); // #3B82F6
const INK: Color = Color::Rgb(15, 23, 42); // #0F172A
const WHITE: Color = Color::Rgb(248, 250, 252); // #F8FAFC

/// Preset styles used across every screen.
pub struct Theme;

impl Theme {
    /// Screen titles.
    #[must_use]
    pub fn title() -> Style {
        Style::default().fg(WHITE).add_modifier(Modifier::BOLD)
    }

    /// Panel titles.
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default().fg(SKY).add_modifier(Modifier::BOLD)
    }

    /// Body text.
    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(WHITE)
    }

    /// De-emphasized body text.
    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(SLATE)
    }

    /// Hints and placeholder text.
    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(SLATE_DIM)
    }

    /// Completed-action messages.
    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(EMERALD)
    }

    /// Errors and destructive prompts.
    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(RED)
    }

    /// Transient status lines.
    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(BLUE)
    }

    /// The highlighted row in a list.
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(INK)
            .bg(ROYAL_BLUE)
            .add_modifier(Modifier::BOLD)
    }

    /// Label of the element that owns the keyboard.
    #[must_use]
    pub fn focused() -> Style {
        Style::default().fg(SKY).add_modifier(Modifier::BOLD)
    }

    /// Unfocused panel borders.
    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(SLATE)
    }

    /// Border of the element that owns the keyboard.
    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(ROYAL_BLUE)
    }

    /// Bracketed key names in hint lines.
    #[must_use]
    pub fn key_hint() -> Style {
        Style::default().fg(SKY).add_modifier(Modifier::BOLD)
    }

    /// The action next to a key name.
    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(SLATE)
    }

    /// Block cursor drawn inside input fields.
    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(SKY)
    }

    /// Tint for a gender badge.
    #[must_use]
    pub fn gender(gender: Gender) -> Style {
        let (r, g, b) = gender.color();
        Style::default().fg(Color::Rgb(r, g, b))
    }
}

/// Banner shown on the sign-in screen.
pub const LOGO: &str = r#"
╔╦╗┌─┐┌┬┐╔╦╗┬─┐┌─┐┌─┐┬┌─
║║║├┤  ││ ║ ├┬┘├─┤│  ├┴┐
╩ ╩└─┘─┴┘ ╩ ┴└─┴ ┴└─┘┴ ┴
"#;
