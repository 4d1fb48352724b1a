//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a keyboard-driven medical-records interface for:
//! - Sign in and registration
//! - Dashboard with record statistics
//! - Patient list with search and gender filter
//! - Patient record entry and editing
//! - CSV import and export

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::Theme;
