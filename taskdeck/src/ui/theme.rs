//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success notice color.
pub const SUCCESS: Color = Color::Green;

/// Error notice color.
pub const ERROR: Color = Color::Red;

/// Loading indicator color.
pub const LOADING: Color = Color::Yellow;

/// Pin marker color.
pub const PIN: Color = Color::Yellow;

/// Panel title color for the form panel.
pub const FORM_TITLE: Color = Color::Blue;

/// Panel title color for the tasks panel.
pub const TASKS_TITLE: Color = Color::Green;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (completed tasks, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for timestamps (dark gray).
#[must_use]
pub fn timestamp() -> Style {
    Style::default().fg(Color::Rgb(120, 120, 120))
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Style for a notice with the given accent color (bold on the bar).
#[must_use]
pub fn notice(color: Color) -> Style {
    Style::default()
        .fg(color)
        .bg(Color::Rgb(30, 30, 50))
        .add_modifier(Modifier::BOLD)
}
