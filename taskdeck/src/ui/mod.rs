//! Terminal UI rendering.

pub mod edit_dialog;
pub mod status_bar;
pub mod task_form;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Form on top, task list filling the middle, one-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    task_form::render(frame, chunks[0], app);
    task_panel::render(frame, chunks[1], app);
    status_bar::render(frame, chunks[2], app);

    // The edit dialog overlays everything when open.
    edit_dialog::render(frame, frame.area(), app);
}
