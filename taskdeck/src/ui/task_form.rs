//! New-task form rendering (title + description inputs).

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, FormField, PanelFocus};

/// Render the new-task form.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    render_field(
        frame,
        chunks[0],
        "New task",
        &app.title_input,
        "Task title...",
        app,
        FormField::Title,
    );
    render_field(
        frame,
        chunks[1],
        "Description",
        &app.description_input,
        "Optional details...",
        app,
        FormField::Description,
    );
}

/// Render one bordered input line with an inline cursor when focused.
fn render_field(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    app: &App,
    field: FormField,
) {
    let is_focused =
        app.focus == PanelFocus::Form && app.form_field == field && app.edit.is_none();

    let mut display_text = value.to_string();
    if is_focused {
        let at = crate::app::byte_index(value, app.cursor_position);
        display_text.insert(at, '█');
    }

    let line = if display_text.is_empty() {
        Line::from(Span::styled(placeholder, theme::dimmed()))
    } else {
        Line::from(Span::styled(display_text, theme::normal()))
    };

    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::FORM_TITLE)))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(Paragraph::new(line).block(block), area);
}
