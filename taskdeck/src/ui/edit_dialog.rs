//! Modal edit dialog rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::theme;
use crate::app::{App, EditState, FormField};

/// Render the edit dialog centered over the rest of the UI.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(edit) = &app.edit else {
        return;
    };

    let dialog = centered_rect(area, 60, 11);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(Span::styled("Edit task", theme::highlighted()))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_field(frame, chunks[0], "Title", edit, FormField::Title, app);
    render_field(
        frame,
        chunks[1],
        "Description",
        edit,
        FormField::Description,
        app,
    );

    if let Some(error) = &edit.error {
        let line = Line::from(Span::styled(
            error.as_str(),
            theme::normal().fg(theme::ERROR),
        ));
        frame.render_widget(Paragraph::new(line), chunks[2]);
    }

    let help = Line::from(Span::styled(
        "Enter: save | Tab: field | Esc: cancel",
        theme::dimmed(),
    ));
    frame.render_widget(Paragraph::new(help), chunks[3]);
}

/// Render one draft field with an inline cursor when active.
fn render_field(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    edit: &EditState,
    field: FormField,
    app: &App,
) {
    let value = match field {
        FormField::Title => &edit.draft.title,
        FormField::Description => &edit.draft.description,
    };
    let is_active = edit.field == field;

    let mut display_text = value.clone();
    if is_active {
        let at = crate::app::byte_index(value, app.cursor_position);
        display_text.insert(at, '█');
    }

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(if is_active {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(display_text, theme::normal()))).block(block),
        area,
    );
}

/// A `width`% wide, `height`-row rectangle centered in `area`.
fn centered_rect(area: Rect, width_percent: u16, height: u16) -> Rect {
    let width = area.width * width_percent / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height: height.min(area.height),
    }
}
