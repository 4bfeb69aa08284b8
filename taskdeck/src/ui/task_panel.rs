//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use taskdeck_proto::task::Task;

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the task list panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Tasks && app.edit.is_none();

    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .enumerate()
        .map(|(i, task)| task_item(task, is_focused && i == app.selected, app))
        .collect();

    let title = format!("Tasks ({})", app.tasks.len());
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::TASKS_TITLE)))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(List::new(items).block(block), area);
}

/// Build one task line: checkbox, pin marker, title, timestamp.
fn task_item<'a>(task: &'a Task, is_selected: bool, app: &App) -> ListItem<'a> {
    let checkbox = if task.status { "[✓]" } else { "[ ]" };
    let text_style = if is_selected {
        theme::selected()
    } else if task.status {
        theme::dimmed()
    } else {
        theme::normal()
    };

    let mut spans = vec![Span::styled(checkbox, text_style), Span::raw(" ")];
    if task.pinned {
        spans.push(Span::styled("●", theme::normal().fg(theme::PIN)));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(&task.title, text_style));
    if !task.description.is_empty() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled("·", theme::dimmed()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(&task.description, theme::dimmed()));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(created_label(task, app), theme::timestamp()));

    ListItem::new(Line::from(spans))
}

/// Format the creation timestamp in local time.
fn created_label(task: &Task, app: &App) -> String {
    let millis = i64::try_from(task.created_at).unwrap_or(0);
    chrono::DateTime::from_timestamp_millis(millis).map_or_else(String::new, |dt| {
        dt.with_timezone(&chrono::Local)
            .format(&app.timestamp_format)
            .to_string()
    })
}
