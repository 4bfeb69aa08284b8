//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};
use crate::tasks::Severity;

/// Render the status bar at the bottom of the screen.
///
/// The notice, when visible, takes over the bar; otherwise the bar
/// shows the sort key, the loading indicator, and key help.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(notice) = &app.notice {
        let color = match notice.severity {
            Severity::Success => theme::SUCCESS,
            Severity::Error => theme::ERROR,
        };
        let line = Line::from(vec![
            Span::styled("● ", theme::notice(color)),
            Span::styled(notice.message.as_str(), theme::notice(color)),
            Span::raw("  "),
            Span::styled("Esc: dismiss", theme::dimmed()),
        ]);
        frame.render_widget(Paragraph::new(line).style(theme::status_bar_bg()), area);
        return;
    }

    let help_text = if app.edit.is_some() {
        "Enter: save | Tab: field | Esc: cancel"
    } else {
        match app.focus {
            PanelFocus::Form => "Enter: add task | Tab: switch | Esc: quit",
            PanelFocus::Tasks => {
                "Enter: toggle | p: pin | e: edit | d: delete | s: sort | r: reload | Esc: quit"
            }
        }
    };

    let mut spans = vec![
        Span::styled("TaskDeck", theme::bold()),
        Span::raw(" | "),
        Span::raw(format!("sort: {}", app.sort_key.label())),
    ];
    if app.loading {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("loading…", theme::normal().fg(theme::LOADING)));
    }
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(help_text, theme::dimmed()));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(theme::status_bar_bg()),
        area,
    );
}
