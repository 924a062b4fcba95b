//! Status bar rendering widget.
//!
//! The bottom line shows the latest notification, or keybinding hints when
//! there is none. The right side counts open and completed tasks.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::state::{AppState, Notification};

/// Renders the status bar.
///
/// # Layout
///
/// ```text
///  Task moved                                       6 open · 2 done
///  n New  p Profile  r Reload  ? Help  Ctrl+C Quit  6 open · 2 done
/// ```
pub fn render_status_bar(state: &AppState, show_completed: bool, area: Rect, buf: &mut Buffer) {
    let left = match &state.notification {
        Some(notification) => notification_line(notification),
        None => hints_line(),
    };
    Paragraph::new(left).render(area, buf);

    let open = state.open_tasks().count();
    let counts = if show_completed {
        format!("{open} open · {} done ", state.completed_count())
    } else {
        format!("{open} open ")
    };
    Paragraph::new(Span::styled(counts, Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Right)
        .render(area, buf);
}

fn notification_line(notification: &Notification) -> Line<'_> {
    let color = if notification.is_error {
        Color::Red
    } else {
        Color::Cyan
    };
    Line::from(Span::styled(
        format!(" {}", notification.text),
        Style::default().fg(color),
    ))
}

fn hints_line() -> Line<'static> {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::White);
    Line::from(vec![
        Span::styled(" n", key_style),
        Span::styled(" New  ", text_style),
        Span::styled("p", key_style),
        Span::styled(" Profile  ", text_style),
        Span::styled("r", key_style),
        Span::styled(" Reload  ", text_style),
        Span::styled("?", key_style),
        Span::styled(" Help  ", text_style),
        Span::styled("Ctrl+C", key_style),
        Span::styled(" Quit", text_style),
    ])
}
