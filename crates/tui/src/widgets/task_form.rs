//! Task form overlay.
//!
//! Renders a [`TaskForm`] as a centred popup. Text fields show a cursor when
//! focused; choice fields show `◀ value ▶` so it is clear the arrows change
//! them.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::centered_rect;
use crate::form::{FormField, TaskForm};

/// The width of the form popup.
const FORM_WIDTH: u16 = 56;

/// The height of the form popup.
const FORM_HEIGHT: u16 = 13;

/// Width of the label column, e.g. `"  Importance   "`.
const LABEL_WIDTH: usize = 15;

/// Renders the task form centred in `area`.
///
/// # Layout
///
/// ```text
/// ╭ New task ──────────────────────────────────────────╮
/// │                                                    │
/// │  Title          Call the plumber_                  │
/// │  Description                                       │
/// │  Category       ◀ Personal ▶                       │
/// │  Importance     ◀ 5★ ▶                             │
/// │  Urgency        ◀ 1 day ▶                          │
/// │                                                    │
/// │  Title cannot be empty                             │
/// │                                                    │
/// │  Tab next field  ←→ change  Enter save  Esc cancel │
/// ╰────────────────────────────────────────────────────╯
/// ```
pub fn render_task_form(form: &TaskForm, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(FORM_WIDTH, FORM_HEIGHT, area);
    Clear.render(popup, buf);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", form.heading()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    Paragraph::new(build_form_lines(form))
        .block(block)
        .render(popup, buf);
}

fn field_value(form: &TaskForm, field: FormField) -> String {
    match field {
        FormField::Title => form.title.clone(),
        FormField::Description => form.description.clone(),
        FormField::Category => form.category.display_name().to_string(),
        FormField::Importance => form.importance.label(),
        FormField::Urgency => form.urgency.label().to_string(),
    }
}

fn field_line(form: &TaskForm, field: FormField) -> Line<'static> {
    let focused = form.field == field;
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value_style = Style::default().fg(Color::White);
    let value = field_value(form, field);

    let mut spans = vec![Span::styled(
        format!("  {:<width$}", field.label(), width = LABEL_WIDTH - 2),
        label_style,
    )];
    if field.is_text() {
        spans.push(Span::styled(value, value_style));
        if focused {
            spans.push(Span::styled(
                "_",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }
    } else {
        let arrow_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled("◀ ", arrow_style));
        spans.push(Span::styled(value, value_style));
        spans.push(Span::styled(" ▶", arrow_style));
    }
    Line::from(spans)
}

fn build_form_lines(form: &TaskForm) -> Vec<Line<'static>> {
    let key_style = Style::default().fg(Color::Green);
    let hint_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![Line::from("")];
    lines.extend(FormField::all().into_iter().map(|f| field_line(form, f)));
    lines.push(Line::from(""));
    lines.push(match &form.error {
        Some(error) => Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    });
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Tab", key_style),
        Span::styled(" next field  ", hint_style),
        Span::styled("←→", key_style),
        Span::styled(" change  ", hint_style),
        Span::styled("Enter", key_style),
        Span::styled(" save  ", hint_style),
        Span::styled("Esc", key_style),
        Span::styled(" cancel", hint_style),
    ]));
    lines
}

#[cfg(test)]
mod tests {
    use eisen_protocol::{Category, Coordinate, Importance, Task, Urgency};

    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(form: &TaskForm) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render_task_form(form, area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn new_form_shows_heading_and_prefilled_position() {
        let form = TaskForm::new_at(Coordinate::clamped(6, 5));
        let content = render(&form);
        assert!(content.contains("New task"));
        assert!(content.contains("◀ 5★ ▶"));
        assert!(content.contains("◀ 1 day ▶"));
        assert!(content.contains("◀ Other ▶"));
    }

    #[test]
    fn edit_form_shows_task_values() {
        let mut task = Task::new(3, "Book dentist", Urgency::clamped(7), Importance::clamped(5));
        task.category = Some(Category::Health);
        let content = render(&TaskForm::edit(&task));
        assert!(content.contains("Edit task"));
        assert!(content.contains("Book dentist_"));
        assert!(content.contains("◀ Health ▶"));
        assert!(content.contains("◀ 10 hours ▶"));
    }

    #[test]
    fn validation_error_is_shown() {
        let mut form = TaskForm::new_at(Coordinate::CENTER);
        assert!(form.submit().is_none());
        assert!(render(&form).contains("Title cannot be empty"));
    }

    #[test]
    fn labels_line_up() {
        let form = TaskForm::new_at(Coordinate::CENTER);
        let line = field_line(&form, FormField::Importance);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "  Importance   ◀ 4★ ▶");
    }

    #[test]
    fn small_area_does_not_panic() {
        let form = TaskForm::new_at(Coordinate::CENTER);
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        render_task_form(&form, area, &mut buf);
    }
}
