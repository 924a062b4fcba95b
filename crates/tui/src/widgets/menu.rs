//! Context menu and delete confirmation.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::centered_rect;
use crate::interaction::MenuAction;

/// The width of the context menu.
const MENU_WIDTH: u16 = 14;

/// The size of the delete prompt.
const CONFIRM_WIDTH: u16 = 44;
const CONFIRM_HEIGHT: u16 = 7;

/// Returns where the menu for a chip at `anchor` is drawn.
///
/// The menu opens below and to the right of the chip and is pushed back
/// inside `area` near the edges.
#[must_use]
pub fn menu_area(anchor: (u16, u16), area: Rect) -> Rect {
    let width = MENU_WIDTH.min(area.width);
    let height = (MenuAction::ALL.len() as u16 + 2).min(area.height);
    let (column, row) = anchor;
    let x = (column + 2)
        .min(area.right().saturating_sub(width))
        .max(area.left());
    let y = (row + 1)
        .min(area.bottom().saturating_sub(height))
        .max(area.top());
    Rect::new(x, y, width, height)
}

/// Returns the index of the menu entry under a terminal cell.
#[must_use]
pub fn menu_entry_at(menu: Rect, column: u16, row: u16) -> Option<usize> {
    let inner = Block::default().borders(Borders::ALL).inner(menu);
    if !inner.contains(Position::new(column, row)) {
        return None;
    }
    let index = usize::from(row - inner.y);
    (index < MenuAction::ALL.len()).then_some(index)
}

/// Renders the context menu with entry `selected` highlighted.
pub fn render_context_menu(selected: usize, menu: Rect, buf: &mut Buffer) {
    Clear.render(menu, buf);

    let lines: Vec<Line<'static>> = MenuAction::ALL
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let style = if index == selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if *action == MenuAction::Delete {
                Style::default().fg(Color::LightRed)
            } else {
                Style::default().fg(Color::White)
            };
            let width = usize::from(MENU_WIDTH.saturating_sub(2));
            Line::from(Span::styled(
                format!(" {:<w$}", action.label(), w = width - 1),
                style,
            ))
        })
        .collect();

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .render(menu, buf);
}

/// Renders the "delete this task?" prompt centred in `area`.
pub fn render_confirm_delete(title: &str, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(CONFIRM_WIDTH, CONFIRM_HEIGHT, area);
    Clear.render(popup, buf);

    let key_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::White);
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Delete ", text_style),
            Span::styled(
                format!("\"{title}\""),
                text_style.add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", text_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y", key_style),
            Span::styled(" Yes    ", text_style),
            Span::styled("n", key_style),
            Span::styled(" No", text_style),
        ]),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(
                    " Delete task ",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::LightRed)),
        )
        .render(popup, buf);
}
