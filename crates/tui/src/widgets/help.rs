//! Help overlay widget.
//!
//! This module provides the help overlay that displays all available keybindings
//! when the user presses `?`.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::centered_rect;

/// The width of the help overlay panel.
const HELP_WIDTH: u16 = 44;

/// The height of the help overlay panel.
const HELP_HEIGHT: u16 = 26;

/// Renders a centered help overlay displaying all keybindings.
///
/// # Layout
///
/// ```text
/// ╭ Help ────────────────────────────────────╮
/// │                                          │
/// │  Mouse                                   │
/// │  Drag task        Move it to another cell│
/// │  Click empty      Add a task there       │
/// │  Right click      Edit, complete, delete │
/// │                                          │
/// │  Keyboard                                │
/// │  ←→↑↓             Select nearest task    │
/// │  ...                                     │
/// │                                          │
/// │  Press any key to close                  │
/// ╰──────────────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use eisen_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(area, &mut buf);
/// ```
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(HELP_WIDTH, HELP_HEIGHT, area);
    Clear.render(popup_area, buf);

    let help_block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightYellow));

    Paragraph::new(build_help_lines())
        .block(help_block)
        .alignment(Alignment::Left)
        .render(popup_area, buf);
}

fn binding(key: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<17}"), Style::default().fg(Color::Green)),
        Span::styled(text, Style::default().fg(Color::White)),
    ])
}

/// Builds the lines of help content.
fn build_help_lines() -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    vec![
        Line::from(""),
        Line::from(Span::styled("  Mouse", header_style)),
        binding("Drag task", "Move it to another cell"),
        binding("Click empty", "Add a task there"),
        binding("Right click", "Edit, complete, delete"),
        Line::from(""),
        Line::from(Span::styled("  Keyboard", header_style)),
        binding("←→↑↓", "Select nearest task"),
        binding("Enter", "Edit selected task"),
        binding("n", "New task at the centre"),
        binding("c", "Complete selected task"),
        binding("d", "Delete selected task"),
        binding("p", "Toggle profile page"),
        binding("r", "Reload tasks"),
        binding("Esc", "Cancel drag or close"),
        binding("Ctrl+C", "Quit"),
        binding("?", "Toggle help"),
        Line::from(""),
        Line::from(Span::styled("  Task form", header_style)),
        binding("Tab / Shift+Tab", "Next / previous field"),
        binding("←→", "Change choice field"),
        binding("Enter", "Save"),
        Line::from(Span::styled("  Press any key to close", hint_style)),
    ]
}
