//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages. Which mapping applies depends on what is on
//! screen: the board, the task form, or a confirmation prompt.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use eisen_protocol::{Message, PointerButton};

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Which key mapping is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// The board, a page or the context menu.
    #[default]
    Board,
    /// The task form.
    Form,
    /// A yes/no prompt.
    Confirm,
}

/// Converts an event (keyboard, mouse or focus) to an application message.
///
/// Returns `Some(Message)` if the event maps to an action,
/// or `None` if the event is not handled.
#[must_use]
pub fn event_to_message(event: &Event, mode: InputMode) -> Option<Message> {
    match event {
        Event::Key(key) => match mode {
            InputMode::Board => key_to_message(*key),
            InputMode::Form => key_to_form_message(*key),
            InputMode::Confirm => key_to_confirm_message(*key),
        },
        Event::Mouse(mouse) => mouse_to_message(mouse),
        Event::FocusLost => Some(Message::PointerLeave),
        _ => None,
    }
}

/// Converts a mouse event to a pointer message.
///
/// Left presses start drags, right presses open the context menu. Motion is
/// reported with or without a button held; only the left release matters.
#[must_use]
pub fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::PointerDown {
            column,
            row,
            button: PointerButton::Primary,
        }),
        MouseEventKind::Down(MouseButton::Right) => Some(Message::PointerDown {
            column,
            row,
            button: PointerButton::Secondary,
        }),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(Message::PointerMove { column, row })
        }
        MouseEventKind::Up(MouseButton::Left) => Some(Message::PointerUp { column, row }),
        _ => None,
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Converts a key event on the board to an application message.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Esc` | Escape (cancel drag, close overlay, clear selection) |
/// | Arrow keys | Move selection between tasks |
/// | `Enter` or `Space` | Edit selected task / pick menu entry |
/// | `n` or `Ctrl+N` | New task at the matrix centre |
/// | `c` | Complete selected task |
/// | `d` or `Delete` | Delete selected task |
/// | `p` | Toggle profile page |
/// | `r` | Refresh |
/// | `?` | Toggle help |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(&key) {
        return Some(Message::Quit);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('n') {
        return Some(Message::NewTask);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),

        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Select),

        KeyCode::Char('n') => Some(Message::NewTask),
        KeyCode::Char('c') => Some(Message::CompleteSelected),
        KeyCode::Char('d') | KeyCode::Delete => Some(Message::DeleteSelected),
        KeyCode::Char('p') => Some(Message::TogglePage),
        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

/// Converts a key event to a task form message.
///
/// # Key Bindings (Form)
///
/// | Key | Action |
/// |-----|--------|
/// | `Tab` / `Down` | Next field |
/// | `Shift+Tab` / `Up` | Previous field |
/// | `Left` / `Right` | Step the focused choice field |
/// | `Enter` | Save |
/// | `Esc` | Discard |
/// | `Backspace` | Delete a character |
/// | Any char | Type into the focused text field |
#[must_use]
pub fn key_to_form_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(&key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Enter => Some(Message::FormSubmit),
        KeyCode::Tab | KeyCode::Down => Some(Message::FormNextField),
        KeyCode::BackTab | KeyCode::Up => Some(Message::FormPrevField),
        KeyCode::Left => Some(Message::FormAdjust { delta: -1 }),
        KeyCode::Right => Some(Message::FormAdjust { delta: 1 }),
        KeyCode::Backspace => Some(Message::FormBackspace),
        KeyCode::Char(ch) => Some(Message::FormInput { ch }),
        _ => None,
    }
}

/// Converts a key event to a confirmation prompt message.
///
/// `y` or `Enter` confirms; `n` or `Esc` declines.
#[must_use]
pub fn key_to_confirm_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(&key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Message::Confirm),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Message::Escape),
        _ => None,
    }
}
