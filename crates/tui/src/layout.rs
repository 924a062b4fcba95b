//! Centralized layout measurements for the TUI.
//!
//! Both rendering and pointer hit-testing split the screen with
//! [`screen_areas`], so a click always lands where the frame was drawn.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the header bar in rows.
///
/// The header displays the application title, the task source and the help
/// cue.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status line in rows.
pub const STATUS_HEIGHT: u16 = 1;

/// Minimum terminal height for useful rendering.
///
/// Below this height a "terminal too small" message is shown. The matrix
/// needs one row per importance level plus its border and urgency labels:
/// 3 (header) + 2 (borders) + 7 (grid) + 1 (labels) + 1 (status).
pub const MIN_HEIGHT: u16 = 14;

/// Minimum terminal width for useful rendering.
///
/// Leaves roughly two columns per urgency level once borders and the
/// importance labels are taken out.
pub const MIN_WIDTH: u16 = 40;

/// The three horizontal bands of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Title bar.
    pub header: Rect,
    /// Matrix or profile page.
    pub content: Rect,
    /// Notifications and key hints.
    pub status: Rect,
}

/// Splits the terminal area into header, content and status line.
#[must_use]
pub fn screen_areas(area: Rect) -> ScreenAreas {
    let [header, content, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);
    ScreenAreas {
        header,
        content,
        status,
    }
}

/// Returns `true` if the terminal is too small to draw the board.
#[must_use]
pub const fn is_too_small(area: Rect) -> bool {
    area.width < MIN_WIDTH || area.height < MIN_HEIGHT
}
