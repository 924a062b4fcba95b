//! Widget components for the eisen TUI.
//!
//! Each widget is a pure function that renders state into a buffer, which
//! keeps them easy to test and compose.
//!
//! # Modules
//!
//! - [`matrix`]: the priority matrix, its chips and the hit test
//! - [`task_form`]: the add / edit form
//! - [`menu`]: the per-task context menu and the delete prompt
//! - [`profile`]: statistics and task history
//! - [`help`]: the keybinding overlay
//! - [`status_bar`]: notifications and hints
//!
//! # Colour Coding
//!
//! A chip's hue comes from the task's importance and its opacity from the
//! urgency, composited over the configured terminal background:
//!
//! | Importance | Colour |
//! |------------|--------|
//! | 1★ | `#4444ff` |
//! | 4★ | `#88cc00` |
//! | 7★ | `#ff4444` |
//!
//! # Example
//!
//! ```
//! use eisen_matrix::Rgb;
//! use eisen_protocol::dummy::demo_tasks;
//! use eisen_tui::{AppState, widgets};
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//!
//! let mut state = AppState::new("demo data");
//! state.replace_tasks(demo_tasks());
//!
//! let area = Rect::new(0, 0, 80, 24);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_matrix(&state, Rgb::default(), area, &mut buf);
//! ```

use ratatui::layout::Rect;

pub mod help;
pub mod matrix;
pub mod menu;
pub mod profile;
pub mod status_bar;
pub mod task_form;

pub use help::render_help_overlay;
pub use matrix::{
    Chip, MatrixAreas, cell_for_point, chip_for, chips, grid_rect_for, is_over_grid,
    matrix_areas, point_for_cell, render_matrix, task_at,
};
pub use menu::{menu_area, menu_entry_at, render_confirm_delete, render_context_menu};
pub use profile::{format_relative, render_profile};
pub use status_bar::render_status_bar;
pub use task_form::render_task_form;

/// Creates a centered rectangle within a given area.
///
/// If the requested dimensions exceed the available area, the rectangle
/// will be clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}
