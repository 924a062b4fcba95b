//! Pointer gestures over the matrix.
//!
//! [`InteractionController`] owns the transient interaction state: the drag
//! in progress, the last pointer position over the grid (where the "+"
//! marker is drawn), and the open modal. All positions are grid-relative
//! [`Point`]s; turning terminal cells into points is the caller's job.
//!
//! A drag is a small state machine:
//!
//! ```text
//!          pointer_down on a task          pointer_move
//!   Idle ─────────────────────────▶ Dragging ◀──────┐
//!    ▲                                 │  └─────────┘
//!    └──── pointer_up / cancel_drag ───┘
//! ```
//!
//! Only one drag runs at a time; a second press while dragging is ignored.

use eisen_matrix::{GridRect, Point, drop_at};
use eisen_protocol::{Coordinate, TaskId};

use crate::form::{FormTarget, TaskForm};

/// The drag gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A task follows the pointer.
    Dragging {
        /// The task being dragged.
        task_id: TaskId,
        /// Where the pointer is now. Not snapped to a cell.
        pointer: Point,
    },
}

/// A finished drag: the task and the cell it was dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropRequest {
    /// The dragged task.
    pub task_id: TaskId,
    /// The coordinate to persist.
    pub coordinate: Coordinate,
}

/// What a primary press did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Press {
    /// A drag started on this task.
    StartedDrag(TaskId),
    /// The press landed on empty grid space; a task may be added there.
    AddAt(Point),
    /// Nothing happened: a drag or a modal was already active.
    Ignored,
}

/// Entries of the task context menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Open the edit form.
    Edit,
    /// Mark the task completed.
    Complete,
    /// Ask to delete the task.
    Delete,
}

impl MenuAction {
    /// All entries in display order.
    pub const ALL: [Self; 3] = [Self::Edit, Self::Complete, Self::Delete];

    /// Returns the entry label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Complete => "Complete",
            Self::Delete => "Delete",
        }
    }
}

/// The modal currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// The add or edit form.
    TaskForm(TaskForm),
    /// The per-task context menu.
    ContextMenu {
        /// Task the menu acts on.
        task_id: TaskId,
        /// Highlighted entry, an index into [`MenuAction::ALL`].
        selected: usize,
    },
    /// "Delete this task?" prompt.
    ConfirmDelete {
        /// Task to delete.
        task_id: TaskId,
    },
}

impl Modal {
    /// Opens a context menu with the first entry highlighted.
    #[must_use]
    pub const fn context_menu(task_id: TaskId) -> Self {
        Self::ContextMenu {
            task_id,
            selected: 0,
        }
    }

    /// Returns the task this modal is about, if any.
    #[must_use]
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::TaskForm(form) => match form.target {
                FormTarget::Edit(id) => Some(id),
                FormTarget::New => None,
            },
            Self::ContextMenu { task_id, .. } | Self::ConfirmDelete { task_id } => Some(*task_id),
        }
    }
}

/// Owner of all transient pointer and modal state.
///
/// # Examples
///
/// ```
/// use eisen_matrix::{GridRect, Point};
/// use eisen_protocol::Coordinate;
/// use eisen_tui::interaction::{InteractionController, Press};
///
/// let rect = GridRect::new(600.0, 300.0).unwrap();
/// let mut controller = InteractionController::default();
///
/// let press = controller.pointer_down(Point::new(325.0, 175.0), Some(7));
/// assert_eq!(press, Press::StartedDrag(7));
///
/// controller.pointer_move(Point::new(620.0, 20.0), true);
/// let dropped = controller.pointer_up(Point::new(620.0, 20.0), rect).unwrap();
/// assert_eq!(dropped.task_id, 7);
/// assert_eq!(dropped.coordinate, Coordinate::clamped(12, 7));
/// assert!(!controller.is_dragging());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionController {
    drag: DragState,
    hover: Option<Point>,
    modal: Option<Modal>,
}

impl InteractionController {
    /// Handles a primary press at `point`.
    ///
    /// `hit` is the task drawn under the pointer, if any.
    pub fn pointer_down(&mut self, point: Point, hit: Option<TaskId>) -> Press {
        if self.is_dragging() || self.modal.is_some() {
            return Press::Ignored;
        }
        match hit {
            Some(task_id) => {
                self.drag = DragState::Dragging {
                    task_id,
                    pointer: point,
                };
                Press::StartedDrag(task_id)
            }
            None => {
                self.hover = Some(point);
                Press::AddAt(point)
            }
        }
    }

    /// Handles pointer motion.
    ///
    /// While dragging, the dragged task follows the pointer wherever it
    /// goes. Otherwise the hover anchor tracks the pointer while it is over
    /// the grid and is hidden once it leaves.
    pub fn pointer_move(&mut self, point: Point, over_grid: bool) {
        match &mut self.drag {
            DragState::Dragging { pointer, .. } => *pointer = point,
            DragState::Idle => self.hover = over_grid.then_some(point),
        }
    }

    /// Handles a primary release, finishing the drag if one is active.
    ///
    /// The drag identity is cleared whatever happens to the returned request
    /// afterwards.
    pub fn pointer_up(&mut self, point: Point, rect: GridRect) -> Option<DropRequest> {
        let DragState::Dragging { task_id, .. } = std::mem::take(&mut self.drag) else {
            return None;
        };
        Some(DropRequest {
            task_id,
            coordinate: drop_at(task_id, point, rect),
        })
    }

    /// Handles the pointer leaving the application.
    ///
    /// Hides the hover anchor, unless a drag is in progress.
    pub fn pointer_leave(&mut self) {
        if !self.is_dragging() {
            self.hover = None;
        }
    }

    /// Abandons the current drag without dropping, e.g. when pointer
    /// capture is lost. Returns the task that was being dragged.
    pub fn cancel_drag(&mut self) -> Option<TaskId> {
        match std::mem::take(&mut self.drag) {
            DragState::Dragging { task_id, .. } => Some(task_id),
            DragState::Idle => None,
        }
    }

    /// Returns the current drag state.
    #[must_use]
    pub const fn drag(&self) -> DragState {
        self.drag
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Returns the task being dragged.
    #[must_use]
    pub const fn dragged_task(&self) -> Option<TaskId> {
        match self.drag {
            DragState::Dragging { task_id, .. } => Some(task_id),
            DragState::Idle => None,
        }
    }

    /// Returns the last pointer position over the grid, if shown.
    #[must_use]
    pub const fn hover_anchor(&self) -> Option<Point> {
        self.hover
    }

    /// Opens a modal, replacing any open one. Cancels an active drag.
    pub fn open_modal(&mut self, modal: Modal) {
        self.drag = DragState::Idle;
        self.modal = Some(modal);
    }

    /// Closes the open modal and returns it.
    pub fn close_modal(&mut self) -> Option<Modal> {
        self.modal.take()
    }

    /// Returns the open modal.
    #[must_use]
    pub const fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Returns the open modal for editing.
    pub fn modal_mut(&mut self) -> Option<&mut Modal> {
        self.modal.as_mut()
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_point()(x in -500.0f64..1500.0, y in -500.0f64..1000.0) -> Point {
            Point::new(x, y)
        }
    }

    proptest! {
        #[test]
        fn a_full_gesture_always_ends_idle(
            start in arb_point(),
            moves in prop::collection::vec(arb_point(), 0..20),
            end in arb_point(),
        ) {
            let rect = GridRect::new(600.0, 300.0).unwrap();
            let mut controller = InteractionController::default();
            controller.pointer_down(start, Some(1));
            for point in moves {
                controller.pointer_move(point, true);
            }
            let dropped = controller.pointer_up(end, rect);

            prop_assert!(!controller.is_dragging());
            prop_assert_eq!(dropped.map(|d| d.coordinate), Some(rect.position_to_coordinate(end)));
        }
    }
}
