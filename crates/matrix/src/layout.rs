//! Placing tasks on the grid and reading positions back.
//!
//! Everything here is a pure function of the task list and the measured
//! [`GridRect`]; the caller re-runs [`render_all`] whenever either changes.

use eisen_protocol::{Coordinate, Task, TaskId};
use tracing::debug;

use crate::error::Result;
use crate::geometry::{GridRect, Point};
use crate::visual::{TaskColor, color_for, label_for};

/// Where and how to draw one task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// The task being drawn.
    pub task_id: TaskId,
    /// Centre of the task's cell.
    pub position: Point,
    /// Chip colour.
    pub color: TaskColor,
    /// Chip glyph.
    pub label: char,
}

/// Lays out every incomplete task.
///
/// Completed tasks are skipped. The output follows the input order, which is
/// also the stacking order: later placements are drawn on top.
///
/// # Errors
///
/// Returns [`MatrixError::EmptyTitle`](crate::MatrixError::EmptyTitle) if an
/// incomplete task has an empty title.
///
/// # Examples
///
/// ```
/// use eisen_matrix::{GridRect, render_all};
/// use eisen_protocol::{Importance, Task, Urgency};
///
/// let mut done = Task::new(2, "Done", Urgency::MIN, Importance::MIN);
/// done.completed = true;
/// let tasks = vec![Task::new(1, "Open", Urgency::MAX, Importance::MAX), done];
///
/// let placements = render_all(&tasks, GridRect::new(600.0, 300.0).unwrap()).unwrap();
/// assert_eq!(placements.len(), 1);
/// assert_eq!(placements[0].label, 'O');
/// assert_eq!(placements[0].color.to_string(), "#ff4444ff");
/// ```
pub fn render_all(tasks: &[Task], rect: GridRect) -> Result<Vec<Placement>> {
    tasks
        .iter()
        .filter(|task| !task.completed)
        .map(|task| render_task(task, rect))
        .collect()
}

/// Lays out a single task, completed or not.
///
/// # Errors
///
/// Returns [`MatrixError::EmptyTitle`](crate::MatrixError::EmptyTitle) if the
/// task has an empty title.
pub fn render_task(task: &Task, rect: GridRect) -> Result<Placement> {
    Ok(Placement {
        task_id: task.id,
        position: rect.coordinate_to_position(task.coordinate()),
        color: color_for(task.importance, task.urgency),
        label: label_for(task)?,
    })
}

/// Returns the coordinate a dragged task was dropped on.
///
/// The task list is not touched; persisting the new coordinate and
/// reconciling afterwards is up to the caller.
#[must_use]
pub fn drop_at(task_id: TaskId, point: Point, rect: GridRect) -> Coordinate {
    let coordinate = rect.position_to_coordinate(point);
    debug!(
        task_id,
        x = point.x,
        y = point.y,
        urgency = coordinate.urgency.value(),
        importance = coordinate.importance.value(),
        "task dropped"
    );
    coordinate
}

/// Returns the coordinate used to pre-fill a new task created at `point`.
#[must_use]
pub fn add_at(point: Point, rect: GridRect) -> Coordinate {
    rect.position_to_coordinate(point)
}
