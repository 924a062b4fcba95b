//! Shared protocol types for the eisen application.
//!
//! This crate defines the core types used across all eisen components:
//! tasks and their matrix coordinates, the request bodies and statistics
//! exchanged with the task store, TUI messages, and error types.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`coordinate`]: The clamped `Urgency` / `Importance` axes and `Coordinate`
//! - [`category`]: The fixed set of task categories
//! - [`task`]: The `Task` record, `TaskDraft` and `TaskPatch` request bodies
//! - [`stats`]: Profile page statistics
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Moving a task the way a drag-and-drop does:
//!
//! ```
//! use eisen_protocol::{Coordinate, Importance, Task, TaskPatch, Urgency};
//!
//! let mut task = Task::new(1, "Write report", Urgency::MIN, Importance::MIN);
//!
//! // Out-of-range values are clamped on the way in.
//! let target = Coordinate::clamped(15, 4);
//! TaskPatch::position(target).apply_to(&mut task);
//!
//! assert_eq!(task.urgency, Urgency::MAX);
//! assert_eq!(task.importance, Importance::CENTER);
//! ```

pub mod category;
pub mod coordinate;
pub mod dummy;
pub mod error;
pub mod message;
pub mod stats;
pub mod task;

// Re-export primary types at crate root for convenience
pub use category::{Category, category_name};
pub use coordinate::{Coordinate, Importance, URGENCY_LABELS, Urgency};
pub use error::{ProtocolError, Result};
pub use message::{Message, PointerButton};
pub use stats::{CategoryStats, UserStats, UserTasks};
pub use task::{Task, TaskDraft, TaskId, TaskPatch};
