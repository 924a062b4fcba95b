//! Geometry and layout for the eisen priority matrix.
//!
//! The matrix is a 13 × 7 grid of urgency (left to right) against importance
//! (bottom to top). This crate converts between positions on the rendered
//! grid and discrete coordinates, decides how each task looks, and lays out a
//! task list. It knows nothing about terminals: the caller measures the grid
//! and hands over a [`GridRect`].
//!
//! - [`geometry`]: `GridRect`, `Point`, and the two conversions
//! - [`visual`]: palette, opacity, and task glyphs
//! - [`layout`]: `render_all`, `drop_at`, `add_at`
//! - [`quadrant`]: the four labelled regions
//!
//! # Examples
//!
//! ```
//! use eisen_matrix::{GridRect, Point, drop_at, render_all};
//! use eisen_protocol::{Coordinate, Importance, Task, Urgency};
//!
//! let rect = GridRect::new(600.0, 300.0)?;
//! let tasks = vec![Task::new(1, "Taxes", Urgency::clamped(2), Importance::clamped(6))];
//!
//! let placements = render_all(&tasks, rect)?;
//! assert_eq!(placements[0].position, Point::new(125.0, 75.0));
//!
//! // Dragging the chip to the far bottom-right corner and letting go.
//! let target = drop_at(1, Point::new(1000.0, 1000.0), rect);
//! assert_eq!(target, Coordinate::clamped(12, 1));
//! # Ok::<(), eisen_matrix::MatrixError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod layout;
pub mod quadrant;
pub mod visual;

pub use error::{MatrixError, Result};
pub use geometry::{AxisLines, GridRect, IMPORTANCE_CELLS, Point, URGENCY_CELLS, axis_lines};
pub use layout::{Placement, add_at, drop_at, render_all, render_task};
pub use quadrant::Quadrant;
pub use visual::{
    MIN_OPACITY, PALETTE, Rgb, TaskColor, color_for, label_for, opacity_for, palette_color,
};
