//! Error types for the eisen-matrix crate.

use eisen_protocol::TaskId;
use thiserror::Error;

/// Errors that can occur while laying out the matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// The grid rectangle has not been measured yet, or is collapsed.
    #[error("grid rectangle must have positive, finite size (got {width} x {height})")]
    DegenerateRect {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// A task reached the layout engine with an empty title.
    #[error("task {0} has an empty title and cannot be labelled")]
    EmptyTitle(TaskId),
}

/// A specialized Result type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
