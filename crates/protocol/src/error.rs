//! Error types for the eisen-protocol crate.

use thiserror::Error;

/// Errors raised when a task breaks an invariant the board relies on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The title is empty or only whitespace, so the task has no label.
    #[error("task title cannot be empty")]
    InvalidTaskTitle,
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
