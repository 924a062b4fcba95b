//! Error types for task store operations.

use eisen_protocol::{ProtocolError, TaskId};

/// Errors that can occur while talking to a task store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured base URL could not be parsed.
    #[error("invalid task store url {url:?}: {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("unexpected response from task store: {0}")]
    Decode(#[from] serde_json::Error),

    /// The store answered with an error status.
    #[error("task store returned HTTP {status}{}", format_body(.body))]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, possibly empty.
        body: String,
    },

    /// The session is not logged in, or has expired.
    #[error("not logged in to the task store")]
    Unauthorized,

    /// The store refused the username or password.
    #[error("login rejected: {message}")]
    LoginRejected {
        /// The store's explanation.
        message: String,
    },

    /// The store answered `{"success": false}`.
    #[error("task store rejected the request{}", format_body(.message))]
    Rejected {
        /// The store's explanation, possibly empty.
        message: String,
    },

    /// No task with this id exists.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The request carried invalid task data.
    #[error(transparent)]
    InvalidTask(#[from] ProtocolError),
}

/// Formats an optional trailing detail for error messages.
fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// A specialized Result type for task store operations.
pub type Result<T> = std::result::Result<T, Error>;
