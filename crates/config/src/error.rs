//! Error types for configuration operations.

use std::path::PathBuf;

/// Errors raised while loading, validating or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    ReadFile {
        /// File that was being read.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A config file or its directory could not be written.
    #[error("cannot write {}: {source}", path.display())]
    WriteFile {
        /// File that was being written.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON5 or does not match the expected shape.
    #[error("malformed config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// The configuration could not be encoded for saving.
    #[error("cannot encode config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// The task store URL is not an HTTP(S) URL.
    #[error("invalid server url {0:?}: expected http:// or https://")]
    InvalidServerUrl(String),

    /// The request timeout is out of range.
    #[error("invalid request timeout: {reason}")]
    InvalidTimeout {
        /// What is wrong with it.
        reason: String,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for environment variable {name}")]
    InvalidEnvVar {
        /// The variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },

    /// The platform has no per-user config directory.
    #[error("no user config directory on this platform")]
    NoHomeDirectory,
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
