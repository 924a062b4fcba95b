//! Task store connection settings.
//!
//! Leaving [`ServerConfig::url`] unset runs eisen in demo mode against an
//! in-memory store.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Shortest allowed request timeout in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Longest allowed request timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Where the task store lives and how to log in.
///
/// # Examples
///
/// ```
/// use eisen_config::ServerConfig;
///
/// let server = ServerConfig::default();
/// assert!(server.is_demo());
/// assert_eq!(server.timeout().as_secs(), 15);
///
/// let server = ServerConfig::with_url("http://localhost:5000");
/// assert!(!server.is_demo());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the task store, e.g. `http://localhost:5000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Account name used to log in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Account password. Read from files and the environment, never written.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            password: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Creates a configuration pointing at `url`, without credentials.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Returns `true` when no task store is configured.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.url.is_none()
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.url.as_deref().map(|url| url.trim_end_matches('/'))
    }

    /// Validates the URL scheme and the timeout range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidServerUrl`] for a non-HTTP URL and
    /// [`ConfigError::InvalidTimeout`] for a timeout outside `1..=300`.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidServerUrl(url.clone()));
            }
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::InvalidTimeout {
                reason: format!(
                    "{} seconds is outside {MIN_TIMEOUT_SECS}..={MAX_TIMEOUT_SECS}",
                    self.timeout_secs
                ),
            });
        }

        Ok(())
    }
}
