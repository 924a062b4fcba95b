//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the eisen application.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::server::ServerConfig;
use crate::ui::UiConfig;

/// Environment variable overriding [`ServerConfig::url`].
pub const ENV_SERVER_URL: &str = "EISEN_SERVER_URL";
/// Environment variable overriding [`ServerConfig::username`].
pub const ENV_USERNAME: &str = "EISEN_USERNAME";
/// Environment variable overriding [`ServerConfig::password`].
pub const ENV_PASSWORD: &str = "EISEN_PASSWORD";
/// Environment variable overriding [`ServerConfig::timeout_secs`].
pub const ENV_TIMEOUT_SECS: &str = "EISEN_TIMEOUT_SECS";

/// The main configuration struct for the eisen application.
///
/// # Examples
///
/// ```
/// use eisen_config::{Config, ServerConfig};
///
/// // No server configured: demo mode.
/// let config = Config::default();
/// assert!(config.server.is_demo());
///
/// let config = Config {
///     server: ServerConfig::with_url("http://localhost:5000"),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Task store connection.
    #[serde(default)]
    pub server: ServerConfig,

    /// Display preferences.
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations and the
    /// environment.
    ///
    /// Environment variables take precedence over file values. If no
    /// configuration file exists, defaults are used as the base.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be read
    /// or parsed, if an environment override is malformed, or if the result
    /// fails validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use eisen_config::Config;
    ///
    /// # fn example() -> eisen_config::Result<()> {
    /// let config = Config::load()?;
    /// if config.server.is_demo() {
    ///     println!("no server configured, using demo data");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => read_config_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it fails
    /// validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file. The password is never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Overrides server settings from environment-style variables.
    ///
    /// `lookup` returns the value of a variable, if set. Empty values are
    /// treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if the timeout override is not
    /// a whole number.
    ///
    /// # Examples
    ///
    /// ```
    /// use eisen_config::Config;
    ///
    /// let mut config = Config::default();
    /// config
    ///     .apply_env_overrides(|name| match name {
    ///         "EISEN_SERVER_URL" => Some("http://localhost:5000".to_string()),
    ///         _ => None,
    ///     })
    ///     .unwrap();
    /// assert_eq!(config.server.url.as_deref(), Some("http://localhost:5000"));
    /// ```
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = get(ENV_SERVER_URL) {
            self.server.url = Some(url);
        }
        if let Some(username) = get(ENV_USERNAME) {
            self.server.username = Some(username);
        }
        if let Some(password) = get(ENV_PASSWORD) {
            self.server.password = Some(password);
        }
        if let Some(value) = get(ENV_TIMEOUT_SECS) {
            self.server.timeout_secs =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnvVar {
                        name: ENV_TIMEOUT_SECS,
                        value,
                    })?;
        }
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any section is invalid.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()
    }
}
