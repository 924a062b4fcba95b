//! Configuration file reading and writing.
//!
//! Files are read as JSON5 (which accepts plain JSON too) and written as
//! pretty-printed JSON, since `serde_json5` cannot serialize.
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./eisen.json5` or `./eisen.json`
//! 2. User: `~/.config/eisen/config.json5` or `~/.config/eisen/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Local configuration file names, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["eisen.json5", "eisen.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "eisen";

/// User configuration file names, in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Lists every path a configuration file may live at, highest priority first.
///
/// `local_dir` is usually the working directory and `user_dir` the
/// application's user config directory, if one could be determined.
#[must_use]
pub fn config_file_candidates(local_dir: &Path, user_dir: Option<&Path>) -> Vec<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));
    local.chain(user).collect()
}

/// Finds the first existing configuration file.
///
/// # Examples
///
/// ```no_run
/// use eisen_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let user_dir = user_config_dir().ok();
    config_file_candidates(Path::new("."), user_dir.as_deref())
        .into_iter()
        .find(|path| path.exists())
}

/// Returns the user configuration directory, typically `~/.config/eisen/`.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the path new user configuration is written to.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_user_config_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join(USER_FILE_NAMES[0]))
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed into `T`.
///
/// # Examples
///
/// ```no_run
/// use eisen_config::Config;
/// use eisen_config::persistence::read_config_file;
///
/// # fn main() -> eisen_config::Result<()> {
/// let config: Config = read_config_file("eisen.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a configuration file as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the file (or one of
/// its parent directories) cannot be written.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_error)
}
