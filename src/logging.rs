//! File logging.
//!
//! The terminal belongs to the UI, so log output goes to a timestamped file
//! under the platform data directory instead of stderr.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV: &str = "EISEN_LOG_LEVEL";

const DEFAULT_LEVEL: &str = "warn";

/// Installs the global subscriber writing to a new log file.
///
/// The returned guard flushes buffered lines when dropped; keep it alive
/// until the program exits.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or if the log file cannot be opened.
pub fn init_logging() -> anyhow::Result<(PathBuf, WorkerGuard)> {
    let log_dir = log_directory()?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("cannot create log directory {}", log_dir.display()))?;

    let log_file_path = log_file_path(&log_dir);
    let file = fs::File::create(&log_file_path)
        .with_context(|| format!("cannot create log file {}", log_file_path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(log_filter(std::env::var(LOG_LEVEL_ENV).ok().as_deref()))
        .with(file_layer)
        .init();

    tracing::info!(path = %log_file_path.display(), "logging initialized");
    Ok((log_file_path, guard))
}

/// Builds the filter for a raw level setting, falling back to `warn`.
fn log_filter(raw: Option<&str>) -> EnvFilter {
    let level = raw.and_then(normalize_log_level).unwrap_or(DEFAULT_LEVEL);
    EnvFilter::new(level)
}

fn normalize_log_level(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// Returns the directory log files are written to.
///
/// # Errors
///
/// Returns an error if the platform has no local data directory.
pub fn log_directory() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir().context("cannot determine the local data directory")?;
    Ok(data_dir.join("eisen").join("logs"))
}

fn log_file_path(log_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    log_dir.join(format!("eisen-{timestamp}.log"))
}
