//! eisen - a terminal Eisenhower-matrix task board.
//!
//! This is the main binary: it loads the configuration, connects to the
//! task store (or the demo store when no server is configured) and runs
//! the TUI.

mod logging;

use anyhow::Context;
use eisen_client::{HttpTaskStore, MemoryStore, TaskStore};
use eisen_config::{Config, ServerConfig, auth::resolve_credentials};
use eisen_tui::{App, terminal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging is best effort; the board works without it.
    let _log_guard = match logging::init_logging() {
        Ok((_, guard)) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };

    let config = Config::load().context("failed to load configuration")?;
    let store = connect(&config.server).await?;

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::new(store, config.ui);
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}

/// Opens the configured task store, logging in when credentials are set.
async fn connect(server: &ServerConfig) -> anyhow::Result<TaskStore> {
    let Some(url) = server.base_url() else {
        info!("no server configured, using demo data");
        return Ok(TaskStore::from(MemoryStore::demo()));
    };

    let http = HttpTaskStore::new(url, server.timeout())?;
    match resolve_credentials(server) {
        Some(credentials) => {
            let account = http
                .login(&credentials.username, &credentials.password)
                .await
                .with_context(|| format!("failed to log in to {url}"))?;
            info!(username = %account.username, "logged in");
        }
        None => warn!(url, "no credentials configured, continuing without a session"),
    }
    Ok(TaskStore::from(http))
}
