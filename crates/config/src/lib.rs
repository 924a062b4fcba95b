//! Configuration management for the eisen application.
//!
//! This crate handles loading, validating, and persisting configuration
//! from multiple sources (files, environment variables, defaults).
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct, loading, and environment overrides
//! - [`server`]: Task store URL, credentials, and request timeout
//! - [`ui`]: Display preferences
//! - [`auth`]: Login credential resolution
//! - [`persistence`]: Config file reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Environment variables (`EISEN_SERVER_URL`, `EISEN_USERNAME`,
//!    `EISEN_PASSWORD`, `EISEN_TIMEOUT_SECS`)
//! 2. Local config (`./eisen.json5` or `./eisen.json`)
//! 3. User config (`~/.config/eisen/config.json5` or `~/.config/eisen/config.json`)
//! 4. Built-in defaults
//!
//! Without a server URL, eisen runs in demo mode on an in-memory store.
//!
//! ```json5
//! {
//!   server: {
//!     url: "http://localhost:5000",
//!     username: "ada",
//!     // prefer EISEN_PASSWORD over storing this here
//!     password: "hunter2",
//!     timeout_secs: 15,
//!   },
//!   ui: { background: [0, 0, 0] },
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod persistence;
pub mod server;
pub mod ui;

// Re-export primary types at crate root for convenience
pub use auth::Credentials;
pub use config::Config;
pub use error::{ConfigError, Result};
pub use server::ServerConfig;
pub use ui::UiConfig;
