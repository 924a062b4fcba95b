//! Terminal UI for the eisen priority matrix.
//!
//! This crate provides a Ratatui-based interface that places tasks on an
//! urgency × importance grid and lets the user drag them between cells.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`state`]: Application state management
//! - [`interaction`]: The drag, hover and modal state machine
//! - [`form`]: The add / edit task form
//! - [`request`]: Store requests and their results
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//! - [`layout`]: Screen regions and size limits
//! - [`widgets`]: Rendering
//!
//! # Example
//!
//! ```no_run
//! use eisen_client::{MemoryStore, TaskStore};
//! use eisen_config::UiConfig;
//! use eisen_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let store = TaskStore::Memory(MemoryStore::demo());
//!     let mut app = App::new(store, UiConfig::default());
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod event;
pub mod form;
pub mod interaction;
pub mod layout;
pub mod request;
pub mod state;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use interaction::{DragState, InteractionController, Modal};
pub use state::{AppState, Notification, Page};
