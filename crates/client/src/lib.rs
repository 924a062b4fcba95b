//! Task store client for eisen.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`HttpTaskStore`]: a cookie-session client for the task store's REST API
//! - [`MemoryStore`]: an in-process store used for demo mode and tests
//! - [`TaskStore`]: either of the above behind one set of methods
//! - [`Error`]: error types for store operations
//!
//! # Authentication
//!
//! The REST API authenticates with a session cookie. Call
//! [`HttpTaskStore::login`] once; the cookie is kept by the client and sent
//! with every later request. A request made without a valid session fails
//! with [`Error::Unauthorized`].
//!
//! Passwords are passed as [`secrecy::SecretString`] to keep them out of
//! logs.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use eisen_client::{HttpTaskStore, TaskStore};
//! use secrecy::SecretString;
//!
//! # async fn example() -> eisen_client::Result<()> {
//! let http = HttpTaskStore::new("http://localhost:5000", Duration::from_secs(15))?;
//! http.login("ada", &SecretString::from("hunter2")).await?;
//!
//! let store = TaskStore::from(http);
//! for task in store.list_tasks().await? {
//!     println!("{} ({}, {})", task.title, task.urgency, task.importance);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod http;
mod memory;
mod store;

pub use error::{Error, Result};
pub use http::{Account, HttpTaskStore};
pub use memory::MemoryStore;
pub use store::TaskStore;
