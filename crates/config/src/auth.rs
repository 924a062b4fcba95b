//! Credential resolution for the task store.
//!
//! The task store uses a session cookie obtained by posting a username and
//! password to its login endpoint. Both must be configured for eisen to log
//! in; otherwise the session starts unauthenticated and the store decides
//! what to allow.

use secrecy::SecretString;

use crate::server::ServerConfig;

/// A username and password pair.
///
/// The password is kept in a [`SecretString`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: SecretString,
}

/// Resolves login credentials from the server configuration.
///
/// Returns `None` unless both a username and a password are set. Surrounding
/// whitespace in the username is ignored.
///
/// # Examples
///
/// ```
/// use eisen_config::{ServerConfig, auth::resolve_credentials};
/// use secrecy::ExposeSecret;
///
/// let mut server = ServerConfig::with_url("http://localhost:5000");
/// assert!(resolve_credentials(&server).is_none());
///
/// server.username = Some("ada".to_string());
/// server.password = Some("hunter2".to_string());
/// let credentials = resolve_credentials(&server).unwrap();
/// assert_eq!(credentials.username, "ada");
/// assert_eq!(credentials.password.expose_secret(), "hunter2");
/// ```
#[must_use]
pub fn resolve_credentials(server: &ServerConfig) -> Option<Credentials> {
    let username = server.username.as_deref().map(str::trim)?;
    let password = server.password.as_deref()?;
    if username.is_empty() || password.is_empty() {
        return None;
    }
    Some(Credentials {
        username: username.to_string(),
        password: SecretString::from(password.to_string()),
    })
}

/// Returns `true` if the configuration can log in.
#[must_use]
pub fn has_credentials(server: &ServerConfig) -> bool {
    resolve_credentials(server).is_some()
}
