//! HTTP task store client.
//!
//! This module provides [`HttpTaskStore`], which talks to the task store's
//! JSON API. Authentication is a session cookie set by `POST /login` and
//! replayed from the client's cookie jar on every later request.

use std::time::Duration;

use eisen_protocol::{CategoryStats, Task, TaskDraft, TaskId, TaskPatch, UserStats, UserTasks};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url, redirect};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};

/// The account the session is logged in as.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// Account id.
    pub id: i64,
    /// Account name.
    pub username: String,
}

/// `{"success": bool, "message": "..."}` acknowledgement bodies.
#[derive(Debug, Deserialize)]
struct Ack {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// The body of a login response.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user: Option<Account>,
}

/// Client for a remote task store.
///
/// Cloning is cheap and clones share the connection pool and session cookie.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use eisen_client::HttpTaskStore;
/// use secrecy::SecretString;
///
/// # async fn example() -> eisen_client::Result<()> {
/// let store = HttpTaskStore::new("http://localhost:5000", Duration::from_secs(15))?;
/// store.login("ada", &SecretString::from("hunter2".to_string())).await?;
///
/// for task in store.list_tasks().await? {
///     println!("{} ({} / {})", task.title, task.urgency, task.importance);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    http: Client,
    base_url: Url,
}

impl HttpTaskStore {
    /// Creates a client for the store at `base_url`.
    ///
    /// Redirects are not followed: the store answers unauthenticated API
    /// calls with a redirect to its login page, which is reported as
    /// [`Error::Unauthorized`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `base_url` is not an absolute URL, or
    /// [`Error::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(&format!("{trimmed}/")).map_err(|e| Error::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a base url".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Returns the store's base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    /// Logs in and stores the session cookie.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LoginRejected`] if the store refuses the credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Account> {
        debug!("logging in");
        let body = serde_json::json!({
            "username": username,
            "password": password.expose_secret(),
        });
        let response = self.http.post(self.url("/login")?).json(&body).send().await?;

        let status = response.status();
        if !(status.is_success() || status == StatusCode::UNAUTHORIZED) {
            return Err(status_error(response).await);
        }

        let login: LoginResponse = decode(response).await?;
        match (login.success, login.user) {
            (true, Some(account)) => {
                debug!(account_id = account.id, "logged in");
                Ok(account)
            }
            (true, None) => Ok(Account {
                id: 0,
                username: username.to_string(),
            }),
            (false, _) => {
                warn!("login rejected");
                Err(Error::LoginRejected {
                    message: login.message.unwrap_or_else(|| "invalid credentials".to_string()),
                })
            }
        }
    }

    /// Fetches all of the user's tasks.
    ///
    /// Tasks missing a required field fail the whole request. Tasks with an
    /// empty title cannot be drawn and are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tasks: Vec<Task> = self.send(self.http.get(self.url("/api/tasks")?)).await?;
        let total = tasks.len();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| match task.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(task_id = task.id, error = %e, "dropping task");
                    false
                }
            })
            .collect();
        debug!(total, kept = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft's title is empty or the request fails.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        let draft = draft.clone().validated()?;
        let task: Task = self
            .send(self.http.post(self.url("/api/tasks")?).json(&draft))
            .await?;
        debug!(task_id = task.id, "created task");
        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the task does not exist, or another
    /// error if the request fails.
    #[instrument(skip(self, patch))]
    pub async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task> {
        let url = self.url(&format!("/api/tasks/{id}"))?;
        self.send(self.http.put(url).json(patch))
            .await
            .map_err(|e| not_found_as(e, id))
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the task does not exist, or another
    /// error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        let url = self.url(&format!("/api/tasks/{id}"))?;
        self.send_ack(self.http.delete(url))
            .await
            .map_err(|e| not_found_as(e, id))
    }

    /// Marks a task as completed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the task does not exist, or another
    /// error if the request fails.
    #[instrument(skip(self))]
    pub async fn complete_task(&self, id: TaskId) -> Result<()> {
        let url = self.url(&format!("/api/tasks/{id}/complete"))?;
        self.send_ack(self.http.post(url))
            .await
            .map_err(|e| not_found_as(e, id))
    }

    /// Fetches the user's task counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn user_stats(&self) -> Result<UserStats> {
        self.send(self.http.get(self.url("/api/user/stats")?)).await
    }

    /// Fetches task counts per category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn category_stats(&self) -> Result<CategoryStats> {
        self.send(self.http.get(self.url("/api/user/category-stats")?))
            .await
    }

    /// Fetches the created and completed task history.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn user_tasks(&self) -> Result<UserTasks> {
        self.send(self.http.get(self.url("/api/user/tasks")?)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "task store response");

        if status == StatusCode::UNAUTHORIZED || status.is_redirection() {
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            return Err(status_error(response).await);
        }
        decode(response).await
    }

    async fn send_ack(&self, request: RequestBuilder) -> Result<()> {
        let ack: Ack = self.send(request).await?;
        if ack.success {
            Ok(())
        } else {
            Err(Error::Rejected {
                message: ack.message.unwrap_or_default(),
            })
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn status_error(response: Response) -> Error {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    warn!(status, "task store request failed");
    Error::Status { status, body }
}

/// Reports a 404 on a task-specific endpoint as [`Error::NotFound`].
fn not_found_as(err: Error, id: TaskId) -> Error {
    match err {
        Error::Status { status: 404, .. } => Error::NotFound(id),
        other => other,
    }
}
