//! The task store the board talks to.

use eisen_protocol::{CategoryStats, Task, TaskDraft, TaskId, TaskPatch, UserStats, UserTasks};

use crate::error::Result;
use crate::http::HttpTaskStore;
use crate::memory::MemoryStore;

/// Either a remote task store or the in-memory demo store.
///
/// Every request is forwarded unchanged to the backing store, so callers
/// never need to know which one they hold.
#[derive(Debug, Clone)]
pub enum TaskStore {
    /// A task store reached over HTTP.
    Http(HttpTaskStore),
    /// Tasks kept in process memory.
    Memory(MemoryStore),
}

impl TaskStore {
    /// Returns `true` for the in-memory store.
    #[must_use]
    pub const fn is_demo(&self) -> bool {
        matches!(self, Self::Memory(_))
    }

    /// Human-readable description of where tasks come from.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Http(store) => store.base_url().to_string(),
            Self::Memory(_) => "demo data".to_string(),
        }
    }

    /// Lists every task, completed ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        match self {
            Self::Http(store) => store.list_tasks().await,
            Self::Memory(store) => store.list_tasks().await,
        }
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the backing store fails.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        match self {
            Self::Http(store) => store.create_task(draft).await,
            Self::Memory(store) => store.create_task(draft).await,
        }
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is unknown or the backing store fails.
    pub async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task> {
        match self {
            Self::Http(store) => store.update_task(id, patch).await,
            Self::Memory(store) => store.update_task(id, patch).await,
        }
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is unknown or the backing store fails.
    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        match self {
            Self::Http(store) => store.delete_task(id).await,
            Self::Memory(store) => store.delete_task(id).await,
        }
    }

    /// Marks a task as completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is unknown or the backing store fails.
    pub async fn complete_task(&self, id: TaskId) -> Result<()> {
        match self {
            Self::Http(store) => store.complete_task(id).await,
            Self::Memory(store) => store.complete_task(id).await,
        }
    }

    /// Fetches the task counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    pub async fn user_stats(&self) -> Result<UserStats> {
        match self {
            Self::Http(store) => store.user_stats().await,
            Self::Memory(store) => store.user_stats().await,
        }
    }

    /// Fetches task counts per category.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    pub async fn category_stats(&self) -> Result<CategoryStats> {
        match self {
            Self::Http(store) => store.category_stats().await,
            Self::Memory(store) => store.category_stats().await,
        }
    }

    /// Fetches the created and completed task history.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    pub async fn user_tasks(&self) -> Result<UserTasks> {
        match self {
            Self::Http(store) => store.user_tasks().await,
            Self::Memory(store) => store.user_tasks().await,
        }
    }
}

impl From<HttpTaskStore> for TaskStore {
    fn from(store: HttpTaskStore) -> Self {
        Self::Http(store)
    }
}

impl From<MemoryStore> for TaskStore {
    fn from(store: MemoryStore) -> Self {
        Self::Memory(store)
    }
}
