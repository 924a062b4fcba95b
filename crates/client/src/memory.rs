//! In-process task store.
//!
//! [`MemoryStore`] answers the same requests as the HTTP store from a task
//! list held in memory. It backs demo mode and the TUI's tests.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use eisen_protocol::{
    CategoryStats, ProtocolError, Task, TaskDraft, TaskId, TaskPatch, UserStats, UserTasks,
    dummy::demo_tasks_at,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug)]
struct Inner {
    tasks: Vec<Task>,
    next_id: TaskId,
}

/// A task store kept in memory.
///
/// Clones share the same task list.
///
/// # Examples
///
/// ```
/// use eisen_client::MemoryStore;
/// use eisen_protocol::{Coordinate, TaskDraft};
///
/// # tokio_test(async {
/// let store = MemoryStore::default();
/// let task = store.create_task(&TaskDraft::new("Water plants", Coordinate::CENTER)).await?;
/// store.complete_task(task.id).await?;
///
/// let stats = store.user_stats().await?;
/// assert_eq!(stats.completed_tasks, 1);
/// # Ok::<(), eisen_client::Error>(())
/// # });
/// # fn tokio_test<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MemoryStore {
    /// Creates a store holding `tasks`. New ids continue after the largest
    /// existing one.
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(Mutex::new(Inner { tasks, next_id })),
        }
    }

    /// Creates a store seeded with the demo tasks, dated relative to now.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(demo_tasks_at(now()))
    }

    /// Returns every task.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the HTTP store.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.inner.lock().await.tasks.clone())
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTask`] if the draft's title is empty.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        let draft = draft.clone().validated()?;
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let stamp = now();
        let mut task = Task::new(id, draft.title, draft.urgency, draft.importance);
        task.description = Some(draft.description);
        task.category = Some(draft.category);
        task.created_at = Some(stamp);
        task.updated_at = Some(stamp);
        inner.tasks.push(task.clone());
        debug!(task_id = id, "created task in memory");
        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id and
    /// [`Error::InvalidTask`] if the patch would blank the title.
    pub async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ProtocolError::InvalidTaskTitle.into());
        }
        let mut inner = self.inner.lock().await;
        let task = find_mut(&mut inner.tasks, id)?;
        patch.apply_to(task);
        task.updated_at = Some(now());
        Ok(task.clone())
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        if inner.tasks.len() == before {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    /// Marks a task as completed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub async fn complete_task(&self, id: TaskId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let task = find_mut(&mut inner.tasks, id)?;
        task.completed = true;
        task.completed_at = Some(now());
        Ok(())
    }

    /// Computes the task counters.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the HTTP store.
    pub async fn user_stats(&self) -> Result<UserStats> {
        Ok(UserStats::from_tasks(&self.inner.lock().await.tasks))
    }

    /// Computes task counts per category.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the HTTP store.
    pub async fn category_stats(&self) -> Result<CategoryStats> {
        Ok(CategoryStats::from_tasks(&self.inner.lock().await.tasks))
    }

    /// Builds the created and completed task history.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the HTTP store.
    pub async fn user_tasks(&self) -> Result<UserTasks> {
        Ok(UserTasks::from_tasks(&self.inner.lock().await.tasks))
    }
}

fn find_mut(tasks: &mut [Task], id: TaskId) -> Result<&mut Task> {
    tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(Error::NotFound(id))
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use eisen_protocol::{Category, Coordinate, Importance, Urgency, dummy::demo_tasks};

    use super::*;

    #[tokio::test]
    async fn ids_continue_after_seed() {
        let store = MemoryStore::new(demo_tasks());
        let task = store
            .create_task(&TaskDraft::new("New", Coordinate::CENTER))
            .await
            .unwrap();
        assert_eq!(task.id, 9);
    }

    #[tokio::test]
    async fn create_trims_and_stamps() {
        let store = MemoryStore::default();
        let draft = TaskDraft::new("  Stretch  ", Coordinate::clamped(3, 2))
            .with_category(Category::Health)
            .with_description("ten minutes");
        let task = store.create_task(&draft).await.unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Stretch");
        assert_eq!(task.category, Some(Category::Health));
        assert_eq!(task.coordinate(), Coordinate::clamped(3, 2));
        assert!(task.created_at.is_some());
        assert!(!task.completed);
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let store = MemoryStore::default();
        let err = store
            .create_task(&TaskDraft::new(" ", Coordinate::CENTER))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTask(ProtocolError::InvalidTaskTitle)));
        assert!(store.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn position_update_keeps_other_fields() {
        let store = MemoryStore::new(demo_tasks());
        let updated = store
            .update_task(7, &TaskPatch::position(Coordinate::clamped(0, 1)))
            .await
            .unwrap();

        assert_eq!(updated.urgency, Urgency::MIN);
        assert_eq!(updated.importance, Importance::MIN);
        assert_eq!(updated.title, "Call grandma");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn update_rejects_blank_title() {
        let store = MemoryStore::new(demo_tasks());
        let patch = TaskPatch {
            title: Some(String::new()),
            ..TaskPatch::default()
        };
        assert!(store.update_task(1, &patch).await.is_err());
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = MemoryStore::default();
        assert!(matches!(store.delete_task(4).await, Err(Error::NotFound(4))));
        assert!(matches!(store.complete_task(4).await, Err(Error::NotFound(4))));
        assert!(matches!(
            store.update_task(4, &TaskPatch::default()).await,
            Err(Error::NotFound(4))
        ));
    }

    #[tokio::test]
    async fn complete_and_delete() {
        let store = MemoryStore::new(demo_tasks());
        store.complete_task(1).await.unwrap();
        store.delete_task(2).await.unwrap();

        let tasks = store.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 7);
        let first = tasks.iter().find(|t| t.id == 1).unwrap();
        assert!(first.completed);
        assert!(first.completed_at.is_some());
    }

    #[tokio::test]
    async fn stats_follow_the_task_list() {
        let store = MemoryStore::new(demo_tasks());
        let stats = store.user_stats().await.unwrap();
        assert_eq!(stats.total_tasks, 8);
        assert_eq!(stats.completed_tasks, 2);
        assert_eq!(stats.completion_rate, 25.0);

        let categories = store.category_stats().await.unwrap();
        assert_eq!(categories.count(Category::Work), 2);
        assert_eq!(categories.count(Category::Family), 2);

        let history = store.user_tasks().await.unwrap();
        assert_eq!(history.created_tasks.len(), 8);
        assert_eq!(history.completed_tasks.len(), 2);
        assert_eq!(history.created_tasks[0].id, 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryStore::default();
        let other = store.clone();
        other
            .create_task(&TaskDraft::new("Shared", Coordinate::CENTER))
            .await
            .unwrap();
        assert_eq!(store.list_tasks().await.unwrap().len(), 1);
    }
}
