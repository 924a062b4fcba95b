//! Requests the UI sends to the task store, and their results.
//!
//! The UI never waits on the store. It queues a [`StoreRequest`], the run
//! loop spawns [`StoreRequest::execute`] on the runtime, and the resulting
//! [`StoreResponse`]s come back through a channel to be applied between
//! frames. Requests are not serialized against each other; when two
//! refreshes race, whichever arrives last replaces the task list.

use eisen_client::TaskStore;
use eisen_protocol::{
    CategoryStats, Coordinate, Task, TaskDraft, TaskId, TaskPatch, UserStats, UserTasks,
};
use tracing::{debug, warn};

/// Everything shown on the profile page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    /// Task counters.
    pub stats: UserStats,
    /// Task counts per category.
    pub categories: CategoryStats,
    /// Created and completed task history.
    pub history: UserTasks,
}

/// A unit of work for the task store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    /// Re-read the task list.
    Refresh,
    /// Load the profile page data.
    LoadProfile,
    /// Create a task.
    Create(TaskDraft),
    /// Save an edited task.
    Update {
        /// Task to update.
        task_id: TaskId,
        /// Fields to change.
        patch: TaskPatch,
    },
    /// Persist the coordinate a task was dropped on.
    UpdatePosition {
        /// The dropped task.
        task_id: TaskId,
        /// Its new coordinate.
        coordinate: Coordinate,
    },
    /// Mark a task completed.
    Complete(TaskId),
    /// Delete a task.
    Delete(TaskId),
}

impl StoreRequest {
    /// Returns `true` if the request changes stored data.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Refresh | Self::LoadProfile)
    }

    /// Describes the request for notifications, e.g. "move task".
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Refresh => "load tasks",
            Self::LoadProfile => "load profile",
            Self::Create(_) => "create task",
            Self::Update { .. } => "update task",
            Self::UpdatePosition { .. } => "move task",
            Self::Complete(_) => "complete task",
            Self::Delete(_) => "delete task",
        }
    }

    /// Runs the request against `store`.
    ///
    /// A successful mutation is followed by a re-read of the task list, so
    /// the board reconciles with the store. A failed one is reported and
    /// leaves the board as it is.
    pub async fn execute(self, store: &TaskStore) -> Vec<StoreResponse> {
        let action = self.action();
        debug!(action, "executing store request");

        let outcome = match self {
            Self::Refresh => {
                return vec![match store.list_tasks().await {
                    Ok(tasks) => StoreResponse::Tasks(tasks),
                    Err(e) => StoreResponse::failed(action, &e),
                }];
            }
            Self::LoadProfile => {
                return vec![match load_profile(store).await {
                    Ok(profile) => StoreResponse::Profile(Box::new(profile)),
                    Err(e) => StoreResponse::failed(action, &e),
                }];
            }
            Self::Create(draft) => store.create_task(&draft).await.map(|_| "Task created"),
            Self::Update { task_id, patch } => {
                store.update_task(task_id, &patch).await.map(|_| "Task saved")
            }
            Self::UpdatePosition {
                task_id,
                coordinate,
            } => store
                .update_task(task_id, &TaskPatch::position(coordinate))
                .await
                .map(|_| "Task moved"),
            Self::Complete(task_id) => store.complete_task(task_id).await.map(|()| "Task completed"),
            Self::Delete(task_id) => store.delete_task(task_id).await.map(|()| "Task deleted"),
        };

        match outcome {
            Ok(notice) => {
                let refreshed = match store.list_tasks().await {
                    Ok(tasks) => StoreResponse::Tasks(tasks),
                    Err(e) => StoreResponse::failed("load tasks", &e),
                };
                vec![StoreResponse::Notice(notice.to_string()), refreshed]
            }
            Err(e) => vec![StoreResponse::failed(action, &e)],
        }
    }
}

async fn load_profile(store: &TaskStore) -> eisen_client::Result<ProfileData> {
    let (stats, categories, history) = tokio::try_join!(
        store.user_stats(),
        store.category_stats(),
        store.user_tasks()
    )?;
    Ok(ProfileData {
        stats,
        categories,
        history,
    })
}

/// A result coming back from the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreResponse {
    /// A fresh task list, replacing the current one.
    Tasks(Vec<Task>),
    /// Fresh profile data.
    Profile(Box<ProfileData>),
    /// A mutation succeeded.
    Notice(String),
    /// A request failed.
    Failed {
        /// What was attempted.
        action: &'static str,
        /// Why it failed.
        error: String,
    },
}

impl StoreResponse {
    fn failed(action: &'static str, error: &eisen_client::Error) -> Self {
        warn!(action, error = %error, "store request failed");
        Self::Failed {
            action,
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use eisen_client::MemoryStore;
    use eisen_protocol::dummy::demo_tasks;

    use super::*;

    fn store() -> TaskStore {
        TaskStore::from(MemoryStore::new(demo_tasks()))
    }

    #[test]
    fn only_reads_are_not_mutations() {
        assert!(!StoreRequest::Refresh.is_mutation());
        assert!(!StoreRequest::LoadProfile.is_mutation());
        assert!(StoreRequest::Complete(1).is_mutation());
    }

    #[tokio::test]
    async fn refresh_returns_the_list() {
        let responses = StoreRequest::Refresh.execute(&store()).await;
        assert!(matches!(responses.as_slice(), [StoreResponse::Tasks(tasks)] if tasks.len() == 8));
    }

    #[tokio::test]
    async fn move_is_followed_by_a_refresh() {
        let responses = StoreRequest::UpdatePosition {
            task_id: 2,
            coordinate: Coordinate::clamped(12, 1),
        }
        .execute(&store())
        .await;

        let [StoreResponse::Notice(notice), StoreResponse::Tasks(tasks)] = responses.as_slice()
        else {
            panic!("unexpected responses: {responses:?}");
        };
        assert_eq!(notice, "Task moved");
        let moved = tasks.iter().find(|t| t.id == 2).unwrap();
        assert_eq!(moved.coordinate(), Coordinate::clamped(12, 1));
    }

    #[tokio::test]
    async fn failed_mutation_skips_the_refresh() {
        let responses = StoreRequest::Delete(99).execute(&store()).await;
        let [StoreResponse::Failed { action, error }] = responses.as_slice() else {
            panic!("unexpected responses: {responses:?}");
        };
        assert_eq!(*action, "delete task");
        assert!(error.contains("99"));
    }

    #[tokio::test]
    async fn profile_combines_all_three_reads() {
        let responses = StoreRequest::LoadProfile.execute(&store()).await;
        let [StoreResponse::Profile(profile)] = responses.as_slice() else {
            panic!("unexpected responses: {responses:?}");
        };
        assert_eq!(profile.stats.total_tasks, 8);
        assert_eq!(profile.categories.total(), 8);
        assert_eq!(profile.history.completed_tasks.len(), 2);
    }
}
