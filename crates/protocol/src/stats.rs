//! Aggregate statistics shown on the profile page.
//!
//! The task store computes these payloads server-side; the `from_tasks`
//! constructors reproduce the same numbers locally so an in-memory store can
//! answer the same requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::task::Task;

/// Task counters for the current user.
///
/// # Examples
///
/// ```
/// use eisen_protocol::{Importance, Task, Urgency, UserStats};
///
/// let mut done = Task::new(1, "a", Urgency::MIN, Importance::MIN);
/// done.completed = true;
/// let open = Task::new(2, "b", Urgency::MIN, Importance::MIN);
/// let other = Task::new(3, "c", Urgency::MIN, Importance::MIN);
///
/// let stats = UserStats::from_tasks(&[done, open, other]);
/// assert_eq!(stats.total_tasks, 3);
/// assert_eq!(stats.pending_tasks, 2);
/// assert_eq!(stats.completion_rate, 33.3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Number of tasks, completed or not.
    pub total_tasks: u64,
    /// Number of completed tasks.
    pub completed_tasks: u64,
    /// Number of tasks still open.
    pub pending_tasks: u64,
    /// Percentage of completed tasks, rounded to one decimal.
    pub completion_rate: f64,
}

impl UserStats {
    /// Computes the counters for a task list.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total_tasks = tasks.len() as u64;
        let completed_tasks = tasks.iter().filter(|t| t.completed).count() as u64;
        let completion_rate = if total_tasks == 0 {
            0.0
        } else {
            (completed_tasks as f64 / total_tasks as f64 * 1000.0).round() / 10.0
        };
        Self {
            total_tasks,
            completed_tasks,
            pending_tasks: total_tasks - completed_tasks,
            completion_rate,
        }
    }
}

/// Number of tasks in each category.
///
/// Every category is present, with zero for unused ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryStats {
    counts: BTreeMap<Category, u64>,
}

impl Default for CategoryStats {
    fn default() -> Self {
        Self {
            counts: Category::all().into_iter().map(|c| (c, 0)).collect(),
        }
    }
}

impl CategoryStats {
    /// Counts tasks per category. Tasks without a category are not counted.
    ///
    /// Unknown category keys are already decoded as [`Category::Other`], so
    /// such tasks are counted there rather than dropped.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut stats = Self::default();
        for category in tasks.iter().filter_map(|t| t.category) {
            *stats.counts.entry(category).or_insert(0) += 1;
        }
        stats
    }

    /// Returns the count for one category.
    #[must_use]
    pub fn count(&self, category: Category) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Iterates over `(category, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::all().into_iter().map(|c| (c, self.count(c)))
    }

    /// Returns the sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// The task history lists shown on the profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTasks {
    /// All tasks, newest first.
    pub created_tasks: Vec<Task>,
    /// Completed tasks, newest first.
    pub completed_tasks: Vec<Task>,
}

impl UserTasks {
    /// Builds both lists from a task list.
    ///
    /// Tasks are ordered by creation time, newest first; tasks without a
    /// creation time sort last.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut created_tasks = tasks.to_vec();
        created_tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let completed_tasks = created_tasks
            .iter()
            .filter(|t| t.completed)
            .cloned()
            .collect();
        Self {
            created_tasks,
            completed_tasks,
        }
    }
}
