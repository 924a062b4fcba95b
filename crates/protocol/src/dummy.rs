//! Sample data for demo mode and tests.
//!
//! # Examples
//!
//! ```
//! use eisen_protocol::dummy::demo_tasks;
//!
//! let tasks = demo_tasks();
//! assert_eq!(tasks.len(), 8);
//! assert_eq!(tasks.iter().filter(|t| t.completed).count(), 2);
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::category::Category;
use crate::coordinate::{Importance, Urgency};
use crate::task::{Task, TaskId};

/// Internal helper to reduce boilerplate when building sample tasks.
struct TaskBuilder {
    task: Task,
    age: Duration,
}

impl TaskBuilder {
    fn new(id: TaskId, title: &str, urgency: i64, importance: i64) -> Self {
        Self {
            task: Task::new(
                id,
                title,
                Urgency::clamped(urgency),
                Importance::clamped(importance),
            ),
            age: Duration::zero(),
        }
    }

    fn description(mut self, description: &str) -> Self {
        self.task.description = Some(description.to_string());
        self
    }

    fn category(mut self, category: Category) -> Self {
        self.task.category = Some(category);
        self
    }

    /// How long before `now` the task was created.
    fn age(mut self, age: Duration) -> Self {
        self.age = age;
        self
    }

    fn completed(mut self) -> Self {
        self.task.completed = true;
        self
    }

    fn build(self, now: NaiveDateTime) -> Task {
        let mut task = self.task;
        let created = now - self.age;
        task.created_at = Some(created);
        task.updated_at = Some(created);
        if task.completed {
            task.completed_at = Some(created + self.age / 2);
        }
        task
    }
}

/// Generates the demo task list with creation times relative to `now`.
///
/// The list covers all four quadrants, every importance colour, and a spread
/// of urgencies. Two tasks are completed and therefore hidden on the matrix.
#[must_use]
pub fn demo_tasks_at(now: NaiveDateTime) -> Vec<Task> {
    [
        TaskBuilder::new(1, "Fix production outage", 12, 7)
            .description("Checkout returns 500 for EU customers")
            .category(Category::Work)
            .age(Duration::minutes(20)),
        TaskBuilder::new(2, "Quarterly planning", 4, 6)
            .description("Draft goals for next quarter")
            .category(Category::Work)
            .age(Duration::days(3)),
        TaskBuilder::new(3, "Book dentist", 7, 5)
            .category(Category::Health)
            .age(Duration::days(1)),
        TaskBuilder::new(4, "Read Rust book", 1, 5)
            .description("Chapters on lifetimes and traits")
            .category(Category::Study)
            .age(Duration::days(10)),
        TaskBuilder::new(5, "Reply to newsletter", 9, 2)
            .category(Category::Personal)
            .age(Duration::hours(5)),
        TaskBuilder::new(6, "Sort photo library", 0, 1)
            .category(Category::Family)
            .age(Duration::days(30)),
        TaskBuilder::new(7, "Call grandma", 10, 6)
            .category(Category::Family)
            .age(Duration::days(2))
            .completed(),
        TaskBuilder::new(8, "Renew gym membership", 5, 3)
            .category(Category::Health)
            .age(Duration::days(6))
            .completed(),
    ]
    .into_iter()
    .map(|builder| builder.build(now))
    .collect()
}

/// Generates the demo task list anchored at a fixed date.
///
/// Deterministic across runs, which makes it suitable for tests.
#[must_use]
pub fn demo_tasks() -> Vec<Task> {
    let anchor = NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .unwrap_or_default();
    demo_tasks_at(anchor)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn demo_tasks_have_unique_ids() {
        let tasks = demo_tasks();
        let ids: HashSet<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), tasks.len());
    }

    #[test]
    fn demo_tasks_are_valid() {
        for task in demo_tasks() {
            task.validate().expect("demo task should be valid");
        }
    }

    #[test]
    fn demo_tasks_are_deterministic() {
        assert_eq!(demo_tasks(), demo_tasks());
    }

    #[test]
    fn demo_tasks_cover_both_axis_extremes() {
        let tasks = demo_tasks();
        assert!(tasks.iter().any(|t| t.urgency == Urgency::MAX));
        assert!(tasks.iter().any(|t| t.urgency == Urgency::MIN));
        assert!(tasks.iter().any(|t| t.importance == Importance::MAX));
        assert!(tasks.iter().any(|t| t.importance == Importance::MIN));
    }

    #[test]
    fn completed_demo_tasks_have_completion_time() {
        for task in demo_tasks().into_iter().filter(|t| t.completed) {
            let (created, completed) = (task.created_at, task.completed_at);
            assert!(completed.is_some());
            assert!(completed > created);
        }
    }
}
