//! Task-related types for the priority matrix.
//!
//! This module defines the task record exchanged with the task store, along
//! with the request bodies used to create and update tasks.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::coordinate::{Coordinate, Importance, Urgency};
use crate::error::{ProtocolError, Result};

/// Unique identifier for a task.
///
/// Identifiers are issued by the task store.
pub type TaskId = i64;

/// A task on the priority matrix.
///
/// The task store owns these records; the board only keeps a transient copy
/// that is replaced wholesale whenever the store is re-read.
///
/// `id`, `title`, `importance`, `urgency` and `completed` are required on the
/// wire. Everything else is optional and defaults to empty.
///
/// # Examples
///
/// ```
/// use eisen_protocol::{Importance, Task, Urgency};
///
/// let task = Task::new(1, "Ship release", Urgency::clamped(10), Importance::clamped(6));
/// assert!(!task.completed);
/// assert_eq!(task.label().unwrap(), 'S');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier issued by the task store.
    pub id: TaskId,
    /// Short summary of the task. Never empty for a valid task.
    pub title: String,
    /// Optional free-form details.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional category.
    #[serde(default)]
    pub category: Option<Category>,
    /// Vertical position on the matrix.
    pub importance: Importance,
    /// Horizontal position on the matrix.
    pub urgency: Urgency,
    /// Whether the task has been completed. Completed tasks are not drawn.
    pub completed: bool,
    /// When this task was created.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// When this task was last modified.
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    /// When this task was completed.
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

impl Task {
    /// Creates an incomplete task with the given identifier and position.
    ///
    /// Useful for tests and for rebuilding tasks from local data.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, urgency: Urgency, importance: Importance) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            category: None,
            importance,
            urgency,
            completed: false,
            created_at: None,
            updated_at: None,
            completed_at: None,
        }
    }

    /// Returns the task's matrix coordinate.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.urgency, self.importance)
    }

    /// Moves the task to a new coordinate.
    ///
    /// Only the two axis fields change; in particular `completed` is left
    /// untouched.
    pub fn move_to(&mut self, coordinate: Coordinate) {
        self.urgency = coordinate.urgency;
        self.importance = coordinate.importance;
    }

    /// Returns the single-character glyph shown on the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidTaskTitle`] if the title is empty.
    /// Titles are validated upstream, so this indicates corrupted data.
    pub fn label(&self) -> Result<char> {
        self.title.chars().next().ok_or(ProtocolError::InvalidTaskTitle)
    }

    /// Checks the invariants the board relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidTaskTitle`] if the title is empty or
    /// only whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ProtocolError::InvalidTaskTitle);
        }
        Ok(())
    }
}

/// The body of a "create task" request.
///
/// # Examples
///
/// ```
/// use eisen_protocol::{Category, Coordinate, TaskDraft};
///
/// let draft = TaskDraft::new("  Call mom  ", Coordinate::CENTER)
///     .with_category(Category::Family);
/// let draft = draft.validated().unwrap();
/// assert_eq!(draft.title, "Call mom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Task details; may be empty.
    pub description: String,
    /// Task category.
    pub category: Category,
    /// Vertical position.
    pub importance: Importance,
    /// Horizontal position.
    pub urgency: Urgency,
}

impl TaskDraft {
    /// Creates a draft at the given coordinate with an empty description.
    #[must_use]
    pub fn new(title: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: Category::default(),
            importance: coordinate.importance,
            urgency: coordinate.urgency,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Returns the draft with whitespace trimmed from the text fields.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidTaskTitle`] if the trimmed title is
    /// empty.
    pub fn validated(self) -> Result<Self> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ProtocolError::InvalidTaskTitle);
        }
        Ok(Self {
            title,
            description: self.description.trim().to_string(),
            ..self
        })
    }

    /// Returns the draft's coordinate.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.urgency, self.importance)
    }
}

/// A partial update to a task.
///
/// Fields left as `None` are omitted from the request body, so the store only
/// touches what is present. There is deliberately no `completed` field:
/// completion goes through its own endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// New importance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
    /// New urgency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

impl TaskPatch {
    /// Builds the body sent when a task is dropped on a new cell.
    ///
    /// ```
    /// use eisen_protocol::{Coordinate, TaskPatch};
    ///
    /// let patch = TaskPatch::position(Coordinate::clamped(12, 7));
    /// let json = serde_json::to_string(&patch).unwrap();
    /// assert_eq!(json, r#"{"importance":7,"urgency":12}"#);
    /// ```
    #[must_use]
    pub fn position(coordinate: Coordinate) -> Self {
        Self {
            importance: Some(coordinate.importance),
            urgency: Some(coordinate.urgency),
            ..Self::default()
        }
    }

    /// Builds a full edit from a validated draft.
    #[must_use]
    pub fn from_draft(draft: TaskDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            category: Some(draft.category),
            importance: Some(draft.importance),
            urgency: Some(draft.urgency),
        }
    }

    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to a task in place.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(category) = self.category {
            task.category = Some(category);
        }
        if let Some(importance) = self.importance {
            task.importance = importance;
        }
        if let Some(urgency) = self.urgency {
            task.urgency = urgency;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_store_payload() {
        let json = r#"{
            "id": 7,
            "title": "Write report",
            "description": null,
            "category": "work",
            "importance": 6,
            "urgency": 11,
            "completed": false,
            "created_at": "2024-03-01T09:15:00.123456",
            "updated_at": "2024-03-01T09:15:00",
            "completed_at": null
        }"#;

        let task: Task = serde_json::from_str(json).expect("deserialize");
        assert_eq!(task.id, 7);
        assert_eq!(task.category, Some(Category::Work));
        assert_eq!(task.importance.value(), 6);
        assert_eq!(task.urgency.value(), 11);
        assert!(task.created_at.is_some());
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn deserializes_minimal_payload() {
        let json = r#"{"id": 1, "title": "T", "importance": 1, "urgency": 0, "completed": true}"#;
        let task: Task = serde_json::from_str(json).expect("deserialize");
        assert!(task.completed);
        assert!(task.description.is_none());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let json = r#"{"id": 1, "title": "T", "importance": 1, "completed": false}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn out_of_range_axes_are_clamped_on_decode() {
        let json = r#"{"id": 1, "title": "T", "importance": 42, "urgency": -5, "completed": false}"#;
        let task: Task = serde_json::from_str(json).expect("deserialize");
        assert_eq!(task.importance, Importance::MAX);
        assert_eq!(task.urgency, Urgency::MIN);
    }

    #[test]
    fn label_is_first_character() {
        let task = Task::new(1, "Écrire", Urgency::MIN, Importance::MIN);
        assert_eq!(task.label().unwrap(), 'É');
    }

    #[test]
    fn label_of_empty_title_is_an_error() {
        let task = Task::new(1, "", Urgency::MIN, Importance::MIN);
        assert!(matches!(task.label(), Err(ProtocolError::InvalidTaskTitle)));
        assert!(task.validate().is_err());
    }

    #[test]
    fn move_to_keeps_completion() {
        let mut task = Task::new(1, "Done already", Urgency::MIN, Importance::MIN);
        task.completed = true;
        task.move_to(Coordinate::clamped(12, 7));
        assert!(task.completed);
        assert_eq!(task.coordinate(), Coordinate::clamped(12, 7));
    }

    #[test]
    fn draft_rejects_blank_title() {
        let draft = TaskDraft::new("   ", Coordinate::CENTER);
        assert!(matches!(draft.validated(), Err(ProtocolError::InvalidTaskTitle)));
    }

    #[test]
    fn draft_serializes_all_fields() {
        let draft = TaskDraft::new("Plan", Coordinate::clamped(2, 3)).with_description("Q3");
        let value = serde_json::to_value(&draft).expect("serialize");
        assert_eq!(value["title"], "Plan");
        assert_eq!(value["description"], "Q3");
        assert_eq!(value["category"], "other");
        assert_eq!(value["importance"], 3);
        assert_eq!(value["urgency"], 2);
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let patch = TaskPatch::default();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_string(&patch).expect("serialize"), "{}");
    }

    #[test]
    fn patch_apply_only_touches_present_fields() {
        let mut task = Task::new(3, "Keep me", Urgency::MIN, Importance::MIN);
        task.description = Some("original".into());

        TaskPatch::position(Coordinate::clamped(5, 5)).apply_to(&mut task);

        assert_eq!(task.title, "Keep me");
        assert_eq!(task.description.as_deref(), Some("original"));
        assert_eq!(task.coordinate(), Coordinate::clamped(5, 5));
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_task()(
            id in 1i64..10_000,
            title in "[a-zA-Z][a-zA-Z0-9 ]{0,30}",
            urgency in -20i64..40,
            importance in -20i64..40,
            completed in any::<bool>(),
        ) -> Task {
            let mut task = Task::new(id, title, Urgency::clamped(urgency), Importance::clamped(importance));
            task.completed = completed;
            task
        }
    }

    proptest! {
        /// Moving a task never changes its completion flag.
        #[test]
        fn position_patch_preserves_completion(mut task in arb_task(), u in -5i64..20, i in -5i64..20) {
            let before = task.completed;
            TaskPatch::position(Coordinate::clamped(u, i)).apply_to(&mut task);
            prop_assert_eq!(task.completed, before);
        }

        /// Task payloads survive a trip through the wire format.
        #[test]
        fn task_roundtrip(task in arb_task()) {
            let json = serde_json::to_string(&task).expect("serialize");
            let parsed: Task = serde_json::from_str(&json).expect("deserialize");
            prop_assert_eq!(task, parsed);
        }
    }
}
