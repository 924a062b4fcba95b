//! Application state management.
//!
//! [`AppState`] is the single owner of everything the UI shows: the task
//! list, keyboard selection, the interaction controller, the current page
//! and the status line.

use eisen_protocol::{Task, TaskId};

use crate::interaction::{DropRequest, InteractionController};
use crate::request::ProfileData;

/// The page shown in the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// The priority matrix.
    #[default]
    Matrix,
    /// Statistics and task history.
    Profile,
}

/// A direction for keyboard navigation between tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards lower urgency.
    Left,
    /// Towards higher urgency.
    Right,
    /// Towards higher importance.
    Up,
    /// Towards lower importance.
    Down,
}

/// A message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text to show.
    pub text: String,
    /// Whether this reports a failure.
    pub is_error: bool,
}

impl Notification {
    /// Creates an informational notification.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// The application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Every task from the store, completed ones included. Replaced
    /// wholesale on each refresh.
    pub tasks: Vec<Task>,
    /// Drag, hover and modal state.
    pub interaction: InteractionController,
    /// Task picked with the keyboard or the last press.
    pub selected: Option<TaskId>,
    /// Page shown in the content area.
    pub page: Page,
    /// Profile data, once loaded.
    pub profile: Option<ProfileData>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Latest status message.
    pub notification: Option<Notification>,
    /// Where tasks come from, shown in the header.
    pub source: String,
}

impl AppState {
    /// Creates an empty state for a store described by `source`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eisen_tui::AppState;
    ///
    /// let state = AppState::new("demo data");
    /// assert!(state.tasks.is_empty());
    /// assert!(state.selected_task().is_none());
    /// ```
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Replaces the task list with a fresh copy from the store.
    ///
    /// The selection is kept if its task is still open. A drag whose task
    /// disappeared is cancelled.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        if self.selected.is_some_and(|id| self.open_task(id).is_none()) {
            self.selected = None;
        }
        if let Some(id) = self.interaction.dragged_task() {
            if self.open_task(id).is_none() {
                self.interaction.cancel_drag();
            }
        }
    }

    /// Returns the tasks drawn on the matrix, in drawing order.
    pub fn open_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Returns the number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn open_task(&self, id: TaskId) -> Option<&Task> {
        self.task(id).filter(|t| !t.completed)
    }

    /// Returns the selected task, if it is still on the matrix.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.open_task(self.selected?)
    }

    /// Moves the selection to the nearest task in `direction`.
    ///
    /// With nothing selected, the first open task is picked. Candidates must
    /// lie strictly further along the direction; among them the one closest
    /// along the direction wins, then the one closest across it.
    pub fn navigate(&mut self, direction: Direction) {
        let Some(current) = self.selected_task() else {
            let first = self.open_tasks().next().map(|t| t.id);
            self.selected = first;
            return;
        };

        let (cu, ci) = axes(current);
        let current_id = current.id;
        let next = self
            .open_tasks()
            .filter(|t| t.id != current_id)
            .filter_map(|t| {
                let (u, i) = axes(t);
                let (along, across) = match direction {
                    Direction::Left => (cu - u, (i - ci).abs()),
                    Direction::Right => (u - cu, (i - ci).abs()),
                    Direction::Up => (i - ci, (u - cu).abs()),
                    Direction::Down => (ci - i, (u - cu).abs()),
                };
                (along > 0).then_some(((along, across), t.id))
            })
            .min_by_key(|(key, _)| *key)
            .map(|(_, id)| id);

        if next.is_some() {
            self.selected = next;
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Moves a dropped task on the local copy.
    ///
    /// This is optimistic: if persisting the move fails, the task stays
    /// where it was dropped until the next refresh. Only the coordinate
    /// changes. Returns `false` if the task is unknown.
    pub fn apply_drop(&mut self, drop: &DropRequest) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == drop.task_id) {
            Some(task) => {
                task.move_to(drop.coordinate);
                true
            }
            None => false,
        }
    }

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::replace(&mut self.help_visible, false)
    }

    /// Switches between the matrix and the profile page.
    pub fn toggle_page(&mut self) {
        self.page = match self.page {
            Page::Matrix => Page::Profile,
            Page::Profile => Page::Matrix,
        };
    }

    /// Shows a notification on the status line.
    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }
}

fn axes(task: &Task) -> (i16, i16) {
    (
        i16::from(task.urgency.value()),
        i16::from(task.importance.value()),
    )
}

#[cfg(test)]
mod tests {
    use eisen_protocol::{Coordinate, Importance, Urgency, dummy::demo_tasks};

    use super::*;

    fn state() -> AppState {
        let mut state = AppState::new("demo data");
        state.replace_tasks(demo_tasks());
        state
    }

    #[test]
    fn new_state_has_correct_defaults() {
        let state = AppState::new("http://localhost:5000/");
        assert_eq!(state.page, Page::Matrix);
        assert_eq!(state.selected, None);
        assert!(!state.help_visible);
        assert!(state.notification.is_none());
        assert_eq!(state.source, "http://localhost:5000/");
    }

    #[test]
    fn open_tasks_skip_completed() {
        let state = state();
        assert_eq!(state.open_tasks().count(), 6);
        assert_eq!(state.completed_count(), 2);
    }

    #[test]
    fn completed_task_cannot_be_selected() {
        let mut state = state();
        state.selected = Some(7);
        assert!(state.selected_task().is_none());
    }

    #[test]
    fn first_navigation_picks_first_open_task() {
        let mut state = state();
        state.navigate(Direction::Right);
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn navigation_follows_the_axes() {
        let mut state = state();
        // "Fix production outage" sits at urgency 12, importance 7.
        state.selected = Some(1);

        state.navigate(Direction::Left);
        // Nearest to the left: "Reply to newsletter" (9, 2) vs "Book dentist"
        // (7, 5); urgency distance decides first.
        assert_eq!(state.selected, Some(5));

        state.navigate(Direction::Up);
        // Above (9, 2): "Book dentist" (7, 5) is nearer than the outage (12, 7).
        assert_eq!(state.selected, Some(3));

        state.navigate(Direction::Down);
        assert_eq!(state.selected, Some(5));
    }

    #[test]
    fn navigation_stops_at_the_edge() {
        let mut state = state();
        state.selected = Some(1);
        state.navigate(Direction::Right);
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn refresh_drops_selection_of_vanished_task() {
        let mut state = state();
        state.selected = Some(2);
        let tasks = demo_tasks().into_iter().filter(|t| t.id != 2).collect();
        state.replace_tasks(tasks);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn refresh_cancels_drag_of_vanished_task() {
        let mut state = state();
        state
            .interaction
            .pointer_down(eisen_matrix::Point::new(1.0, 1.0), Some(4));
        state.replace_tasks(Vec::new());
        assert!(!state.interaction.is_dragging());
    }

    #[test]
    fn drop_moves_only_the_coordinate() {
        let mut state = state();
        let drop = DropRequest {
            task_id: 4,
            coordinate: Coordinate::clamped(11, 6),
        };
        assert!(state.apply_drop(&drop));

        let task = state.task(4).unwrap();
        assert_eq!(task.urgency, Urgency::clamped(11));
        assert_eq!(task.importance, Importance::clamped(6));
        assert_eq!(task.title, "Read Rust book");

        assert!(!state.apply_drop(&DropRequest {
            task_id: 42,
            coordinate: Coordinate::CENTER
        }));
    }

    #[test]
    fn help_toggle_and_dismiss() {
        let mut state = AppState::default();
        state.toggle_help();
        assert!(state.help_visible);
        assert!(state.dismiss_help());
        assert!(!state.help_visible);
        assert!(!state.dismiss_help());
    }

    #[test]
    fn page_toggle() {
        let mut state = AppState::default();
        state.toggle_page();
        assert_eq!(state.page, Page::Profile);
        state.toggle_page();
        assert_eq!(state.page, Page::Matrix);
    }
}
