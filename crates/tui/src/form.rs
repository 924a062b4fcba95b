//! Task form state.
//!
//! The same form creates new tasks and edits existing ones. Text fields take
//! typed characters; the choice fields (category, importance, urgency) are
//! stepped with the arrow keys.

use eisen_protocol::{
    Category, Coordinate, Importance, Task, TaskDraft, TaskId, TaskPatch, Urgency,
};

/// A field of the task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// Task title.
    #[default]
    Title,
    /// Task description.
    Description,
    /// Task category.
    Category,
    /// Importance, 1★ to 7★.
    Importance,
    /// Urgency, "1 year" to "15 min".
    Urgency,
}

impl FormField {
    /// Returns all fields in display order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Title,
            Self::Description,
            Self::Category,
            Self::Importance,
            Self::Urgency,
        ]
    }

    /// Returns the next field (wrapping around).
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Category,
            Self::Category => Self::Importance,
            Self::Importance => Self::Urgency,
            Self::Urgency => Self::Title,
        }
    }

    /// Returns the previous field (wrapping around).
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Urgency,
            Self::Description => Self::Title,
            Self::Category => Self::Description,
            Self::Importance => Self::Category,
            Self::Urgency => Self::Importance,
        }
    }

    /// Returns the label shown next to the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Category => "Category",
            Self::Importance => "Importance",
            Self::Urgency => "Urgency",
        }
    }

    /// Returns `true` for fields that take typed text.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Title | Self::Description)
    }
}

/// What saving the form does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    /// Create a new task.
    New,
    /// Overwrite an existing task.
    Edit(TaskId),
}

/// The result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    /// Create a task from this draft.
    Create(TaskDraft),
    /// Apply this patch to an existing task.
    Update {
        /// Task being edited.
        task_id: TaskId,
        /// Every form field, trimmed.
        patch: TaskPatch,
    },
}

/// Error shown when the title is left empty.
pub const EMPTY_TITLE_ERROR: &str = "Title cannot be empty";

/// State of an open task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Whether the form creates or edits.
    pub target: FormTarget,
    /// Title being typed.
    pub title: String,
    /// Description being typed.
    pub description: String,
    /// Chosen category.
    pub category: Category,
    /// Chosen importance.
    pub importance: Importance,
    /// Chosen urgency.
    pub urgency: Urgency,
    /// Field receiving input.
    pub field: FormField,
    /// Inline validation message.
    pub error: Option<String>,
}

impl TaskForm {
    /// Opens an empty form for a task at `coordinate`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eisen_protocol::Coordinate;
    /// use eisen_tui::form::{FormTarget, TaskForm};
    ///
    /// let form = TaskForm::new_at(Coordinate::clamped(9, 2));
    /// assert_eq!(form.target, FormTarget::New);
    /// assert_eq!(form.urgency.value(), 9);
    /// assert!(form.title.is_empty());
    /// ```
    #[must_use]
    pub fn new_at(coordinate: Coordinate) -> Self {
        Self {
            target: FormTarget::New,
            title: String::new(),
            description: String::new(),
            category: Category::default(),
            importance: coordinate.importance,
            urgency: coordinate.urgency,
            field: FormField::default(),
            error: None,
        }
    }

    /// Opens a form pre-filled from an existing task.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            target: FormTarget::Edit(task.id),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            category: task.category.unwrap_or_default(),
            importance: task.importance,
            urgency: task.urgency,
            field: FormField::default(),
            error: None,
        }
    }

    /// Returns the form title.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self.target {
            FormTarget::New => "New task",
            FormTarget::Edit(_) => "Edit task",
        }
    }

    /// Types a character into the focused text field.
    ///
    /// Ignored on choice fields.
    pub fn input_char(&mut self, ch: char) {
        match self.field {
            FormField::Title => {
                self.title.push(ch);
                self.error = None;
            }
            FormField::Description => self.description.push(ch),
            _ => {}
        }
    }

    /// Deletes the last character of the focused text field.
    pub fn backspace(&mut self) {
        match self.field {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            _ => {}
        }
    }

    /// Focuses the next field.
    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    /// Focuses the previous field.
    pub fn prev_field(&mut self) {
        self.field = self.field.prev();
    }

    /// Steps the focused choice field by `delta`.
    ///
    /// Importance and urgency stop at the ends of their ranges; the category
    /// wraps around.
    pub fn adjust(&mut self, delta: i32) {
        match self.field {
            FormField::Category => {
                for _ in 0..delta.unsigned_abs() {
                    self.category = if delta > 0 {
                        self.category.next()
                    } else {
                        self.category.prev()
                    };
                }
            }
            FormField::Importance => self.importance = self.importance.step(i64::from(delta)),
            FormField::Urgency => self.urgency = self.urgency.step(i64::from(delta)),
            FormField::Title | FormField::Description => {}
        }
    }

    /// Returns the coordinate currently chosen.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.urgency, self.importance)
    }

    /// Validates the form and returns what to send to the store.
    ///
    /// An empty title keeps the form open with [`EMPTY_TITLE_ERROR`] set and
    /// focus moved back to the title.
    pub fn submit(&mut self) -> Option<FormSubmission> {
        let draft = TaskDraft::new(self.title.clone(), self.coordinate())
            .with_description(self.description.clone())
            .with_category(self.category);

        match draft.validated() {
            Ok(draft) => Some(match self.target {
                FormTarget::New => FormSubmission::Create(draft),
                FormTarget::Edit(task_id) => FormSubmission::Update {
                    task_id,
                    patch: TaskPatch::from_draft(draft),
                },
            }),
            Err(_) => {
                self.error = Some(EMPTY_TITLE_ERROR.to_string());
                self.field = FormField::Title;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_cycle_wraps() {
        let mut field = FormField::Title;
        for _ in 0..FormField::all().len() {
            field = field.next();
        }
        assert_eq!(field, FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Urgency);
    }

    #[test]
    fn typing_only_reaches_text_fields() {
        let mut form = TaskForm::new_at(Coordinate::CENTER);
        form.input_char('H');
        form.input_char('i');
        form.next_field();
        form.input_char('!');
        form.next_field();
        form.input_char('x');

        assert_eq!(form.title, "Hi");
        assert_eq!(form.description, "!");
        assert_eq!(form.category, Category::Other);
    }

    #[test]
    fn backspace_on_empty_field_is_harmless() {
        let mut form = TaskForm::new_at(Coordinate::CENTER);
        form.backspace();
        assert!(form.title.is_empty());
    }

    #[test]
    fn steppers_reach_both_ends_of_each_axis() {
        let mut form = TaskForm::new_at(Coordinate::CENTER);
        form.field = FormField::Importance;
        form.adjust(10);
        assert_eq!(form.importance, Importance::MAX);
        form.adjust(-10);
        assert_eq!(form.importance, Importance::MIN);

        form.field = FormField::Urgency;
        form.adjust(20);
        assert_eq!(form.urgency, Urgency::MAX);
        form.adjust(-20);
        assert_eq!(form.urgency, Urgency::MIN);
    }

    #[test]
    fn category_wraps() {
        let mut form = TaskForm::new_at(Coordinate::CENTER);
        form.field = FormField::Category;
        form.adjust(1);
        assert_eq!(form.category, Category::Work);
        form.adjust(-1);
        assert_eq!(form.category, Category::Other);
    }

    #[test]
    fn blank_title_keeps_form_open() {
        let mut form = TaskForm::new_at(Coordinate::CENTER);
        form.title = "   ".to_string();
        form.field = FormField::Urgency;

        assert_eq!(form.submit(), None);
        assert_eq!(form.error.as_deref(), Some(EMPTY_TITLE_ERROR));
        assert_eq!(form.field, FormField::Title);

        form.input_char('A');
        assert_eq!(form.error, None);
    }

    #[test]
    fn new_form_submits_a_trimmed_draft() {
        let mut form = TaskForm::new_at(Coordinate::clamped(11, 3));
        form.title = " Pay rent ".to_string();
        form.category = Category::Personal;

        let Some(FormSubmission::Create(draft)) = form.submit() else {
            panic!("expected a create submission");
        };
        assert_eq!(draft.title, "Pay rent");
        assert_eq!(draft.category, Category::Personal);
        assert_eq!(draft.coordinate(), Coordinate::clamped(11, 3));
    }

    #[test]
    fn edit_form_submits_a_full_patch() {
        let mut task = Task::new(4, "Read", Urgency::clamped(1), Importance::clamped(5));
        task.category = Some(Category::Study);
        let mut form = TaskForm::edit(&task);
        assert_eq!(form.heading(), "Edit task");

        form.field = FormField::Urgency;
        form.adjust(2);

        let Some(FormSubmission::Update { task_id, patch }) = form.submit() else {
            panic!("expected an update submission");
        };
        assert_eq!(task_id, 4);
        assert_eq!(patch.title.as_deref(), Some("Read"));
        assert_eq!(patch.category, Some(Category::Study));
        assert_eq!(patch.urgency, Some(Urgency::clamped(3)));
        assert_eq!(patch.importance, Some(Importance::clamped(5)));
    }
}
