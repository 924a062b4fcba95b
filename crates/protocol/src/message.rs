//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state. Pointer messages carry
//! raw terminal cell coordinates; translating them onto the matrix is the
//! application's job, since only it knows where the grid was drawn.

use serde::{Deserialize, Serialize};

/// A pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// The primary button. Starts drags.
    Primary,
    /// The secondary button. Opens the context menu.
    Secondary,
}

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler and consumed by
/// the application state to update the UI.
///
/// # Examples
///
/// ```
/// use eisen_protocol::{Message, PointerButton};
///
/// let msg = Message::PointerDown { column: 4, row: 2, button: PointerButton::Primary };
/// assert!(msg.is_pointer());
/// assert!(!msg.is_terminating());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// A pointer button was pressed at a terminal cell.
    PointerDown {
        /// Column of the press.
        column: u16,
        /// Row of the press.
        row: u16,
        /// Which button was pressed.
        button: PointerButton,
    },
    /// The pointer moved, with or without a button held.
    PointerMove {
        /// Column of the pointer.
        column: u16,
        /// Row of the pointer.
        row: u16,
    },
    /// The primary button was released.
    PointerUp {
        /// Column of the release.
        column: u16,
        /// Row of the release.
        row: u16,
    },
    /// The pointer left the application, e.g. the terminal lost focus.
    PointerLeave,

    /// Move selection left.
    NavigateLeft,
    /// Move selection right.
    NavigateRight,
    /// Move selection up.
    NavigateUp,
    /// Move selection down.
    NavigateDown,
    /// Activate the current item (edit the selected task, pick a menu entry).
    Select,
    /// Close the innermost overlay, or cancel an active drag.
    Escape,
    /// Quit the application.
    Quit,
    /// Re-read the task list from the store.
    Refresh,
    /// Toggle help overlay.
    ToggleHelp,
    /// Switch between the matrix and the profile page.
    TogglePage,
    /// Open the task form for a new task at the matrix centre.
    NewTask,
    /// Complete the selected task.
    CompleteSelected,
    /// Ask to delete the selected task.
    DeleteSelected,
    /// Answer "yes" to a confirmation prompt.
    Confirm,

    // --- Task form messages ---
    /// Type a character into the focused text field.
    FormInput {
        /// The character that was typed.
        ch: char,
    },
    /// Delete the last character of the focused text field.
    FormBackspace,
    /// Focus the next form field.
    FormNextField,
    /// Focus the previous form field.
    FormPrevField,
    /// Step the focused choice field.
    FormAdjust {
        /// Direction to step (positive = up, negative = down).
        delta: i32,
    },
    /// Save the form.
    FormSubmit,
}

impl Message {
    /// Returns `true` if this message is a keyboard navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use eisen_protocol::Message;
    ///
    /// assert!(Message::NavigateLeft.is_navigation());
    /// assert!(!Message::Select.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft | Self::NavigateRight | Self::NavigateUp | Self::NavigateDown
        )
    }

    /// Returns `true` if this message comes from the pointer.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. }
                | Self::PointerMove { .. }
                | Self::PointerUp { .. }
                | Self::PointerLeave
        )
    }

    /// Returns `true` if this message should terminate the application.
    ///
    /// # Examples
    ///
    /// ```
    /// use eisen_protocol::Message;
    ///
    /// assert!(Message::Quit.is_terminating());
    /// assert!(!Message::Escape.is_terminating());
    /// ```
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message would take the board away from an
    /// active drag, by opening an overlay, switching pages or completing
    /// the dragged task.
    ///
    /// # Examples
    ///
    /// ```
    /// use eisen_protocol::Message;
    ///
    /// assert!(Message::ToggleHelp.interrupts_drag());
    /// assert!(!Message::Escape.interrupts_drag());
    /// ```
    #[must_use]
    pub fn interrupts_drag(&self) -> bool {
        matches!(
            self,
            Self::ToggleHelp
                | Self::TogglePage
                | Self::NewTask
                | Self::Select
                | Self::CompleteSelected
                | Self::DeleteSelected
        )
    }

    /// Returns `true` if this message edits the task form.
    #[must_use]
    pub fn is_form(&self) -> bool {
        matches!(
            self,
            Self::FormInput { .. }
                | Self::FormBackspace
                | Self::FormNextField
                | Self::FormPrevField
                | Self::FormAdjust { .. }
                | Self::FormSubmit
        )
    }
}
