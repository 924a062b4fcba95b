//! Task categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of categories a task can belong to.
///
/// Unknown wire values fall back to [`Category::Other`] instead of failing,
/// matching how the task store treats categories it does not recognise.
///
/// # Examples
///
/// ```
/// use eisen_protocol::Category;
///
/// assert_eq!(Category::from_key("work"), Category::Work);
/// assert_eq!(Category::from_key("gardening"), Category::Other);
/// assert_eq!(Category::Study.display_name(), "Study");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Job-related work.
    Work,
    /// Personal errands.
    Personal,
    /// Learning.
    Study,
    /// Health and fitness.
    Health,
    /// Family matters.
    Family,
    /// Anything else.
    #[default]
    Other,
}

impl Category {
    /// Returns all categories in display order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Work,
            Self::Personal,
            Self::Study,
            Self::Health,
            Self::Family,
            Self::Other,
        ]
    }

    /// Returns the wire key used by the task store.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Study => "study",
            Self::Health => "health",
            Self::Family => "family",
            Self::Other => "other",
        }
    }

    /// Returns a human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Study => "Study",
            Self::Health => "Health",
            Self::Family => "Family",
            Self::Other => "Other",
        }
    }

    /// Parses a wire key, falling back to `Other` for anything unknown.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|c| c.key() == key)
            .unwrap_or(Self::Other)
    }

    /// Returns the next category, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Returns the previous category, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::from_key(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.key().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returns the display name for an optional category.
///
/// Tasks without a category are shown as `Other`.
#[must_use]
pub fn category_name(category: Option<Category>) -> &'static str {
    category.unwrap_or_default().display_name()
}
