//! The four labelled regions of the matrix.

use std::fmt;

use eisen_protocol::{Coordinate, Importance, Urgency};

/// One quadrant of the Eisenhower matrix.
///
/// The centre lines (urgency 6, importance 4) belong to the urgent and the
/// important halves respectively.
///
/// # Examples
///
/// ```
/// use eisen_matrix::Quadrant;
/// use eisen_protocol::Coordinate;
///
/// assert_eq!(Quadrant::of(Coordinate::CENTER), Quadrant::ImportantUrgent);
/// assert_eq!(Quadrant::of(Coordinate::clamped(0, 1)), Quadrant::NeitherUrgentNorImportant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Top right: do it now.
    ImportantUrgent,
    /// Top left: schedule it.
    ImportantNotUrgent,
    /// Bottom right: delegate it.
    UrgentNotImportant,
    /// Bottom left: drop it.
    NeitherUrgentNorImportant,
}

impl Quadrant {
    /// Returns all quadrants, top-left first, in reading order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::ImportantNotUrgent,
            Self::ImportantUrgent,
            Self::NeitherUrgentNorImportant,
            Self::UrgentNotImportant,
        ]
    }

    /// Returns the quadrant containing a coordinate.
    #[must_use]
    pub fn of(coordinate: Coordinate) -> Self {
        let urgent = coordinate.urgency >= Urgency::CENTER;
        let important = coordinate.importance >= Importance::CENTER;
        match (important, urgent) {
            (true, true) => Self::ImportantUrgent,
            (true, false) => Self::ImportantNotUrgent,
            (false, true) => Self::UrgentNotImportant,
            (false, false) => Self::NeitherUrgentNorImportant,
        }
    }

    /// Returns the quadrant's caption.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ImportantUrgent => "Important & Urgent",
            Self::ImportantNotUrgent => "Important, Not Urgent",
            Self::UrgentNotImportant => "Urgent, Not Important",
            Self::NeitherUrgentNorImportant => "Neither",
        }
    }

    /// Returns `true` for the two quadrants on the right-hand side.
    #[must_use]
    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::ImportantUrgent | Self::UrgentNotImportant)
    }

    /// Returns `true` for the two quadrants in the top half.
    #[must_use]
    pub const fn is_important(self) -> bool {
        matches!(self, Self::ImportantUrgent | Self::ImportantNotUrgent)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
