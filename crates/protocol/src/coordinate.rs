//! Discrete matrix coordinates.
//!
//! A task sits on a 13 × 7 grid: [`Urgency`] runs along the horizontal axis
//! (0 = least urgent, 12 = most urgent) and [`Importance`] along the vertical
//! axis (1 = least important, 7 = most important).
//!
//! Both axes are newtypes whose only constructors clamp, so an out-of-range
//! value can never be observed once it has been turned into a coordinate.
//! Deserialization clamps as well, which keeps malformed collaborator data
//! from leaking into geometry calculations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display labels for each urgency level, indexed by the urgency value.
pub const URGENCY_LABELS: [&str; 13] = [
    "1 year", "6 months", "3 months", "1 month", "1 week", "3 days", "1 day", "10 hours", "4 hours",
    "2 hours", "1 hour", "30 min", "15 min",
];

/// How soon a task needs attention.
///
/// # Examples
///
/// ```
/// use eisen_protocol::Urgency;
///
/// assert_eq!(Urgency::clamped(-3), Urgency::MIN);
/// assert_eq!(Urgency::clamped(40), Urgency::MAX);
/// assert_eq!(Urgency::clamped(6).value(), 6);
/// assert_eq!(Urgency::MAX.label(), "15 min");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Urgency(u8);

impl Urgency {
    /// The least urgent level ("1 year").
    pub const MIN: Self = Self(0);
    /// The most urgent level ("15 min").
    pub const MAX: Self = Self(12);
    /// The vertical centre line of the matrix.
    pub const CENTER: Self = Self(6);

    /// Creates an urgency, clamping `value` into `0..=12`.
    #[must_use]
    pub const fn clamped(value: i64) -> Self {
        if value < Self::MIN.0 as i64 {
            Self::MIN
        } else if value > Self::MAX.0 as i64 {
            Self::MAX
        } else {
            Self(value as u8)
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the human-readable deadline label for this level.
    #[must_use]
    pub const fn label(self) -> &'static str {
        URGENCY_LABELS[self.0 as usize]
    }

    /// Moves by `delta` levels, saturating at both ends.
    ///
    /// ```
    /// use eisen_protocol::Urgency;
    ///
    /// assert_eq!(Urgency::MAX.step(1), Urgency::MAX);
    /// assert_eq!(Urgency::MIN.step(2).value(), 2);
    /// ```
    #[must_use]
    pub const fn step(self, delta: i64) -> Self {
        Self::clamped(self.0 as i64 + delta)
    }

    /// Iterates over every urgency level in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Self::CENTER
    }
}

impl From<i64> for Urgency {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Urgency> for u8 {
    fn from(value: Urgency) -> Self {
        value.0
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How much a task matters, in stars.
///
/// # Examples
///
/// ```
/// use eisen_protocol::Importance;
///
/// assert_eq!(Importance::clamped(0), Importance::MIN);
/// assert_eq!(Importance::clamped(9), Importance::MAX);
/// assert_eq!(Importance::clamped(4).label(), "4★");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Importance(u8);

impl Importance {
    /// One star.
    pub const MIN: Self = Self(1);
    /// Seven stars.
    pub const MAX: Self = Self(7);
    /// The horizontal centre line of the matrix.
    pub const CENTER: Self = Self(4);

    /// Creates an importance, clamping `value` into `1..=7`.
    #[must_use]
    pub const fn clamped(value: i64) -> Self {
        if value < Self::MIN.0 as i64 {
            Self::MIN
        } else if value > Self::MAX.0 as i64 {
            Self::MAX
        } else {
            Self(value as u8)
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the zero-based index of this level (importance 1 → 0).
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - Self::MIN.0) as usize
    }

    /// Returns the star label, e.g. `"5★"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{}★", self.0)
    }

    /// Moves by `delta` stars, saturating at both ends.
    #[must_use]
    pub const fn step(self, delta: i64) -> Self {
        Self::clamped(self.0 as i64 + delta)
    }

    /// Iterates over every importance level in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self::CENTER
    }
}

impl From<i64> for Importance {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Importance> for u8 {
    fn from(value: Importance) -> Self {
        value.0
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}★", self.0)
    }
}

/// A discrete position on the matrix.
///
/// # Examples
///
/// ```
/// use eisen_protocol::{Coordinate, Importance, Urgency};
///
/// let center = Coordinate::CENTER;
/// assert_eq!(center.urgency, Urgency::CENTER);
/// assert_eq!(center.importance, Importance::CENTER);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Horizontal axis.
    pub urgency: Urgency,
    /// Vertical axis.
    pub importance: Importance,
}

impl Coordinate {
    /// The intersection of both centre lines.
    pub const CENTER: Self = Self {
        urgency: Urgency::CENTER,
        importance: Importance::CENTER,
    };

    /// Creates a coordinate from already-validated axis values.
    #[must_use]
    pub const fn new(urgency: Urgency, importance: Importance) -> Self {
        Self {
            urgency,
            importance,
        }
    }

    /// Creates a coordinate from raw integers, clamping both axes.
    #[must_use]
    pub const fn clamped(urgency: i64, importance: i64) -> Self {
        Self {
            urgency: Urgency::clamped(urgency),
            importance: Importance::clamped(importance),
        }
    }
}
