//! How a task looks on the matrix.
//!
//! Importance picks the hue, urgency picks the opacity: the more urgent a
//! task, the more solid its chip.

use std::fmt;

use eisen_protocol::{Importance, Task, Urgency};

use crate::error::{MatrixError, Result};

/// An opaque 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Base colours, indexed by importance (1★ first, 7★ last).
pub const PALETTE: [Rgb; 7] = [
    Rgb::new(0x44, 0x44, 0xff),
    Rgb::new(0x00, 0x88, 0xcc),
    Rgb::new(0x00, 0xcc, 0x88),
    Rgb::new(0x88, 0xcc, 0x00),
    Rgb::new(0xff, 0xcc, 0x00),
    Rgb::new(0xff, 0x88, 0x00),
    Rgb::new(0xff, 0x44, 0x44),
];

/// Lowest opacity, used for the least urgent tasks.
pub const MIN_OPACITY: f64 = 0.4;

/// Returns the base colour for an importance level.
#[must_use]
pub const fn palette_color(importance: Importance) -> Rgb {
    PALETTE[importance.index()]
}

/// Returns the opacity for an urgency level, from 0.4 up to 1.0.
///
/// ```
/// use eisen_matrix::opacity_for;
/// use eisen_protocol::Urgency;
///
/// assert_eq!(opacity_for(Urgency::MIN), 0.4);
/// assert_eq!(opacity_for(Urgency::MAX), 1.0);
/// ```
#[must_use]
pub fn opacity_for(urgency: Urgency) -> f64 {
    let fraction = f64::from(urgency.value()) / f64::from(Urgency::MAX.value());
    MIN_OPACITY + fraction * (1.0 - MIN_OPACITY)
}

/// A palette colour with an alpha channel.
///
/// Displays as `#rrggbbaa`.
///
/// # Examples
///
/// ```
/// use eisen_matrix::color_for;
/// use eisen_protocol::{Importance, Urgency};
///
/// let color = color_for(Importance::MAX, Urgency::MIN);
/// assert_eq!(color.to_string(), "#ff444466");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskColor {
    /// The opaque palette colour.
    pub base: Rgb,
    /// Alpha, `round(opacity * 255)`.
    pub alpha: u8,
}

impl TaskColor {
    /// Composites this colour over an opaque background.
    ///
    /// Terminals cannot draw translucent cells, so chips are blended against
    /// the configured background instead.
    ///
    /// ```
    /// use eisen_matrix::{Rgb, TaskColor};
    ///
    /// let color = TaskColor { base: Rgb::new(255, 255, 255), alpha: 0 };
    /// assert_eq!(color.blend_over(Rgb::new(10, 20, 30)), Rgb::new(10, 20, 30));
    /// ```
    #[must_use]
    pub fn blend_over(&self, background: Rgb) -> Rgb {
        let alpha = f64::from(self.alpha) / 255.0;
        let mix = |fg: u8, bg: u8| {
            (alpha * f64::from(fg) + (1.0 - alpha) * f64::from(bg)).round() as u8
        };
        Rgb {
            r: mix(self.base.r, background.r),
            g: mix(self.base.g, background.g),
            b: mix(self.base.b, background.b),
        }
    }
}

impl fmt::Display for TaskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02x}", self.base, self.alpha)
    }
}

/// Returns the colour of a task at the given position.
#[must_use]
pub fn color_for(importance: Importance, urgency: Urgency) -> TaskColor {
    TaskColor {
        base: palette_color(importance),
        alpha: (opacity_for(urgency) * 255.0).round() as u8,
    }
}

/// Returns the glyph drawn for a task: the first character of its title.
///
/// # Errors
///
/// Returns [`MatrixError::EmptyTitle`] if the title is empty. Titles are
/// validated before tasks reach the matrix, so this points at bad data.
pub fn label_for(task: &Task) -> Result<char> {
    task.label().map_err(|_| MatrixError::EmptyTitle(task.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_indexed_by_importance() {
        assert_eq!(palette_color(Importance::MIN).to_string(), "#4444ff");
        assert_eq!(palette_color(Importance::CENTER).to_string(), "#88cc00");
        assert_eq!(palette_color(Importance::MAX).to_string(), "#ff4444");
    }

    #[test]
    fn alpha_suffix_endpoints() {
        assert_eq!(color_for(Importance::MIN, Urgency::MAX).to_string(), "#4444ffff");
        assert_eq!(color_for(Importance::MAX, Urgency::MIN).to_string(), "#ff444466");
        // 0.4 + 0.5 * 0.6 = 0.7 -> 178.5 -> b3
        assert_eq!(color_for(Importance::CENTER, Urgency::CENTER).alpha, 0xb3);
    }

    #[test]
    fn blend_with_full_alpha_keeps_base() {
        let color = color_for(Importance::MAX, Urgency::MAX);
        assert_eq!(color.blend_over(Rgb::new(0, 0, 0)), PALETTE[6]);
    }

    #[test]
    fn blend_mixes_channels() {
        let color = TaskColor {
            base: Rgb::new(200, 100, 0),
            alpha: 102,
        };
        // alpha 0.4 over black
        assert_eq!(color.blend_over(Rgb::default()), Rgb::new(80, 40, 0));
    }

    #[test]
    fn label_is_first_title_character() {
        let task = Task::new(9, "Plan trip", Urgency::MIN, Importance::MIN);
        assert_eq!(label_for(&task), Ok('P'));
    }

    #[test]
    fn empty_title_is_surfaced() {
        let task = Task::new(9, "", Urgency::MIN, Importance::MIN);
        assert_eq!(label_for(&task), Err(MatrixError::EmptyTitle(9)));
    }
}
