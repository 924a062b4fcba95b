//! Conversion between positions on the rendered grid and matrix coordinates.
//!
//! The grid's content box is divided into 12 cells horizontally (13 vertical
//! grid lines) and 6 cells vertically (7 horizontal grid lines). A coordinate
//! maps to the centre of its cell, half a cell in from the grid line, so that
//! rounding back to the nearest cell is exact.
//!
//! Positions are offsets from the top-left corner of the rectangle, in
//! whatever unit the renderer measures in. Importance grows upwards: the most
//! important row is at the top.

use eisen_protocol::{Coordinate, Importance, Urgency};

use crate::error::{MatrixError, Result};

/// Number of horizontal cells (gaps between the 13 vertical lines).
pub const URGENCY_CELLS: f64 = 12.0;

/// Number of vertical cells (gaps between the 7 horizontal lines).
pub const IMPORTANCE_CELLS: f64 = 6.0;

/// A position relative to the grid's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset, growing to the right.
    pub x: f64,
    /// Vertical offset, growing downwards.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The measured content box of the grid.
///
/// A `GridRect` always has a positive, finite width and height, so every
/// operation on it is total.
///
/// # Examples
///
/// ```
/// use eisen_matrix::{GridRect, Point};
/// use eisen_protocol::Coordinate;
///
/// let rect = GridRect::new(600.0, 300.0).unwrap();
/// let centre = rect.coordinate_to_position(Coordinate::CENTER);
/// assert_eq!(centre, Point::new(325.0, 175.0));
/// assert_eq!(rect.position_to_coordinate(centre), Coordinate::CENTER);
///
/// assert!(GridRect::new(0.0, 300.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRect {
    width: f64,
    height: f64,
}

impl GridRect {
    /// Creates a rectangle from its measured size.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DegenerateRect`] if either dimension is zero,
    /// negative, NaN or infinite. Callers should defer layout until the grid
    /// has been measured.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(MatrixError::DegenerateRect { width, height })
        }
    }

    /// Returns the width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Returns the height.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Returns the width of one cell.
    #[must_use]
    pub fn cell_width(&self) -> f64 {
        self.width / URGENCY_CELLS
    }

    /// Returns the height of one cell.
    #[must_use]
    pub fn cell_height(&self) -> f64 {
        self.height / IMPORTANCE_CELLS
    }

    /// Returns the centre of the cell a coordinate snaps to.
    ///
    /// Note that the most urgent column and the least important row sit half
    /// a cell past the right and bottom grid lines respectively.
    #[must_use]
    pub fn coordinate_to_position(&self, coordinate: Coordinate) -> Point {
        let (cw, ch) = (self.cell_width(), self.cell_height());
        let column = f64::from(coordinate.urgency.value());
        let row = f64::from(Importance::MAX.value() - coordinate.importance.value());
        Point {
            x: cw / 2.0 + column * cw,
            y: ch / 2.0 + row * ch,
        }
    }

    /// Returns the coordinate nearest to a position.
    ///
    /// Never fails: positions outside the rectangle (fast drags routinely
    /// report them) clamp to the nearest edge, and NaN clamps to the lowest
    /// value of each axis.
    #[must_use]
    pub fn position_to_coordinate(&self, point: Point) -> Coordinate {
        let (cw, ch) = (self.cell_width(), self.cell_height());
        let column = nearest_step(point.x - cw / 2.0, cw);
        let row = nearest_step(point.y - ch / 2.0, ch);

        let urgency = column.map_or(Urgency::MIN, Urgency::clamped);
        let importance = row.map_or(Importance::MIN, |row| {
            Importance::clamped(i64::from(Importance::MAX.value()).saturating_sub(row))
        });
        Coordinate::new(urgency, importance)
    }
}

/// Rounds `offset / cell` to the nearest whole step, or `None` for NaN.
///
/// Infinite offsets saturate to `i64::MIN` / `i64::MAX`.
fn nearest_step(offset: f64, cell: f64) -> Option<i64> {
    let steps = (offset / cell).round();
    if steps.is_nan() {
        None
    } else {
        Some(steps as i64)
    }
}

/// Offsets of the grid lines drawn across the matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLines {
    /// X offsets of the 13 vertical lines, left to right.
    pub vertical: [f64; 13],
    /// Y offsets of the 7 horizontal lines, top to bottom.
    pub horizontal: [f64; 7],
}

/// Computes the grid line offsets for a rectangle.
///
/// ```
/// use eisen_matrix::{GridRect, axis_lines};
///
/// let lines = axis_lines(GridRect::new(120.0, 60.0).unwrap());
/// assert_eq!(lines.vertical[0], 0.0);
/// assert_eq!(lines.vertical[12], 120.0);
/// assert_eq!(lines.horizontal[3], 30.0);
/// ```
#[must_use]
pub fn axis_lines(rect: GridRect) -> AxisLines {
    let (cw, ch) = (rect.cell_width(), rect.cell_height());
    AxisLines {
        vertical: std::array::from_fn(|i| i as f64 * cw),
        horizontal: std::array::from_fn(|i| i as f64 * ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> GridRect {
        GridRect::new(600.0, 300.0).expect("valid rect")
    }

    #[test]
    fn rejects_degenerate_rects() {
        assert!(GridRect::new(0.0, 10.0).is_err());
        assert!(GridRect::new(10.0, -1.0).is_err());
        assert!(GridRect::new(f64::NAN, 10.0).is_err());
        assert!(GridRect::new(10.0, f64::INFINITY).is_err());
        assert!(GridRect::new(0.5, 0.5).is_ok());
    }

    #[test]
    fn centre_of_a_600_by_300_grid() {
        let rect = rect();
        assert_eq!(rect.cell_width(), 50.0);
        assert_eq!(rect.cell_height(), 50.0);

        let point = rect.coordinate_to_position(Coordinate::clamped(6, 4));
        assert_eq!(point, Point::new(325.0, 175.0));
        assert_eq!(rect.position_to_coordinate(point), Coordinate::clamped(6, 4));
    }

    #[test]
    fn far_top_left_clamps_to_least_urgent_most_important() {
        let coord = rect().position_to_coordinate(Point::new(-100.0, -100.0));
        assert_eq!(coord, Coordinate::clamped(0, 7));
    }

    #[test]
    fn far_bottom_right_clamps_to_most_urgent_least_important() {
        let coord = rect().position_to_coordinate(Point::new(10_000.0, 10_000.0));
        assert_eq!(coord, Coordinate::clamped(12, 1));
    }

    #[test]
    fn corners_of_the_axes() {
        let rect = rect();
        assert_eq!(
            rect.coordinate_to_position(Coordinate::clamped(0, 7)),
            Point::new(25.0, 25.0)
        );
        assert_eq!(
            rect.coordinate_to_position(Coordinate::clamped(12, 1)),
            Point::new(625.0, 325.0)
        );
    }

    #[test]
    fn snaps_to_nearest_cell() {
        let rect = rect();
        // 49px right of urgency 3's centre is still closer to 4 than to 3.
        let coord = rect.position_to_coordinate(Point::new(175.0 + 49.0, 175.0));
        assert_eq!(coord.urgency, Urgency::clamped(4));
        let coord = rect.position_to_coordinate(Point::new(175.0 + 20.0, 175.0));
        assert_eq!(coord.urgency, Urgency::clamped(3));
    }

    #[test]
    fn nan_clamps_to_axis_minimum() {
        let coord = rect().position_to_coordinate(Point::new(f64::NAN, f64::NAN));
        assert_eq!(coord, Coordinate::new(Urgency::MIN, Importance::MIN));
    }

    #[test]
    fn infinities_clamp() {
        let rect = rect();
        let coord = rect.position_to_coordinate(Point::new(f64::INFINITY, f64::NEG_INFINITY));
        assert_eq!(coord, Coordinate::new(Urgency::MAX, Importance::MAX));
        let coord = rect.position_to_coordinate(Point::new(f64::NEG_INFINITY, f64::INFINITY));
        assert_eq!(coord, Coordinate::new(Urgency::MIN, Importance::MIN));
    }

    #[test]
    fn axis_lines_span_the_rect() {
        let lines = axis_lines(rect());
        assert_eq!(lines.vertical[6], 300.0);
        assert_eq!(lines.vertical[12], 600.0);
        assert_eq!(lines.horizontal[0], 0.0);
        assert_eq!(lines.horizontal[6], 300.0);
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_rect()(width in 0.01f64..10_000.0, height in 0.01f64..10_000.0) -> GridRect {
            GridRect::new(width, height).expect("positive size")
        }
    }

    proptest! {
        /// Every coordinate survives a trip through pixel space.
        #[test]
        fn roundtrip(rect in arb_rect(), urgency in 0i64..=12, importance in 1i64..=7) {
            let coord = Coordinate::clamped(urgency, importance);
            let point = rect.coordinate_to_position(coord);
            prop_assert_eq!(rect.position_to_coordinate(point), coord);
        }

        /// Arbitrary positions always land on a valid coordinate.
        #[test]
        fn clamping(rect in arb_rect(), x in any::<f64>(), y in any::<f64>()) {
            let coord = rect.position_to_coordinate(Point::new(x, y));
            prop_assert!(coord.urgency >= Urgency::MIN && coord.urgency <= Urgency::MAX);
            prop_assert!(coord.importance >= Importance::MIN && coord.importance <= Importance::MAX);
        }

        /// Positions stay within half a cell of the rectangle.
        #[test]
        fn positions_near_rect(rect in arb_rect(), urgency in 0i64..=12, importance in 1i64..=7) {
            let point = rect.coordinate_to_position(Coordinate::clamped(urgency, importance));
            prop_assert!(point.x > 0.0 && point.x < rect.width() + rect.cell_width());
            prop_assert!(point.y > 0.0 && point.y < rect.height() + rect.cell_height());
        }
    }
}
