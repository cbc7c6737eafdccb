#![forbid(unsafe_code)]

//! Axis projection.
//!
//! Reduces 2D geometry to a scalar along the layout axis and lifts scalars
//! back to 2D offsets. Everything downstream (extents, hit testing, offset
//! correction, autoscroll) is written once against scalars and parameterized
//! by an [`Axis`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point, Size, Vector};

/// The direction items are stacked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Top to bottom. Projects onto `y` / `height`.
    #[default]
    Vertical,
    /// Left to right. Projects onto `x` / `width`.
    Horizontal,
}

impl Axis {
    /// Scalar position of a point along this axis.
    #[inline]
    #[must_use]
    pub const fn project_point(self, point: Point) -> f64 {
        match self {
            Self::Vertical => point.y,
            Self::Horizontal => point.x,
        }
    }

    /// Scalar length of a size along this axis.
    #[inline]
    #[must_use]
    pub const fn project_size(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Scalar component of a vector along this axis.
    #[inline]
    #[must_use]
    pub const fn project_vector(self, vector: Vector) -> f64 {
        match self {
            Self::Vertical => vector.dy,
            Self::Horizontal => vector.dx,
        }
    }

    /// Lift a scalar to a 2D offset; the cross-axis component is zero.
    #[inline]
    #[must_use]
    pub const fn to_offset(self, value: f64) -> Vector {
        match self {
            Self::Vertical => Vector::new(0.0, value),
            Self::Horizontal => Vector::new(value, 0.0),
        }
    }

    /// Lift a scalar to a point whose cross-axis coordinate is taken from
    /// `cross`.
    #[inline]
    #[must_use]
    pub const fn to_point(self, value: f64, cross: Point) -> Point {
        match self {
            Self::Vertical => Point::new(cross.x, value),
            Self::Horizontal => Point::new(value, cross.y),
        }
    }

    /// `(min, max)` of a rectangle along this axis.
    #[inline]
    #[must_use]
    pub fn span_of(self, bounds: Bounds) -> (f64, f64) {
        let min = self.project_point(bounds.origin);
        (min, min + self.project_size(bounds.size))
    }

    /// The perpendicular axis.
    #[inline]
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_projects_y() {
        let axis = Axis::Vertical;
        assert_eq!(axis.project_point(Point::new(3.0, 9.0)), 9.0);
        assert_eq!(axis.project_size(Size::new(40.0, 12.0)), 12.0);
        assert_eq!(axis.project_vector(Vector::new(1.0, -5.0)), -5.0);
        assert_eq!(axis.to_offset(7.0), Vector::new(0.0, 7.0));
    }

    #[test]
    fn horizontal_projects_x() {
        let axis = Axis::Horizontal;
        assert_eq!(axis.project_point(Point::new(3.0, 9.0)), 3.0);
        assert_eq!(axis.project_size(Size::new(40.0, 12.0)), 40.0);
        assert_eq!(axis.project_vector(Vector::new(1.0, -5.0)), 1.0);
        assert_eq!(axis.to_offset(7.0), Vector::new(7.0, 0.0));
    }

    #[test]
    fn span_of_bounds() {
        let b = Bounds::new(10.0, 100.0, 50.0, 25.0);
        assert_eq!(Axis::Vertical.span_of(b), (100.0, 125.0));
        assert_eq!(Axis::Horizontal.span_of(b), (10.0, 60.0));
    }

    #[test]
    fn to_point_keeps_cross_coordinate() {
        let cross = Point::new(4.0, 8.0);
        assert_eq!(Axis::Vertical.to_point(20.0, cross), Point::new(4.0, 20.0));
        assert_eq!(Axis::Horizontal.to_point(20.0, cross), Point::new(20.0, 8.0));
    }

    #[test]
    fn cross_is_involution() {
        for axis in [Axis::Vertical, Axis::Horizontal] {
            assert_eq!(axis.cross().cross(), axis);
            assert_ne!(axis.cross(), axis);
        }
    }

    #[test]
    fn default_is_vertical() {
        assert_eq!(Axis::default(), Axis::Vertical);
    }
}
