//! Geometric primitives for line diagram layout and path generation.
//!
//! This module provides the geometric types used throughout stripmap for
//! positioning stops and describing trip polylines.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`PathPoint`] - A 3D polyline vertex as consumed by the renderer (z is always 0 for layouts)
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`polyline_length`] - Cumulative planar length of a polyline
//!
//! # Coordinate System
//!
//! Stripmap uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **X-axis**: Increases rightward; a stop's layer maps onto this axis
//! - **Y-axis**: Increases downward; lanes and direction bands map onto this axis
//!
//! Coordinates are `f64` so that path-length equalization can compare
//! lengths against a small epsilon without accumulated rounding drift.

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use stripmap_core::geometry::Point;
/// let p1 = Point::new(100.0, 0.0);
/// let p2 = Point::new(0.0, 60.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 100.0);
/// assert_eq!(sum.y(), 60.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Euclidean distance from the origin
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Lifts this point into a path vertex on the z = 0 plane
    pub fn to_path_point(self) -> PathPoint {
        PathPoint::new(self.x, self.y, 0.0)
    }
}

/// A polyline vertex handed to the rendering layer.
///
/// Serializes as a plain `[x, y, z]` array, the shape GPU path layers expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPoint([f64; 3]);

impl PathPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    pub fn x(self) -> f64 {
        self.0[0]
    }

    pub fn y(self) -> f64 {
        self.0[1]
    }

    pub fn z(self) -> f64 {
        self.0[2]
    }

    /// Returns the planar projection of this vertex
    pub fn to_point(self) -> Point {
        Point::new(self.x(), self.y())
    }

    /// Planar (x, y) distance to another vertex; z is ignored.
    pub fn planar_distance(self, other: PathPoint) -> f64 {
        (other.x() - self.x()).hypot(other.y() - self.y())
    }

    /// Component-wise vector from `self` to `other`
    pub fn vector_to(self, other: PathPoint) -> [f64; 3] {
        [
            other.x() - self.x(),
            other.y() - self.y(),
            other.z() - self.z(),
        ]
    }

    /// Moves this vertex a planar `distance` along the given direction vector.
    ///
    /// The vector is scaled by its planar length, so the move covers exactly
    /// `distance` in (x, y) and z changes proportionally. `None` is returned
    /// when the vector has no planar component.
    pub fn offset_along(self, direction: [f64; 3], distance: f64) -> Option<PathPoint> {
        let [dx, dy, dz] = direction;
        let length = dx.hypot(dy);
        if length == 0.0 || !length.is_finite() {
            return None;
        }
        Some(PathPoint::new(
            self.x() + dx / length * distance,
            self.y() + dy / length * distance,
            self.z() + dz / length * distance,
        ))
    }

    pub fn as_array(self) -> [f64; 3] {
        self.0
    }
}

impl From<[f64; 3]> for PathPoint {
    fn from(value: [f64; 3]) -> Self {
        Self(value)
    }
}

/// Computes the cumulative planar length of a polyline.
///
/// Paths with fewer than two vertices have length zero.
///
/// # Examples
///
/// ```
/// # use stripmap_core::geometry::{PathPoint, polyline_length};
/// let path = [
///     PathPoint::new(0.0, 0.0, 0.0),
///     PathPoint::new(3.0, 4.0, 0.0),
///     PathPoint::new(3.0, 10.0, 0.0),
/// ];
/// assert_eq!(polyline_length(&path), 11.0);
/// ```
pub fn polyline_length(path: &[PathPoint]) -> f64 {
    path.windows(2)
        .map(|pair| pair[0].planar_distance(pair[1]))
        .sum()
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a degenerate bounds covering a single point
    pub fn from_point(point: Point) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    /// Computes the bounds enclosing all given points, or `None` when empty
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points
            .into_iter()
            .map(Self::from_point)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the smallest bounds containing both `self` and `other`
    pub fn merge(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `margin` on every side
    pub fn inflate(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn path_point_strategy() -> impl Strategy<Value = PathPoint> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0, -10.0f64..10.0)
            .prop_map(|(x, y, z)| PathPoint::new(x, y, z))
    }

    /// Reversing a polyline never changes its length.
    fn check_length_is_direction_independent(path: Vec<PathPoint>) -> Result<(), TestCaseError> {
        let mut reversed = path.clone();
        reversed.reverse();
        prop_assert!(approx_eq!(
            f64,
            polyline_length(&path),
            polyline_length(&reversed),
            epsilon = 1e-6
        ));
        Ok(())
    }

    /// Moving along a direction by `d` produces a vertex exactly `d` away.
    fn check_offset_distance(
        origin: PathPoint,
        target: PathPoint,
        distance: f64,
    ) -> Result<(), TestCaseError> {
        prop_assume!(origin.planar_distance(target) > 1e-3);
        let moved = origin
            .offset_along(origin.vector_to(target), distance)
            .expect("non-zero direction");
        prop_assert!(approx_eq!(
            f64,
            origin.planar_distance(moved),
            distance,
            epsilon = 1e-6
        ));
        Ok(())
    }

    proptest! {
        #[test]
        fn length_is_direction_independent(path in prop::collection::vec(path_point_strategy(), 0..20)) {
            check_length_is_direction_independent(path)?;
        }

        #[test]
        fn offset_distance(
            origin in path_point_strategy(),
            target in path_point_strategy(),
            distance in 0.0f64..500.0,
        ) {
            check_offset_distance(origin, target, distance)?;
        }
    }
}
