// SPDX-License-Identifier: MIT OR Apache-2.0
//! 2D points, waypoint paths and linear interpolation.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// Linear interpolation between two scalars.
///
/// `progress` is expected in `[0, 1]` but is not clamped.
pub fn lerp(start: f32, end: f32, progress: f32) -> f32 {
    start + (end - start) * progress
}

/// A 2D coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a point, rejecting NaN and infinite coordinates
    pub fn try_new(x: f32, y: f32) -> Result<Self, GeometryError> {
        let point = Self::new(x, y);
        point.validate()?;
        Ok(point)
    }

    /// Check that both coordinates are finite
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(GeometryError::NonFiniteCoordinate { x: self.x, y: self.y })
        }
    }

    /// Whether both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Interpolate towards `end` by `progress`
    pub fn lerp(self, end: Point, progress: f32) -> Point {
        Point::new(lerp(self.x, end.x, progress), lerp(self.y, end.y, progress))
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Offset this point by a delta
    pub fn offset(self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// An ordered sequence of waypoints.
///
/// Paths are immutable once built. Reversing a direction produces a new path
/// through [`Path::reversed`]. Movement requires at least two points; shorter
/// paths are representable so that degenerate walks can be expressed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Create a path from waypoints, rejecting non-finite coordinates
    pub fn new(points: impl Into<Vec<Point>>) -> Result<Self, GeometryError> {
        let points = points.into();
        for point in &points {
            point.validate()?;
        }
        Ok(Self { points })
    }

    /// Create a straight two-point path
    pub fn line(start: Point, end: Point) -> Result<Self, GeometryError> {
        Self::new(vec![start, end])
    }

    /// Waypoints in order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no waypoints
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of point-to-point segments
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Whether the path is long enough to move along
    pub fn is_traversable(&self) -> bool {
        self.points.len() >= 2
    }

    /// First waypoint
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Last waypoint
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Iterate over `(from, to)` pairs
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Total Euclidean length
    pub fn length(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance_to(b)).sum()
    }

    /// A copy of this path walked end to start
    pub fn reversed(&self) -> Path {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }
}

impl TryFrom<Vec<Point>> for Path {
    type Error = GeometryError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<Path> for Vec<Point> {
    fn from(path: Path) -> Self {
        path.points
    }
}
