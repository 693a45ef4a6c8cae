//! Points and the Euclidean distance between them.

/// A named location in the plane.
///
/// The identifier is opaque: it is carried through from the problem file
/// and never interpreted. Routes refer to points by their index in the
/// owning [`ProblemInstance`](super::ProblemInstance), not by `id`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Identifier from the problem file.
    pub id: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }

    /// Straight-line distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(self, other)
    }
}

/// Euclidean distance `sqrt((x1-x2)^2 + (y1-y2)^2)`.
///
/// NaN and infinite coordinates propagate per IEEE 754.
#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
