//! Output-space geometry shared by the tracer, simplifier and merger.

use serde::{Deserialize, Serialize};

/// Tolerance (per axis, output units) under which two points are the same.
pub const POINT_EPSILON: f64 = 0.01;

/// A point in output space.
///
/// Serializes as a `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether both coordinates agree within [`POINT_EPSILON`].
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < POINT_EPSILON && (self.y - other.y).abs() < POINT_EPSILON
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// An ordered point sequence.
pub type Path = Vec<Point>;

/// Output-space bounding rectangle of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[Point; 4]", from = "[Point; 4]")]
pub struct Perimeter {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Perimeter {
    /// Corners in clockwise order starting top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }

    pub fn is_top(&self, p: &Point) -> bool {
        (p.y - self.top).abs() < POINT_EPSILON
    }

    pub fn is_bottom(&self, p: &Point) -> bool {
        (p.y - self.bottom).abs() < POINT_EPSILON
    }

    pub fn is_left(&self, p: &Point) -> bool {
        (p.x - self.left).abs() < POINT_EPSILON
    }

    pub fn is_right(&self, p: &Point) -> bool {
        (p.x - self.right).abs() < POINT_EPSILON
    }

    /// Whether the point lies on any side of the rectangle.
    pub fn contains_on_edge(&self, p: &Point) -> bool {
        self.is_top(p) || self.is_bottom(p) || self.is_left(p) || self.is_right(p)
    }

    /// The corner reached by walking clockwise from a point on the perimeter.
    ///
    /// Returns `None` when the point is not on the perimeter.
    pub fn next_corner_clockwise(&self, p: &Point) -> Option<Point> {
        if self.is_top(p) && !self.is_right(p) {
            Some(Point::new(self.right, self.top))
        } else if self.is_left(p) {
            Some(Point::new(self.left, self.top))
        } else if self.is_bottom(p) {
            Some(Point::new(self.left, self.bottom))
        } else if self.is_right(p) {
            Some(Point::new(self.right, self.bottom))
        } else {
            None
        }
    }
}

impl From<Perimeter> for [Point; 4] {
    fn from(p: Perimeter) -> Self {
        p.corners()
    }
}

impl From<[Point; 4]> for Perimeter {
    fn from(c: [Point; 4]) -> Self {
        Self {
            left: c[0].x,
            top: c[0].y,
            right: c[2].x,
            bottom: c[2].y,
        }
    }
}

/// Whether `candidate` lies on the axis-aligned leg from `from` to `to`.
///
/// Endpoints count as on the leg. A leg that is neither horizontal nor
/// vertical never contains anything.
pub fn on_leg(from: &Point, to: &Point, candidate: &Point) -> bool {
    if (from.x - to.x).abs() < POINT_EPSILON {
        (from.x - candidate.x).abs() < POINT_EPSILON
            && (candidate.y - from.y) * (to.y - candidate.y) >= 0.0
    } else if (from.y - to.y).abs() < POINT_EPSILON {
        (from.y - candidate.y).abs() < POINT_EPSILON
            && (candidate.x - from.x) * (to.x - candidate.x) >= 0.0
    } else {
        false
    }
}
