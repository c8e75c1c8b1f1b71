//! Chaikin corner cutting for output paths.

use crate::geometry::{Path, Point};

/// Smooth a path with `passes` rounds of Chaikin corner cutting.
///
/// Each segment is replaced by its quarter and three-quarter points. Open
/// paths keep both endpoints so they still meet the grid boundary. Paths
/// with fewer than three points are returned unchanged.
pub fn smooth_path(points: &[Point], closed: bool, passes: u32) -> Path {
    if passes == 0 || points.len() < 3 {
        return points.to_vec();
    }

    let mut points = points.to_vec();
    for _ in 0..passes {
        let n = points.len();
        let segments = if closed { n } else { n - 1 };
        let mut next = Vec::with_capacity(segments * 2 + 2);

        if !closed {
            next.push(points[0]);
        }
        for i in 0..segments {
            let p1 = points[i];
            let p2 = points[(i + 1) % n];
            next.push(Point::new(0.75 * p1.x + 0.25 * p2.x, 0.75 * p1.y + 0.25 * p2.y));
            next.push(Point::new(0.25 * p1.x + 0.75 * p2.x, 0.25 * p1.y + 0.75 * p2.y));
        }
        if !closed {
            next.push(points[n - 1]);
        }

        points = next;
    }
    points
}
