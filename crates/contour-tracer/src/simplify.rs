//! Collapsing of near-coincident points.
//!
//! A contour passing very close to a grid node produces clusters of points a
//! tiny distance apart. Each cluster is replaced by one representative
//! point so the drawn line does not kink.

use crate::geometry::Point;

/// Fraction of the mean segment length under which points are merged, at
/// smoothing 1.
pub const DISTANCE_FACTOR: f64 = 0.2;

/// Merge threshold for a raw trace: mean segment length scaled by
/// `DISTANCE_FACTOR * smoothing`.
pub fn distance_threshold(points: &[Point], smoothing: f64) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let total: f64 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
    total / (points.len() - 1) as f64 * DISTANCE_FACTOR * smoothing
}

/// Collapse runs of points whose summed segment lengths stay under
/// `threshold`.
///
/// Open paths keep their end points. Closed paths are given without the
/// repeated closing point and may merge across the seam. Repeats until no
/// run is left, so applying it again with the same threshold changes
/// nothing.
pub fn simplify(points: Vec<Point>, closed: bool, threshold: f64) -> Vec<Point> {
    let mut points = points;
    loop {
        let collapsed = if closed {
            collapse_closed(&points, threshold)
        } else {
            collapse_sequence(&points, threshold, true)
        };
        match collapsed {
            Some(next) => points = next,
            None => return points,
        }
    }
}

/// One pass over an open sequence; `None` when nothing merged.
fn collapse_sequence(points: &[Point], threshold: f64, keep_ends: bool) -> Option<Vec<Point>> {
    if points.len() < 2 || !(threshold > 0.0) {
        return None;
    }

    let last = points.len() - 1;
    let mut out = Vec::with_capacity(points.len());
    let mut changed = false;
    let mut i = 0;

    while i <= last {
        let mut j = i;
        let mut span = 0.0;
        while j < last {
            let d = points[j].distance(&points[j + 1]);
            if span + d < threshold {
                span += d;
                j += 1;
            } else {
                break;
            }
        }

        if j == i {
            out.push(points[i]);
        } else {
            changed = true;
            let rep = if keep_ends && i == 0 {
                points[0]
            } else if keep_ends && j == last {
                points[last]
            } else {
                representative(&points[i..=j])
            };
            out.push(rep);
        }
        i = j + 1;
    }

    changed.then_some(out)
}

/// One pass over a loop; `None` when nothing merged.
fn collapse_closed(points: &[Point], threshold: f64) -> Option<Vec<Point>> {
    let n = points.len();
    if n < 2 || !(threshold > 0.0) {
        return None;
    }

    let segment = |k: usize| points[k].distance(&points[(k + 1) % n]);

    // Cut the loop at a long segment so no run crosses the cut. The closing
    // segment is preferred, which leaves the order untouched.
    let Some(cut) = std::iter::once(n - 1)
        .chain(0..n - 1)
        .find(|&k| segment(k) >= threshold)
    else {
        return Some(vec![representative(points)]);
    };

    let start = (cut + 1) % n;
    let rotated: Vec<Point> = points[start..].iter().chain(&points[..start]).copied().collect();
    collapse_sequence(&rotated, threshold, false)
}

/// Central point of a run, or the midpoint of the two central points.
fn representative(run: &[Point]) -> Point {
    let mid = run.len() / 2;
    if run.len() % 2 == 1 {
        run[mid]
    } else {
        run[mid - 1].midpoint(&run[mid])
    }
}
