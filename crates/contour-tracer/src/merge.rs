//! Edge path joining and fill boundary stitching.

use crate::anomaly::{report, Anomaly};
use crate::geometry::{on_leg, Path, Perimeter, Point};

/// Legs walked from a path end before giving up: the four corners, then the
/// remainder of the side the walk started on.
const PERIMETER_LEGS: usize = 5;

/// Add a finished open path to a level's edge paths, joining it to any
/// path it continues or that continues it.
///
/// Paths whose ends coincide are merged without repeating the shared
/// point. When the new path bridges the two ends of a single existing path,
/// the result is a loop and moves to `closed_paths`.
pub fn join_edge_path(edge_paths: &mut Vec<Path>, closed_paths: &mut Vec<Path>, mut path: Path) {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return;
    };

    let after = edge_paths
        .iter()
        .position(|p| p.first().is_some_and(|start| start.approx_eq(&last)));
    let before = edge_paths
        .iter()
        .position(|p| p.last().is_some_and(|end| end.approx_eq(&first)));

    match (before, after) {
        (Some(b), Some(a)) if a == b => {
            path.pop();
            path.remove(0);
            let mut ring = path;
            ring.append(&mut edge_paths.remove(a));
            if ring.len() >= 2 {
                closed_paths.push(ring);
            }
        }
        (Some(b), Some(a)) => {
            path.pop();
            path.remove(0);
            let mut tail = edge_paths.remove(a);
            let b = if b > a { b - 1 } else { b };
            edge_paths[b].append(&mut path);
            edge_paths[b].append(&mut tail);
        }
        (None, Some(a)) => {
            path.pop();
            path.append(&mut edge_paths[a]);
            edge_paths[a] = path;
        }
        (Some(b), None) => {
            path.remove(0);
            edge_paths[b].append(&mut path);
        }
        (None, None) => edge_paths.push(path),
    }
}

/// Stitch the edge paths of a level into rings around the region above the
/// level.
///
/// Each edge path is followed by walking clockwise along the perimeter to
/// the next edge path start, inserting perimeter corners on the way. Closed
/// paths are appended as extra rings so even-odd filling punches holes. If
/// there are no edge paths and the lower-left sample is not below the
/// level, the whole perimeter is the first ring.
///
/// Problems during the walk are reported and the rings built so far are
/// returned.
pub fn fill_boundary(
    edge_paths: &[Path],
    closed_paths: &[Path],
    perimeter: &Perimeter,
    lower_left: f64,
    level: f64,
    anomalies: &mut Vec<Anomaly>,
) -> Vec<Path> {
    let mut rings = Vec::new();
    if edge_paths.is_empty() && !(lower_left < level) {
        rings.push(perimeter.corners().to_vec());
    }

    let mut remaining: Vec<usize> = (0..edge_paths.len()).collect();
    let mut ring: Path = Vec::new();
    let mut i = 0;

    while !remaining.is_empty() {
        ring.extend_from_slice(&edge_paths[i]);
        remaining.retain(|&k| k != i);

        let next = match walk_perimeter(edge_paths, i, perimeter, &mut ring) {
            Ok(next) => next,
            Err(anomaly) => {
                report(anomalies, level, anomaly);
                break;
            }
        };

        if remaining.contains(&next) {
            i = next;
        } else {
            rings.push(std::mem::take(&mut ring));
            match remaining.first() {
                Some(&k) => i = k,
                None => break,
            }
        }
    }

    if !ring.is_empty() {
        rings.push(ring);
    }
    rings.extend(closed_paths.iter().cloned());
    rings
}

/// Walk clockwise from the end of edge path `from`, pushing corners onto
/// `ring` until a leg holds the start of an edge path. The start nearest
/// along the leg wins.
fn walk_perimeter(
    edge_paths: &[Path],
    from: usize,
    perimeter: &Perimeter,
    ring: &mut Path,
) -> Result<usize, Anomaly> {
    let Some(&last) = edge_paths[from].last() else {
        return Err(Anomaly::UnclosedPerimeter { path: from });
    };
    let mut end: Point = last;

    for _ in 0..PERIMETER_LEGS {
        let corner = perimeter
            .next_corner_clockwise(&end)
            .ok_or(Anomaly::OffPerimeter { path: from, end })?;

        let nearest = edge_paths
            .iter()
            .enumerate()
            .filter_map(|(k, p)| p.first().map(|start| (k, start)))
            .filter(|(_, start)| on_leg(&end, &corner, start))
            .min_by(|a, b| end.distance(a.1).total_cmp(&end.distance(b.1)));
        if let Some((next, _)) = nearest {
            return Ok(next);
        }

        ring.push(corner);
        end = corner;
    }

    Err(Anomaly::UnclosedPerimeter { path: from })
}
