//! Non-fatal problems found while tracing or stitching a level.
//!
//! Anomalies never abort a computation. They are logged when found and
//! returned with the level so callers can decide how much to trust a
//! best-effort result.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::field::Cell;
use crate::geometry::Point;
use crate::marching::Side;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Anomaly {
    /// A trace reached a cell with no remaining crossing.
    #[error("no crossing left at cell {cell} while tracing from {start}")]
    MissingCrossing { start: Cell, cell: Cell },

    /// A trace hit the step cap without closing or leaving the grid.
    #[error("trace from {start} exceeded {steps} steps")]
    RunawayTrace { start: Cell, steps: usize },

    /// A trace seeded inside the grid left through the boundary.
    #[error("interior trace from {start} left the grid through its {side:?} side")]
    BoundaryExit { start: Cell, side: Side },

    /// Too many traces were needed to drain the crossings of a level.
    #[error("stopped after {traces} traces with {remaining} crossings left")]
    DrainLimit { traces: usize, remaining: usize },

    /// An edge path end point is not on the grid perimeter.
    #[error("edge path {path} ends off the perimeter at ({}, {})", .end.x, .end.y)]
    OffPerimeter { path: usize, end: Point },

    /// A finished trace had fewer than two distinct points and was dropped.
    ///
    /// Points closer than `POINT_EPSILON` in output units are merged, so a
    /// grid whose output spacing is that fine loses its contours.
    #[error("path traced from {start} collapsed to fewer than two points")]
    DegeneratePath { start: Cell },

    /// Walking the perimeter found no edge path to continue with.
    #[error("perimeter walk from edge path {path} did not reach another path")]
    UnclosedPerimeter { path: usize },
}

/// Log an anomaly for a level and keep it with the level's results.
pub(crate) fn report(sink: &mut Vec<Anomaly>, level: f64, anomaly: Anomaly) {
    warn!(level = level, anomaly = %anomaly, "Contour anomaly");
    sink.push(anomaly);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_serializes_with_kind_tag() {
        let anomaly = Anomaly::BoundaryExit {
            start: Cell::new(2, 3),
            side: Side::Left,
        };
        let json = serde_json::to_value(&anomaly).unwrap();
        assert_eq!(json["kind"], "boundaryExit");
        assert_eq!(json["start"], serde_json::json!([2, 3]));

        let json = serde_json::to_value(Anomaly::DegeneratePath {
            start: Cell::new(0, 1),
        })
        .unwrap();
        assert_eq!(json["kind"], "degeneratePath");
    }

    #[test]
    fn test_report_keeps_anomaly() {
        let mut sink = Vec::new();
        report(&mut sink, 1.0, Anomaly::UnclosedPerimeter { path: 0 });
        assert_eq!(sink, vec![Anomaly::UnclosedPerimeter { path: 0 }]);
        assert_eq!(
            sink[0].to_string(),
            "perimeter walk from edge path 0 did not reach another path"
        );
    }
}
