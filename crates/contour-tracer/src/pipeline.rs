//! Level-by-level contour computation.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::anomaly::Anomaly;
use crate::config::ContourConfig;
use crate::error::Result;
use crate::field::{Field, Sampler};
use crate::geometry::{Path, Perimeter};
use crate::merge::fill_boundary;
use crate::smooth::smooth_path;
use crate::tracer::{LevelTrace, Projector};
use crate::transform::AxisTransform;

/// Everything produced for one contour level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelPaths {
    pub level: f64,
    /// Loops, stored without a repeated closing point.
    pub closed_paths: Vec<Path>,
    /// Paths that start and end on the grid boundary.
    pub edge_paths: Vec<Path>,
    /// Rings enclosing the region above the level, when fill is enabled.
    pub fill_boundary: Option<Vec<Path>>,
    pub anomalies: Vec<Anomaly>,
}

/// Results for every level of a computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourSet {
    /// Output-space grid rectangle, absent for grids without cells.
    pub perimeter: Option<Perimeter>,
    pub levels: Vec<LevelPaths>,
}

impl ContourSet {
    pub fn path_count(&self) -> usize {
        self.levels
            .iter()
            .map(|l| l.closed_paths.len() + l.edge_paths.len())
            .sum()
    }

    pub fn anomaly_count(&self) -> usize {
        self.levels.iter().map(|l| l.anomalies.len()).sum()
    }
}

/// Trace, fill and smooth a single level.
pub fn trace_level(projector: &Projector<'_>, level: f64, config: &ContourConfig) -> LevelPaths {
    let traced = LevelTrace::new(level, projector, config).run();
    let mut anomalies = traced.anomalies;

    let fill = config.fill.then(|| match projector.perimeter() {
        Some(perimeter) => fill_boundary(
            &traced.edge_paths,
            &traced.closed_paths,
            &perimeter,
            projector.sampler().sample(0, 0),
            level,
            &mut anomalies,
        ),
        None => Vec::new(),
    });

    let passes = config.smoothing_passes;
    let smooth_all = |paths: Vec<Path>, closed: bool| -> Vec<Path> {
        if passes == 0 {
            return paths;
        }
        paths.iter().map(|p| smooth_path(p, closed, passes)).collect()
    };

    LevelPaths {
        level,
        closed_paths: smooth_all(traced.closed_paths, true),
        edge_paths: smooth_all(traced.edge_paths, false),
        fill_boundary: fill,
        anomalies,
    }
}

/// Compute contours for every configured level.
///
/// Missing samples take `missing_value`, or the lowest level when unset, so
/// gaps never grow contours of their own at that level.
///
/// `x` and `y` map data coordinates to output space; point merging works in
/// output units (see [`crate::POINT_EPSILON`]).
pub fn compute_contours(
    field: &Field,
    config: &ContourConfig,
    x: &dyn AxisTransform,
    y: &dyn AxisTransform,
) -> Result<ContourSet> {
    config.validate()?;

    let levels = config.levels.levels();
    let fallback = config
        .missing_value
        .or_else(|| levels.first().copied())
        .unwrap_or(config.levels.start);

    let (data_min, data_max) = field.value_range().unwrap_or((f64::NAN, f64::NAN));
    debug!(
        width = field.width(),
        height = field.height(),
        valid_count = field.valid_count(),
        data_min = data_min,
        data_max = data_max,
        num_levels = levels.len(),
        first_level = levels.first().copied().unwrap_or(0.0),
        last_level = levels.last().copied().unwrap_or(0.0),
        fallback = fallback,
        "compute_contours input"
    );

    let projector = Projector::new(Sampler::new(field, fallback), x, y);
    let results: Vec<LevelPaths> = if config.parallel {
        levels
            .par_iter()
            .map(|&level| trace_level(&projector, level, config))
            .collect()
    } else {
        levels
            .iter()
            .map(|&level| trace_level(&projector, level, config))
            .collect()
    };

    let set = ContourSet {
        perimeter: projector.perimeter(),
        levels: results,
    };

    debug!(
        num_paths = set.path_count(),
        total_points = set
            .levels
            .iter()
            .flat_map(|l| l.closed_paths.iter().chain(&l.edge_paths))
            .map(Vec::len)
            .sum::<usize>(),
        anomalies = set.anomaly_count(),
        "Generated contours"
    );

    Ok(set)
}
