//! Path tracing through a level's crossing table.
//!
//! Boundary starts are traced first; each produces an open path that ends
//! where it leaves the grid. Whatever crossings remain afterwards belong to
//! closed loops and are drained one loop at a time.

use tracing::debug;

use crate::anomaly::{report, Anomaly};
use crate::config::ContourConfig;
use crate::crossings::{CellBounds, CrossingTable};
use crate::field::{Cell, Sampler};
use crate::geometry::{Path, Perimeter, Point};
use crate::marching::{CellCode, MarchingCode, Side};
use crate::merge::join_edge_path;
use crate::simplify::{distance_threshold, simplify};
use crate::transform::AxisTransform;

/// Interpolates crossings and maps them to output space.
///
/// Shared read-only by every level of a computation.
#[derive(Clone, Copy)]
pub struct Projector<'a> {
    sampler: Sampler<'a>,
    x: &'a dyn AxisTransform,
    y: &'a dyn AxisTransform,
}

impl<'a> Projector<'a> {
    pub fn new(sampler: Sampler<'a>, x: &'a dyn AxisTransform, y: &'a dyn AxisTransform) -> Self {
        Self { sampler, x, y }
    }

    pub fn sampler(&self) -> &Sampler<'a> {
        &self.sampler
    }

    fn project(&self, (x, y): (f64, f64)) -> Point {
        Point::new(self.x.to_output(x), self.y.to_output(y))
    }

    /// Blend two nodes at the level crossing and project the result.
    fn crossing(&self, level: f64, a: (usize, usize), b: (usize, usize)) -> Point {
        let field = self.sampler.field();
        let t = crossing_fraction(
            level,
            self.sampler.sample(a.0, a.1),
            self.sampler.sample(b.0, b.1),
        );
        let (x0, y0) = field.coord(a.0, a.1);
        let (x1, y1) = field.coord(b.0, b.1);
        self.project(((1.0 - t) * x0 + t * x1, (1.0 - t) * y0 + t * y1))
    }

    /// Crossing on the edge from node `(col, row)` to `(col + 1, row)`.
    pub fn horizontal_crossing(&self, level: f64, col: usize, row: usize) -> Point {
        self.crossing(level, (col, row), (col + 1, row))
    }

    /// Crossing on the edge from node `(col, row)` to `(col, row + 1)`.
    pub fn vertical_crossing(&self, level: f64, col: usize, row: usize) -> Point {
        self.crossing(level, (col, row), (col, row + 1))
    }

    /// Crossing on one side of a cell.
    pub fn edge_crossing(&self, level: f64, cell: Cell, side: Side) -> Point {
        match side {
            Side::Bottom => self.horizontal_crossing(level, cell.col, cell.row),
            Side::Top => self.horizontal_crossing(level, cell.col, cell.row + 1),
            Side::Left => self.vertical_crossing(level, cell.col, cell.row),
            Side::Right => self.vertical_crossing(level, cell.col + 1, cell.row),
        }
    }

    /// Output-space rectangle through the first and last grid coordinates,
    /// `None` for a grid without cells.
    pub fn perimeter(&self) -> Option<Perimeter> {
        let field = self.sampler.field();
        if !field.has_cells() {
            return None;
        }
        let (left, bottom) = field.coord(0, 0);
        let (right, _) = field.coord(field.width() - 1, 0);
        let (_, top) = field.coord(0, field.height() - 1);
        Some(Perimeter {
            left: self.x.to_output(left),
            right: self.x.to_output(right),
            top: self.y.to_output(top),
            bottom: self.y.to_output(bottom),
        })
    }
}

/// Position of `level` between two samples, as a fraction from the first.
fn crossing_fraction(level: f64, v0: f64, v1: f64) -> f64 {
    let delta = v1 - v0;
    if delta == 0.0 {
        return 0.5;
    }
    ((level - v0) / delta).clamp(0.0, 1.0)
}

/// Paths traced for one level, before fill stitching.
#[derive(Debug, Clone, Default)]
pub struct TracedLevel {
    pub level: f64,
    pub closed_paths: Vec<Path>,
    pub edge_paths: Vec<Path>,
    pub anomalies: Vec<Anomaly>,
    /// Crossings never consumed, non-zero only after a drain limit.
    pub crossings_left: usize,
}

/// Mutable tracing state of a single level.
pub struct LevelTrace<'a> {
    level: f64,
    projector: &'a Projector<'a>,
    config: &'a ContourConfig,
    bounds: CellBounds,
    table: CrossingTable,
    closed_paths: Vec<Path>,
    edge_paths: Vec<Path>,
    anomalies: Vec<Anomaly>,
}

impl<'a> LevelTrace<'a> {
    /// Classify the grid for `level` and prepare to trace it.
    pub fn new(level: f64, projector: &'a Projector<'a>, config: &'a ContourConfig) -> Self {
        let field = projector.sampler().field();
        Self {
            level,
            projector,
            config,
            bounds: CellBounds::for_grid(field.width(), field.height()),
            table: CrossingTable::build(projector.sampler(), level),
            closed_paths: Vec::new(),
            edge_paths: Vec::new(),
            anomalies: Vec::new(),
        }
    }

    /// Trace every crossing of the level.
    pub fn run(mut self) -> TracedLevel {
        let crossings = self.table.crossings.len();
        self.trace_boundary_starts();
        self.drain();

        debug!(
            level = self.level,
            crossings = crossings,
            closed_paths = self.closed_paths.len(),
            edge_paths = self.edge_paths.len(),
            anomalies = self.anomalies.len(),
            "Traced contour level"
        );

        TracedLevel {
            level: self.level,
            closed_paths: self.closed_paths,
            edge_paths: self.edge_paths,
            anomalies: self.anomalies,
            crossings_left: self.table.crossings.len(),
        }
    }

    fn trace_boundary_starts(&mut self) {
        let starts = std::mem::take(&mut self.table.starts);
        for cell in starts {
            // A saddle on the boundary can seed a second path, and a cell
            // may already have been used by an earlier path.
            while let Some(entry) = self
                .table
                .crossings
                .get(&cell)
                .and_then(|&code| self.bounds.boundary_entry(cell, code))
            {
                let points = self.walk(cell, entry, true);
                self.finish_path(cell, points);
            }
        }
    }

    fn drain(&mut self) {
        let mut traces = 0;
        while let Some((&cell, &code)) = self.table.crossings.first_key_value() {
            if traces >= self.config.max_paths_per_level {
                let remaining = self.table.crossings.len();
                self.report(Anomaly::DrainLimit { traces, remaining });
                break;
            }
            traces += 1;
            let points = self.walk(cell, code.primary(), false);
            self.finish_path(cell, points);
        }
    }

    /// Follow crossings from `start`, entering it as `entry`.
    fn walk(&mut self, start: Cell, entry: CellCode, from_boundary: bool) -> Vec<Point> {
        let start_step = entry.entry_side().inward();
        let mut points = vec![self.projector.edge_crossing(self.level, start, entry.entry_side())];
        let mut cell = start;
        let mut step = start_step;

        for _ in 0..self.config.max_trace_steps {
            let Some(&code) = self.table.crossings.get(&cell) else {
                self.report(Anomaly::MissingCrossing { start, cell });
                return points;
            };

            let taken = match code {
                MarchingCode::Cell(taken) => {
                    self.table.crossings.remove(&cell);
                    taken
                }
                MarchingCode::Saddle(saddle) => {
                    let taken = saddle.resolve(step);
                    match taken.saddle_remainder() {
                        Some(rest) => {
                            self.table.crossings.insert(cell, MarchingCode::Cell(rest));
                        }
                        None => {
                            self.table.crossings.remove(&cell);
                        }
                    }
                    taken
                }
            };

            let exit = taken.exit_side();
            let point = self.projector.edge_crossing(self.level, cell, exit);
            if !points.last().is_some_and(|last| last.approx_eq(&point)) {
                points.push(point);
            }

            step = taken.exit_step();
            match self.bounds.step(cell, step.dx, step.dy) {
                Some(next) => {
                    cell = next;
                    if cell == start && step == start_step {
                        return points;
                    }
                }
                None => {
                    if !from_boundary {
                        self.report(Anomaly::BoundaryExit { start, side: exit });
                    }
                    return points;
                }
            }
        }

        self.report(Anomaly::RunawayTrace {
            start,
            steps: self.config.max_trace_steps,
        });
        points
    }

    /// Simplify a raw trace and file it as a closed or edge path.
    ///
    /// Traces left with fewer than two points are dropped and reported.
    fn finish_path(&mut self, start: Cell, mut points: Vec<Point>) {
        if points.len() < 2 {
            self.report(Anomaly::DegeneratePath { start });
            return;
        }

        let closed = points[0].approx_eq(&points[points.len() - 1]);
        let threshold = distance_threshold(&points, self.config.smoothing);
        if closed {
            points.pop();
        }
        let points = simplify(points, closed, threshold);

        if points.len() < 2 {
            self.report(Anomaly::DegeneratePath { start });
            return;
        }

        if closed {
            self.closed_paths.push(points);
        } else {
            join_edge_path(&mut self.edge_paths, &mut self.closed_paths, points);
        }
    }

    fn report(&mut self, anomaly: Anomaly) {
        report(&mut self.anomalies, self.level, anomaly);
    }
}
