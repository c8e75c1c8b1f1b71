//! Scalar field storage, coordinates and the corner sampler.
//!
//! Values are stored row-major with row 0 first. Row index follows the y
//! axis and increases upwards in data space; column index follows x.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{ContourError, Result};

/// Data-space coordinates of the grid nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinates {
    /// One coordinate per column (`x`) and per row (`y`).
    Axes { x: Vec<f64>, y: Vec<f64> },
    /// Full per-node coordinate grids, row-major like the values.
    Grid { x: Vec<f64>, y: Vec<f64> },
}

impl Coordinates {
    /// Column and row indices as coordinates.
    pub fn indices(width: usize, height: usize) -> Self {
        Self::Axes {
            x: (0..width).map(|i| i as f64).collect(),
            y: (0..height).map(|i| i as f64).collect(),
        }
    }
}

/// An immutable 2-D scalar field.
#[derive(Debug, Clone)]
pub struct Field {
    values: Vec<f64>,
    width: usize,
    height: usize,
    coords: Coordinates,
}

impl Field {
    /// Create a field with index coordinates.
    pub fn new(values: Vec<f64>, width: usize, height: usize) -> Result<Self> {
        let expected = width * height;
        if values.len() != expected {
            return Err(ContourError::DimensionMismatch {
                width,
                height,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            values,
            width,
            height,
            coords: Coordinates::indices(width, height),
        })
    }

    /// Create a field from rows that may differ in length.
    ///
    /// The width is the longest row; shorter rows are padded with NaN, which
    /// the sampler treats as missing.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut values = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, f64::NAN);
            values.extend(row);
        }
        Self::new(values, width, height)
    }

    /// Replace coordinates with one array per axis.
    pub fn with_axes(mut self, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        check_len("x", self.width, x.len())?;
        check_len("y", self.height, y.len())?;
        self.coords = Coordinates::Axes { x, y };
        Ok(self)
    }

    /// Replace coordinates with full per-node grids (row-major).
    pub fn with_coordinate_grid(mut self, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        let nodes = self.width * self.height;
        check_len("x", nodes, x.len())?;
        check_len("y", nodes, y.len())?;
        self.coords = Coordinates::Grid { x, y };
        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the grid has at least one cell.
    pub fn has_cells(&self) -> bool {
        self.width >= 2 && self.height >= 2
    }

    /// Raw stored value, `None` outside the grid.
    pub fn value(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + col).copied()
    }

    /// Data-space coordinate of a node.
    pub fn coord(&self, col: usize, row: usize) -> (f64, f64) {
        match &self.coords {
            Coordinates::Axes { x, y } => (x[col], y[row]),
            Coordinates::Grid { x, y } => {
                let i = row * self.width + col;
                (x[i], y[i])
            }
        }
    }

    /// Minimum and maximum of the finite values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Number of finite values.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }
}

fn check_len(axis: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ContourError::CoordinateLength {
            axis,
            expected,
            actual,
        });
    }
    Ok(())
}

/// A grid cell, addressed by its bottom-left node.
///
/// Ordered by row first so that iteration follows the row-major layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(col: usize, row: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Serializes as `[col, row]`.
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        [self.col, self.row].serialize(serializer)
    }
}

/// The four corner samples of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub bottom_left: f64,
    pub bottom_right: f64,
    pub top_right: f64,
    pub top_left: f64,
}

impl Corners {
    pub fn average(&self) -> f64 {
        (self.bottom_left + self.bottom_right + self.top_right + self.top_left) / 4.0
    }
}

/// Reads cleaned values from a field.
///
/// Missing or non-finite samples are replaced by a fixed fallback.
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'a> {
    field: &'a Field,
    fallback: f64,
}

impl<'a> Sampler<'a> {
    pub fn new(field: &'a Field, fallback: f64) -> Self {
        Self { field, fallback }
    }

    pub fn field(&self) -> &'a Field {
        self.field
    }

    pub fn sample(&self, col: usize, row: usize) -> f64 {
        match self.field.value(col, row) {
            Some(v) if v.is_finite() => v,
            _ => self.fallback,
        }
    }

    pub fn corners(&self, cell: Cell) -> Corners {
        Corners {
            bottom_left: self.sample(cell.col, cell.row),
            bottom_right: self.sample(cell.col + 1, cell.row),
            top_right: self.sample(cell.col + 1, cell.row + 1),
            top_left: self.sample(cell.col, cell.row + 1),
        }
    }
}
