//! JSON field input.
//!
//! ```json
//! { "z": [[...], ...], "x": [...] | [[...], ...], "y": [...] | [[...], ...] }
//! ```
//!
//! `z` is a list of rows, row 0 first. Entries that are not numbers (null,
//! strings) are missing samples. `x` and `y` are optional; each is either one
//! value per column/row or a full grid shaped like `z`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use contour_tracer::Field;
use serde::Deserialize;
use serde_json::Value;

/// Coordinates for one axis.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AxisInput {
    Axis(Vec<f64>),
    Grid(Vec<Vec<f64>>),
}

/// A field document as read from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldFile {
    pub z: Vec<Vec<Value>>,
    #[serde(default)]
    pub x: Option<AxisInput>,
    #[serde(default)]
    pub y: Option<AxisInput>,
}

impl FieldFile {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse field document")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read field file {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Build the field, attaching coordinates when given.
    pub fn into_field(self) -> Result<Field> {
        let rows = self
            .z
            .into_iter()
            .map(|row| row.iter().map(|v| v.as_f64().unwrap_or(f64::NAN)).collect())
            .collect();
        let field = Field::from_rows(rows).context("Invalid z values")?;
        let (width, height) = (field.width(), field.height());

        let field = match (self.x, self.y) {
            (None, None) => field,
            (Some(AxisInput::Axis(x)), Some(AxisInput::Axis(y))) => field.with_axes(x, y)?,
            (x, y) => {
                let x = node_grid(x, width, height, Axis::X)?;
                let y = node_grid(y, width, height, Axis::Y)?;
                field.with_coordinate_grid(x, y)?
            }
        };
        Ok(field)
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Expand any axis description to one coordinate per node, row-major.
fn node_grid(input: Option<AxisInput>, width: usize, height: usize, axis: Axis) -> Result<Vec<f64>> {
    let index = |col: usize, row: usize| match axis {
        Axis::X => col,
        Axis::Y => row,
    };

    match input {
        None => Ok((0..height)
            .flat_map(|row| (0..width).map(move |col| index(col, row) as f64))
            .collect()),
        Some(AxisInput::Axis(values)) => {
            let expected = match axis {
                Axis::X => width,
                Axis::Y => height,
            };
            if values.len() != expected {
                bail!("axis has {} values, expected {}", values.len(), expected);
            }
            Ok((0..height)
                .flat_map(|row| (0..width).map(move |col| (col, row)))
                .map(|(col, row)| values[index(col, row)])
                .collect())
        }
        Some(AxisInput::Grid(rows)) => {
            if rows.len() != height || rows.iter().any(|r| r.len() != width) {
                bail!("coordinate grid must be {}x{} like z", width, height);
            }
            Ok(rows.into_iter().flatten().collect())
        }
    }
}
