//! Per-level crossing tables and boundary start cells.

use std::collections::BTreeMap;

use crate::field::{Cell, Sampler};
use crate::marching::{classify, CellCode, MarchingCode, Side};

/// Cell range of a grid: columns `0..cols`, rows `0..rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub cols: usize,
    pub rows: usize,
}

impl CellBounds {
    /// Cell range of a `width x height` node grid.
    pub fn for_grid(width: usize, height: usize) -> Self {
        Self {
            cols: width.saturating_sub(1),
            rows: height.saturating_sub(1),
        }
    }

    /// Whether a cell touches the given side of the grid.
    ///
    /// A grid one cell high touches both top and bottom with every cell.
    pub fn on_side(&self, cell: Cell, side: Side) -> bool {
        match side {
            Side::Bottom => cell.row == 0,
            Side::Top => cell.row + 1 == self.rows,
            Side::Left => cell.col == 0,
            Side::Right => cell.col + 1 == self.cols,
        }
    }

    /// The neighbour reached by a step, `None` when it leaves the grid.
    pub fn step(&self, cell: Cell, dx: i8, dy: i8) -> Option<Cell> {
        let col = cell.col.checked_add_signed(dx as isize)?;
        let row = cell.row.checked_add_signed(dy as isize)?;
        (col < self.cols && row < self.rows).then_some(Cell::new(col, row))
    }

    /// The concrete code a boundary-seeded path would take from this cell,
    /// if the cell's current code can be entered from outside the grid.
    pub fn boundary_entry(&self, cell: Cell, code: MarchingCode) -> Option<CellCode> {
        code.candidates()
            .find(|candidate| self.on_side(cell, candidate.entry_side()))
    }
}

/// Crossings of one level, drained as paths are traced.
///
/// Ordered by row then column, so "an arbitrary remaining crossing" is
/// always the lowest one and tracing is deterministic.
pub type CrossingMap = BTreeMap<Cell, MarchingCode>;

/// The crossing map of one level plus the boundary cells paths start from.
#[derive(Debug, Clone, Default)]
pub struct CrossingTable {
    pub crossings: CrossingMap,
    pub starts: Vec<Cell>,
}

impl CrossingTable {
    /// Classify every cell of the sampled field against one level.
    pub fn build(sampler: &Sampler<'_>, level: f64) -> Self {
        let field = sampler.field();
        let bounds = CellBounds::for_grid(field.width(), field.height());
        let mut table = Self::default();

        for row in 0..bounds.rows {
            for col in 0..bounds.cols {
                let cell = Cell::new(col, row);
                let Some(code) = classify(&sampler.corners(cell), level) else {
                    continue;
                };
                table.crossings.insert(cell, code);
                if bounds.boundary_entry(cell, code).is_some() {
                    table.starts.push(cell);
                }
            }
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::marching::Saddle;

    #[test]
    fn test_step_stays_inside() {
        let bounds = CellBounds::for_grid(4, 3);
        assert_eq!(bounds.cols, 3);
        assert_eq!(bounds.rows, 2);
        assert_eq!(bounds.step(Cell::new(0, 0), -1, 0), None);
        assert_eq!(bounds.step(Cell::new(0, 0), 0, -1), None);
        assert_eq!(bounds.step(Cell::new(2, 1), 1, 0), None);
        assert_eq!(bounds.step(Cell::new(2, 1), 0, 1), None);
        assert_eq!(bounds.step(Cell::new(1, 0), 0, 1), Some(Cell::new(1, 1)));
    }

    #[test]
    fn test_single_row_is_top_and_bottom() {
        let bounds = CellBounds::for_grid(5, 2);
        let cell = Cell::new(2, 0);
        assert!(bounds.on_side(cell, Side::Bottom));
        assert!(bounds.on_side(cell, Side::Top));
        assert!(!bounds.on_side(cell, Side::Left));
        assert!(!bounds.on_side(cell, Side::Right));
    }

    #[test]
    fn test_interior_peak_has_no_starts() {
        let field = Field::new(vec![0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0], 3, 3).unwrap();
        let table = CrossingTable::build(&Sampler::new(&field, 0.0), 1.0);
        assert_eq!(table.crossings.len(), 4);
        assert!(table.starts.is_empty());
    }

    #[test]
    fn test_ramp_starts_on_entry_boundary() {
        // Values grow with x; the contour runs bottom to top.
        #[rustfmt::skip]
        let field = Field::new(vec![
            0.0, 1.0, 2.0,
            0.0, 1.0, 2.0,
            0.0, 1.0, 2.0,
        ], 3, 3).unwrap();
        let table = CrossingTable::build(&Sampler::new(&field, 0.0), 0.5);
        assert_eq!(table.crossings.len(), 2);
        assert_eq!(table.starts, vec![Cell::new(0, 0)]);
        assert_eq!(
            table.crossings.get(&Cell::new(0, 0)),
            Some(&MarchingCode::Cell(CellCode::Code9))
        );
    }

    #[test]
    fn test_boundary_saddle_registers_start() {
        #[rustfmt::skip]
        let field = Field::new(vec![
            0.0, 10.0,
            10.0, 0.0,
        ], 2, 2).unwrap();
        let table = CrossingTable::build(&Sampler::new(&field, 0.0), 4.0);
        assert_eq!(
            table.crossings.get(&Cell::new(0, 0)),
            Some(&MarchingCode::Saddle(Saddle::ValleyA))
        );
        assert_eq!(table.starts, vec![Cell::new(0, 0)]);
    }
}
