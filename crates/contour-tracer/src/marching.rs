//! Marching-squares cell classification.
//!
//! A corner contributes its bit when its value is not above the level:
//! bottom-left 1, bottom-right 2, top-right 4, top-left 8. Codes 0 and 15
//! have no crossing. The two saddle codes (5 and 10) are split by comparing
//! the level with the corner average, which fixes how the two crossings in
//! the cell pair up.
//!
//! Paths are traced with the values not above the level on their left, so
//! every concrete code has exactly one entry side and one exit side.

use serde::Serialize;

use crate::field::Corners;

/// A side of a cell (or of the whole grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bottom,
    Right,
    Top,
    Left,
}

impl Side {
    /// The step that leaves a cell through this side.
    pub const fn outward(self) -> Step {
        match self {
            Side::Left => Step { dx: -1, dy: 0 },
            Side::Right => Step { dx: 1, dy: 0 },
            Side::Bottom => Step { dx: 0, dy: -1 },
            Side::Top => Step { dx: 0, dy: 1 },
        }
    }

    /// The step that enters a cell through this side.
    pub const fn inward(self) -> Step {
        self.outward().reversed()
    }
}

/// A unit move between neighbouring cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Step {
    pub dx: i8,
    pub dy: i8,
}

impl Step {
    pub const fn reversed(self) -> Step {
        Step { dx: -self.dx, dy: -self.dy }
    }

    /// Sign used to pick a saddle resolution: `dx` if it is non-zero,
    /// otherwise `dy`.
    pub const fn is_negative(self) -> bool {
        if self.dx != 0 {
            self.dx < 0
        } else {
            self.dy < 0
        }
    }
}

/// A cell code with a single crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum CellCode {
    Code1 = 1,
    Code2 = 2,
    Code3 = 3,
    Code4 = 4,
    Code6 = 6,
    Code7 = 7,
    Code8 = 8,
    Code9 = 9,
    Code11 = 11,
    Code12 = 12,
    Code13 = 13,
    Code14 = 14,
}

/// Side through which a path enters a cell with this code.
const ENTRY_SIDES: [(CellCode, Side); 12] = [
    (CellCode::Code1, Side::Bottom),
    (CellCode::Code2, Side::Right),
    (CellCode::Code3, Side::Right),
    (CellCode::Code4, Side::Top),
    (CellCode::Code6, Side::Top),
    (CellCode::Code7, Side::Top),
    (CellCode::Code8, Side::Left),
    (CellCode::Code9, Side::Bottom),
    (CellCode::Code11, Side::Right),
    (CellCode::Code12, Side::Left),
    (CellCode::Code13, Side::Bottom),
    (CellCode::Code14, Side::Left),
];

/// Side through which a path leaves a cell with this code.
const EXIT_SIDES: [(CellCode, Side); 12] = [
    (CellCode::Code1, Side::Left),
    (CellCode::Code2, Side::Bottom),
    (CellCode::Code3, Side::Left),
    (CellCode::Code4, Side::Right),
    (CellCode::Code6, Side::Bottom),
    (CellCode::Code7, Side::Left),
    (CellCode::Code8, Side::Top),
    (CellCode::Code9, Side::Top),
    (CellCode::Code11, Side::Top),
    (CellCode::Code12, Side::Right),
    (CellCode::Code13, Side::Right),
    (CellCode::Code14, Side::Bottom),
];

/// After one half of a saddle is used, the half left for a later pass.
const SADDLE_REMAINDERS: [(CellCode, CellCode); 8] = [
    (CellCode::Code1, CellCode::Code4),
    (CellCode::Code4, CellCode::Code1),
    (CellCode::Code2, CellCode::Code8),
    (CellCode::Code8, CellCode::Code2),
    (CellCode::Code7, CellCode::Code13),
    (CellCode::Code13, CellCode::Code7),
    (CellCode::Code11, CellCode::Code14),
    (CellCode::Code14, CellCode::Code11),
];

const fn lookup_side(table: &[(CellCode, Side); 12], code: CellCode) -> Side {
    let mut i = 0;
    while i < table.len() {
        if table[i].0 as u8 == code as u8 {
            return table[i].1;
        }
        i += 1;
    }
    // Every variant is listed in both tables.
    unreachable!()
}

impl CellCode {
    /// Concrete code for a raw 4-bit value, `None` for 0, 5, 10 and 15.
    pub const fn from_bits(bits: u8) -> Option<CellCode> {
        match bits {
            1 => Some(CellCode::Code1),
            2 => Some(CellCode::Code2),
            3 => Some(CellCode::Code3),
            4 => Some(CellCode::Code4),
            6 => Some(CellCode::Code6),
            7 => Some(CellCode::Code7),
            8 => Some(CellCode::Code8),
            9 => Some(CellCode::Code9),
            11 => Some(CellCode::Code11),
            12 => Some(CellCode::Code12),
            13 => Some(CellCode::Code13),
            14 => Some(CellCode::Code14),
            _ => None,
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn entry_side(self) -> Side {
        lookup_side(&ENTRY_SIDES, self)
    }

    pub const fn exit_side(self) -> Side {
        lookup_side(&EXIT_SIDES, self)
    }

    pub const fn exit_step(self) -> Step {
        self.exit_side().outward()
    }

    /// The other half of the saddle this code can be taken from.
    pub fn saddle_remainder(self) -> Option<CellCode> {
        SADDLE_REMAINDERS
            .iter()
            .find(|(taken, _)| *taken == self)
            .map(|&(_, rest)| rest)
    }
}

/// A disambiguated saddle cell holding two crossings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Saddle {
    /// Raw 5, level above the corner average: pairs as 7 and 13.
    PeakA,
    /// Raw 10, level above the corner average: pairs as 11 and 14.
    PeakB,
    /// Raw 5, level not above the corner average: pairs as 1 and 4.
    ValleyA,
    /// Raw 10, level not above the corner average: pairs as 2 and 8.
    ValleyB,
}

impl Saddle {
    /// The `(negative step, positive step)` resolution pair.
    pub const fn resolutions(self) -> (CellCode, CellCode) {
        match self {
            Saddle::ValleyA => (CellCode::Code4, CellCode::Code1),
            Saddle::ValleyB => (CellCode::Code2, CellCode::Code8),
            Saddle::PeakA => (CellCode::Code7, CellCode::Code13),
            Saddle::PeakB => (CellCode::Code11, CellCode::Code14),
        }
    }

    /// The concrete code taken when entering with `step`.
    pub const fn resolve(self, step: Step) -> CellCode {
        let (negative, positive) = self.resolutions();
        if step.is_negative() {
            negative
        } else {
            positive
        }
    }
}

/// The crossing state of one cell for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarchingCode {
    Cell(CellCode),
    Saddle(Saddle),
}

impl MarchingCode {
    /// The code taken when a trace starts here from inside the grid: the
    /// positive resolution for saddles.
    pub const fn primary(self) -> CellCode {
        match self {
            MarchingCode::Cell(code) => code,
            MarchingCode::Saddle(saddle) => saddle.resolutions().1,
        }
    }

    /// Concrete codes this cell could be entered as, positive resolution
    /// first for saddles.
    pub fn candidates(self) -> impl Iterator<Item = CellCode> {
        let second = match self {
            MarchingCode::Cell(_) => None,
            MarchingCode::Saddle(saddle) => Some(saddle.resolutions().0),
        };
        std::iter::once(self.primary()).chain(second)
    }
}

/// Raw 4-bit index of a cell.
pub fn raw_index(corners: &Corners, level: f64) -> u8 {
    let not_above = |v: f64| !(v > level);
    let mut bits = 0;
    if not_above(corners.bottom_left) {
        bits |= 1;
    }
    if not_above(corners.bottom_right) {
        bits |= 2;
    }
    if not_above(corners.top_right) {
        bits |= 4;
    }
    if not_above(corners.top_left) {
        bits |= 8;
    }
    bits
}

/// Classify a cell, `None` when the level does not cross it.
pub fn classify(corners: &Corners, level: f64) -> Option<MarchingCode> {
    let bits = raw_index(corners, level);
    match bits {
        5 | 10 => {
            let peak = level > corners.average();
            let saddle = match (bits, peak) {
                (5, true) => Saddle::PeakA,
                (5, false) => Saddle::ValleyA,
                (_, true) => Saddle::PeakB,
                (_, false) => Saddle::ValleyB,
            };
            Some(MarchingCode::Saddle(saddle))
        }
        _ => CellCode::from_bits(bits).map(MarchingCode::Cell),
    }
}
