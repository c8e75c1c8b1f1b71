//! Contour level sets.

use serde::{Deserialize, Serialize};

/// Upper bound on the number of levels a single `LevelSpec` produces.
pub const MAX_LEVELS: usize = 10_000;

/// Evenly spaced levels `start, start + size, ...` up to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSpec {
    pub start: f64,
    pub end: f64,
    pub size: f64,
}

impl Default for LevelSpec {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
            size: 1.0,
        }
    }
}

impl LevelSpec {
    pub fn new(start: f64, end: f64, size: f64) -> Self {
        Self { start, end, size }
    }

    /// The level set whose levels are the multiples of `interval` within
    /// `[min, max]`.
    ///
    /// Returns `None` if the interval is not positive, the range is inverted,
    /// or no multiple falls inside it.
    pub fn covering(min: f64, max: f64, interval: f64) -> Option<Self> {
        if !(interval > 0.0) || !interval.is_finite() || max < min {
            return None;
        }
        let start = (min / interval).ceil() * interval;
        let end = (max / interval).floor() * interval;
        (start <= end).then_some(Self::new(start, end, interval))
    }

    /// Step between levels; unusable sizes fall back to 1.
    pub fn step(&self) -> f64 {
        if self.size > 0.0 && self.size.is_finite() {
            self.size
        } else {
            1.0
        }
    }

    /// Number of levels the set describes, before the `MAX_LEVELS` cap.
    ///
    /// The end is inclusive with a tolerance of a tenth of a step so
    /// accumulated rounding does not drop the last level.
    pub fn count(&self) -> usize {
        let step = self.step();
        let span = self.end + step / 10.0 - self.start;
        if !(span > 0.0) {
            return 0;
        }
        (span / step).ceil() as usize
    }

    /// Generate the levels, at most `MAX_LEVELS` of them.
    pub fn levels(&self) -> Vec<f64> {
        let step = self.step();
        (0..self.count().min(MAX_LEVELS))
            .map(|k| self.start + k as f64 * step)
            .collect()
    }
}
