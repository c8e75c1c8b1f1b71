//! One-dimensional coordinate transforms from data space to output space.
//!
//! Each axis gets its own transform. They are applied only when a crossing
//! point or the perimeter is emitted; classification never sees them.

/// Maps a data-space coordinate on one axis to output space.
pub trait AxisTransform: Send + Sync {
    fn to_output(&self, value: f64) -> f64;
}

/// Leaves coordinates unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl AxisTransform for Identity {
    fn to_output(&self, value: f64) -> f64 {
        value
    }
}

/// `offset + scale * value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    pub scale: f64,
    pub offset: f64,
}

impl Linear {
    pub fn new(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }

    /// Maps `domain.0 -> range.0` and `domain.1 -> range.1`.
    ///
    /// Passing a reversed range flips the axis, which is how a y axis that
    /// grows upwards lands on pixel rows that grow downwards. A zero-width
    /// domain maps everything to the start of the range.
    pub fn fit(domain: (f64, f64), range: (f64, f64)) -> Self {
        let span = domain.1 - domain.0;
        if span == 0.0 || !span.is_finite() {
            return Self::new(0.0, range.0);
        }
        let scale = (range.1 - range.0) / span;
        Self::new(scale, range.0 - scale * domain.0)
    }
}

impl AxisTransform for Linear {
    fn to_output(&self, value: f64) -> f64 {
        self.offset + self.scale * value
    }
}

impl<F> AxisTransform for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn to_output(&self, value: f64) -> f64 {
        self(value)
    }
}
