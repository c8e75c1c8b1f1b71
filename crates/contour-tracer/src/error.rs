//! Error types for contour computation.
//!
//! Only construction and configuration can fail. Geometry problems found
//! while tracing are reported as [`Anomaly`](crate::Anomaly) values instead.

use thiserror::Error;

/// Errors that can occur while setting up a contour computation.
#[derive(Error, Debug)]
pub enum ContourError {
    /// The number of values does not match the grid dimensions.
    #[error("field has {actual} values but {width}x{height} grid needs {expected}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// A coordinate array has the wrong length for its axis.
    #[error("{axis} coordinates have length {actual}, expected {expected}")]
    CoordinateLength {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The level set cannot be generated.
    #[error("invalid levels: {0}")]
    InvalidLevels(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl ContourError {
    /// Create an InvalidLevels error.
    pub fn invalid_levels(msg: impl Into<String>) -> Self {
        Self::InvalidLevels(msg.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for contour operations.
pub type Result<T> = std::result::Result<T, ContourError>;
