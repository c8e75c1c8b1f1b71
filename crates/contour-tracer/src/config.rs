//! Configuration for contour computation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContourError, Result};
use crate::levels::{LevelSpec, MAX_LEVELS};

/// Configuration for a contour computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Levels to trace.
    pub levels: LevelSpec,

    /// Scales the point-merge threshold; 0 disables simplification.
    pub smoothing: f64,

    /// Build fill boundary rings for each level.
    pub fill: bool,

    /// Value used for missing samples. Defaults to the lowest level.
    pub missing_value: Option<f64>,

    /// Chaikin passes applied to output paths.
    pub smoothing_passes: u32,

    /// Trace levels on the rayon pool.
    pub parallel: bool,

    /// Cell visits allowed for one path.
    pub max_trace_steps: usize,

    /// Interior loops traced per level before giving up.
    pub max_paths_per_level: usize,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            levels: LevelSpec::default(),
            smoothing: 1.0,
            fill: true,
            missing_value: None,
            smoothing_passes: 0,
            parallel: true,
            max_trace_steps: 10_000,
            max_paths_per_level: 10_000,
        }
    }
}

impl ContourConfig {
    /// Load configuration from a JSON string. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Override fields from `CONTOUR_*` variables returned by `lookup`,
    /// usually `|key| std::env::var(key).ok()`.
    ///
    /// Values that do not parse are ignored.
    pub fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());
        let count = |key: &str| lookup(key).and_then(|v| v.trim().parse::<usize>().ok());
        let flag = |key: &str| lookup(key).map(|v| v.eq_ignore_ascii_case("true") || v == "1");

        if let Some(v) = parsed("CONTOUR_LEVEL_START") {
            self.levels.start = v;
        }
        if let Some(v) = parsed("CONTOUR_LEVEL_END") {
            self.levels.end = v;
        }
        if let Some(v) = parsed("CONTOUR_LEVEL_SIZE") {
            self.levels.size = v;
        }
        if let Some(v) = parsed("CONTOUR_SMOOTHING") {
            self.smoothing = v;
        }
        if let Some(v) = flag("CONTOUR_FILL") {
            self.fill = v;
        }
        if let Some(v) = parsed("CONTOUR_MISSING_VALUE") {
            self.missing_value = Some(v);
        }
        if let Some(v) = lookup("CONTOUR_SMOOTHING_PASSES").and_then(|v| v.trim().parse().ok()) {
            self.smoothing_passes = v;
        }
        if let Some(v) = flag("CONTOUR_PARALLEL") {
            self.parallel = v;
        }
        if let Some(v) = count("CONTOUR_MAX_TRACE_STEPS") {
            self.max_trace_steps = v;
        }
        if let Some(v) = count("CONTOUR_MAX_PATHS_PER_LEVEL") {
            self.max_paths_per_level = v;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.levels.start.is_finite() || !self.levels.end.is_finite() {
            return Err(ContourError::invalid_levels(format!(
                "level bounds must be finite, got {} to {}",
                self.levels.start, self.levels.end
            )));
        }

        let count = self.levels.count();
        if count > MAX_LEVELS {
            return Err(ContourError::invalid_levels(format!(
                "level set describes {} levels, more than the limit of {}",
                count, MAX_LEVELS
            )));
        }

        if !(self.smoothing >= 0.0) || !self.smoothing.is_finite() {
            return Err(ContourError::config("smoothing must be a finite value >= 0"));
        }

        if self.missing_value.is_some_and(|v| !v.is_finite()) {
            return Err(ContourError::config("missing_value must be finite"));
        }

        if self.max_trace_steps == 0 {
            return Err(ContourError::config("max_trace_steps must be > 0"));
        }

        if self.max_paths_per_level == 0 {
            return Err(ContourError::config("max_paths_per_level must be > 0"));
        }

        Ok(())
    }
}
