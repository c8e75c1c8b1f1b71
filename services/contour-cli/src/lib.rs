//! Command line front end for the contour tracer.
//!
//! Reads a JSON field document, layers configuration from a file, the
//! `CONTOUR_*` environment and command line flags (later wins), and writes
//! the resulting contour set as JSON.

pub mod input;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use contour_tracer::{
    compute_contours, AxisTransform, ContourConfig, ContourSet, Field, Identity, LevelSpec, Linear,
    POINT_EPSILON,
};
use tracing::{debug, info, warn};

use crate::input::FieldFile;

/// Trace contour lines and fill boundaries through a gridded scalar field.
#[derive(Parser, Debug, Clone)]
#[command(name = "contour-cli")]
#[command(about = "Trace contour paths through a JSON scalar field")]
pub struct Args {
    /// Field document (`{"z": [[...]], "x": ..., "y": ...}`)
    pub input: PathBuf,

    /// JSON configuration file
    #[arg(long, env = "CONTOUR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// First level
    #[arg(long)]
    pub start: Option<f64>,

    /// Last level
    #[arg(long)]
    pub end: Option<f64>,

    /// Spacing between levels
    #[arg(long)]
    pub size: Option<f64>,

    /// Pick levels at this interval across the data range
    #[arg(long, conflicts_with_all = ["start", "end", "size"])]
    pub interval: Option<f64>,

    /// Point-merge threshold scale, 0 disables simplification
    #[arg(long)]
    pub smoothing: Option<f64>,

    /// Chaikin smoothing passes
    #[arg(long)]
    pub smoothing_passes: Option<u32>,

    /// Value used for missing samples
    #[arg(long)]
    pub missing_value: Option<f64>,

    /// Skip fill boundary rings
    #[arg(long)]
    pub no_fill: bool,

    /// Trace levels one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Map x onto 0..WIDTH output units. Without a pixel box, output is in
    /// data coordinates and points closer than 0.01 are merged
    #[arg(long, requires = "pixel_height")]
    pub pixel_width: Option<f64>,

    /// Map y onto HEIGHT..0 output units (y grows downwards)
    #[arg(long, requires = "pixel_width")]
    pub pixel_height: Option<f64>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pub pretty: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl Args {
    /// Build the configuration: file or defaults, then environment, then flags.
    pub fn resolve_config<F>(&self, field: &Field, lookup: F) -> Result<ContourConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config {
            Some(path) => ContourConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ContourConfig::default(),
        };
        config.apply_vars(lookup);

        if let Some(interval) = self.interval {
            let (min, max) = field
                .value_range()
                .context("Field has no finite values to pick levels from")?;
            config.levels = match LevelSpec::covering(min, max, interval) {
                Some(levels) => levels,
                None => bail!(
                    "no level at interval {} falls within the data range {} to {}",
                    interval,
                    min,
                    max
                ),
            };
        }
        if let Some(v) = self.start {
            config.levels.start = v;
        }
        if let Some(v) = self.end {
            config.levels.end = v;
        }
        if let Some(v) = self.size {
            config.levels.size = v;
        }
        if let Some(v) = self.smoothing {
            config.smoothing = v;
        }
        if let Some(v) = self.smoothing_passes {
            config.smoothing_passes = v;
        }
        if let Some(v) = self.missing_value {
            config.missing_value = Some(v);
        }
        if self.no_fill {
            config.fill = false;
        }
        if self.sequential {
            config.parallel = false;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    /// Output transforms for both axes.
    ///
    /// With pixel dimensions the data extent of the grid is stretched over
    /// the output box with y flipped; otherwise coordinates pass through.
    pub fn transforms(&self, field: &Field) -> (Box<dyn AxisTransform>, Box<dyn AxisTransform>) {
        match (self.pixel_width, self.pixel_height) {
            (Some(width), Some(height)) if field.has_cells() => {
                let (x0, y0) = field.coord(0, 0);
                let (x1, y1) = field.coord(field.width() - 1, field.height() - 1);
                (
                    Box::new(Linear::fit((x0, x1), (0.0, width))),
                    Box::new(Linear::fit((y0, y1), (height, 0.0))),
                )
            }
            _ => {
                if let Some(spacing) = min_node_spacing(field) {
                    if spacing < 10.0 * POINT_EPSILON {
                        warn!(
                            spacing = spacing,
                            tolerance = POINT_EPSILON,
                            "Grid spacing is close to the point merge tolerance; \
                             use --pixel-width/--pixel-height to keep small contours"
                        );
                    }
                }
                (Box::new(Identity), Box::new(Identity))
            }
        }
    }
}

/// Smallest gap between neighbouring nodes along the first row and column,
/// in data units.
fn min_node_spacing(field: &Field) -> Option<f64> {
    let columns = (1..field.width()).map(|c| (field.coord(c, 0).0 - field.coord(c - 1, 0).0).abs());
    let rows = (1..field.height()).map(|r| (field.coord(0, r).1 - field.coord(0, r - 1).1).abs());
    columns.chain(rows).reduce(f64::min)
}

/// Load the field, trace every level and return the contour set.
pub fn run<F>(args: &Args, lookup: F) -> Result<ContourSet>
where
    F: Fn(&str) -> Option<String>,
{
    let field = FieldFile::from_file(&args.input)?.into_field()?;
    debug!(
        width = field.width(),
        height = field.height(),
        valid = field.valid_count(),
        "Loaded field"
    );

    let config = args.resolve_config(&field, lookup)?;
    let (x, y) = args.transforms(&field);
    let set = compute_contours(&field, &config, x.as_ref(), y.as_ref())
        .context("Contour computation failed")?;

    info!(
        levels = set.levels.len(),
        paths = set.path_count(),
        anomalies = set.anomaly_count(),
        "Contours computed"
    );
    Ok(set)
}

/// Write the contour set as JSON to `output`, or stdout.
pub fn write_output(set: &ContourSet, output: Option<&PathBuf>, pretty: bool) -> Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, set)?;
    } else {
        serde_json::to_writer(&mut writer, set)?;
    }
    writeln!(writer)?;
    writer.flush().context("Failed to write output")?;
    Ok(())
}
