//! Contour tracing for gridded scalar fields.
//!
//! Produces, for each level of a level set:
//! - Closed loops that stay inside the grid
//! - Edge paths that start and end on the grid boundary
//! - Fill boundary rings enclosing the region above the level
//!
//! # Architecture
//!
//! ```text
//! Field + ContourConfig
//!      │
//!      ▼
//! compute_contours()  ── one task per level (rayon)
//!      │
//!      ├─► CrossingTable::build   classify cells (marching squares)
//!      │
//!      ├─► LevelTrace::run        boundary starts, then interior loops
//!      │         │
//!      │         └─► simplify + join_edge_path
//!      │
//!      ├─► fill_boundary          perimeter walk, clockwise
//!      │
//!      └─► smooth_path            optional Chaikin passes
//! ```
//!
//! # Output units
//!
//! Crossings are compared after the axis transforms are applied: points
//! closer than [`POINT_EPSILON`] on both axes are merged. A grid whose node
//! spacing in output units is around that size collapses, and its traces are
//! reported as [`Anomaly::DegeneratePath`]. Map such grids onto a pixel box
//! with [`Linear::fit`].
//!
//! # Example
//!
//! ```
//! use contour_tracer::{compute_contours, ContourConfig, Field, Identity, LevelSpec};
//!
//! let field = Field::new(vec![0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0], 3, 3).unwrap();
//! let config = ContourConfig {
//!     levels: LevelSpec::new(1.0, 1.0, 1.0),
//!     ..ContourConfig::default()
//! };
//! let set = compute_contours(&field, &config, &Identity, &Identity).unwrap();
//! assert_eq!(set.levels[0].closed_paths.len(), 1);
//! ```

pub mod anomaly;
pub mod config;
pub mod crossings;
pub mod error;
pub mod field;
pub mod geometry;
pub mod levels;
pub mod marching;
pub mod merge;
pub mod pipeline;
pub mod simplify;
pub mod smooth;
pub mod tracer;
pub mod transform;

// Re-export commonly used types at crate root
pub use anomaly::Anomaly;
pub use config::ContourConfig;
pub use error::{ContourError, Result};
pub use field::{Cell, Coordinates, Field, Sampler};
pub use geometry::{Path, Perimeter, Point, POINT_EPSILON};
pub use levels::{LevelSpec, MAX_LEVELS};
pub use marching::{classify, CellCode, MarchingCode, Saddle, Side};
pub use pipeline::{compute_contours, trace_level, ContourSet, LevelPaths};
pub use tracer::Projector;
pub use transform::{AxisTransform, Identity, Linear};
