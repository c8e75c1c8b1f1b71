//! Common test fixtures for contour tests.
//!
//! Small hand-written grids whose contours are easy to work out on paper,
//! plus helpers for writing input files.

use std::io::Write;

use tempfile::NamedTempFile;

/// Small grids as `(values, width, height)`, row 0 first.
pub mod grid {
    /// 3x3 grid with a single raised centre node.
    pub const CENTER_PEAK: ([f64; 9], usize, usize) =
        ([0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0], 3, 3);

    /// 3x3 grid with a single lowered centre node.
    pub const CENTER_PIT: ([f64; 9], usize, usize) =
        ([2.0, 2.0, 2.0, 2.0, 0.0, 2.0, 2.0, 2.0, 2.0], 3, 3);

    /// 2x2 saddle: high on one diagonal, low on the other.
    pub const SADDLE_2X2: ([f64; 4], usize, usize) = ([0.0, 10.0, 10.0, 0.0], 2, 2);

    /// 3x3 grid increasing with the column index.
    pub const RAMP_3X3: ([f64; 9], usize, usize) =
        ([0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0, 2.0], 3, 3);

    /// 4x4 grid with two separate raised nodes.
    #[rustfmt::skip]
    pub const TWIN_PEAKS: ([f64; 16], usize, usize) = ([
        0.0, 0.0, 0.0, 0.0,
        0.0, 3.0, 0.0, 0.0,
        0.0, 0.0, 3.0, 0.0,
        0.0, 0.0, 0.0, 0.0,
    ], 4, 4);
}

/// Field input documents in the JSON shape the CLI reads.
pub mod json {
    /// The centre peak with index coordinates.
    pub const CENTER_PEAK: &str = r#"{"z": [[0, 0, 0], [0, 2, 0], [0, 0, 0]]}"#;

    /// The centre peak on explicit axes, with one missing sample.
    pub const CENTER_PEAK_AXES: &str = r#"{
        "z": [[0, 0, 0], [0, 2, 0], [0, 0, null]],
        "x": [10, 20, 30],
        "y": [-1, 0, 1]
    }"#;

    /// Configuration tracing only level 1 with simplification off.
    pub const LEVEL_ONE_CONFIG: &str =
        r#"{"levels": {"start": 1, "end": 1, "size": 1}, "smoothing": 0}"#;
}

/// Writes `contents` to a new temporary file with the given suffix.
///
/// The file is removed when the returned handle is dropped.
pub fn write_temp_file(contents: &str, suffix: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("contour-test-")
        .suffix(suffix)
        .tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
