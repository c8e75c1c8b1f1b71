//! Synthetic scalar fields for contour tests.
//!
//! All generators return values in row-major order with row 0 first, the
//! layout `Field::new` expects.

/// Creates a single radial peak.
///
/// The value is `peak - distance` from the centre node, so every level
/// between 0 and `peak` gives one closed loop if the grid is large enough.
///
/// # Example
///
/// ```
/// use test_utils::create_peak_grid;
///
/// let grid = create_peak_grid(5, 5, 10.0);
/// assert_eq!(grid.len(), 25);
/// assert_eq!(grid[12], 10.0); // centre node
/// ```
pub fn create_peak_grid(width: usize, height: usize, peak: f64) -> Vec<f64> {
    let cx = (width.saturating_sub(1)) as f64 / 2.0;
    let cy = (height.saturating_sub(1)) as f64 / 2.0;
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            data.push(peak - (dx * dx + dy * dy).sqrt());
        }
    }
    data
}

/// Creates a grid that increases linearly with the column index.
///
/// Each value is `col * step`; contours are vertical lines from the bottom
/// edge to the top edge.
pub fn create_ramp_grid(width: usize, height: usize, step: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            data.push(col as f64 * step);
        }
    }
    data
}

/// Creates a saddle, `(x - cx) * (y - cy)` around the grid centre.
pub fn create_saddle_grid(width: usize, height: usize) -> Vec<f64> {
    let cx = (width.saturating_sub(1)) as f64 / 2.0;
    let cy = (height.saturating_sub(1)) as f64 / 2.0;
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col as f64 - cx) * (row as f64 - cy));
        }
    }
    data
}

/// Creates a grid filled with a constant value.
pub fn create_flat_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// Creates a smooth, wavy field with several peaks and valleys.
///
/// Values stay within `[-2, 2]`.
pub fn create_wave_grid(width: usize, height: usize, wavelength: f64) -> Vec<f64> {
    let k = std::f64::consts::TAU / wavelength.max(1.0);
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let x = col as f64 * k;
            let y = row as f64 * k;
            data.push(x.sin() + (y * 0.7).cos());
        }
    }
    data
}

/// Creates a grid with deterministic noise in `[0, 1)`.
///
/// Uses a simple hash so every call with the same seed gives the same data.
pub fn create_noise_grid(width: usize, height: usize, seed: u32) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            data.push((hash % 10_000) as f64 / 10_000.0);
        }
    }
    data
}

/// Replaces every `every`-th value with NaN.
pub fn with_missing(mut data: Vec<f64>, every: usize) -> Vec<f64> {
    if every == 0 {
        return data;
    }
    for value in data.iter_mut().step_by(every) {
        *value = f64::NAN;
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
