//! Common test fixtures for slice tests.
//!
//! This module provides pre-defined lines and on-disk datasets that
//! represent common slicing scenarios.

use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

/// Common query lines, as `(start, end)` coordinate pairs.
pub mod lines {
    /// Diagonal across the middle of a 4×4-corner unit grid
    pub const DIAGONAL: ((f64, f64), (f64, f64)) = ((0.5, 0.5), (2.5, 2.5));

    /// Entirely below-left of a grid spanning (0,0)-(3,3)
    pub const OUTSIDE: ((f64, f64), (f64, f64)) = ((-5.0, -5.0), (-1.0, -1.0));

    /// Enters a grid spanning (0,0)-(3,3) from the left and exits on the right
    pub const CROSSING: ((f64, f64), (f64, f64)) = ((-1.5, 1.5), (4.5, 1.5));

    /// Drawn right to left; sampled after swapping its ends
    pub const REVERSED: ((f64, f64), (f64, f64)) = ((2.5, 0.5), (0.5, 2.5));
}

/// Reference start time used by generated datasets.
pub const START_TIME: &str = "2010-10-01T00:00:00Z";

/// Builds the JSON document of a unit-spaced dataset.
///
/// Corner `(row, col)` sits at `(col, row)`. Snowpack holds
/// `(timestep + 1) * (row + col)`, precipitation holds `timestep`, and the
/// remaining fields are left out (they load as zeros).
pub fn dataset_json(rows: usize, cols: usize, timesteps: usize) -> String {
    let mut coords = Vec::with_capacity(2 * rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            coords.push(col as f32);
            coords.push(row as f32);
        }
    }

    let mut snowpack = Vec::with_capacity(timesteps * rows * cols);
    let mut precipitation = Vec::with_capacity(timesteps * rows * cols);
    for timestep in 0..timesteps {
        for row in 0..rows {
            for col in 0..cols {
                snowpack.push(((timestep + 1) * (row + col)) as f32);
                precipitation.push(timestep as f32);
            }
        }
    }

    json!({
        "rows": rows,
        "cols": cols,
        "coords": coords,
        "start_time": START_TIME,
        "hours_per_step": 3,
        "fields": {
            "snowpack": snowpack,
            "precipitation": precipitation,
        }
    })
    .to_string()
}

/// Writes `content` to a temporary `.json` file that lives as long as the
/// returned handle.
pub fn write_temp_file(content: &str) -> NamedTempFile {
    let mut file = match tempfile::Builder::new().suffix(".json").tempfile() {
        Ok(file) => file,
        Err(e) => panic!("failed to create temp file: {e}"),
    };
    if let Err(e) = file.write_all(content.as_bytes()) {
        panic!("failed to write temp file: {e}");
    }
    file
}

/// Writes a [`dataset_json`] dataset to a temporary file.
pub fn write_temp_dataset(rows: usize, cols: usize, timesteps: usize) -> NamedTempFile {
    write_temp_file(&dataset_json(rows, cols, timesteps))
}
