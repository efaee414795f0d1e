//! Loaded weather datasets: grid geometry, four fields and a time axis.
//!
//! Datasets are read from a JSON document:
//!
//! ```json
//! {
//!   "rows": 4,
//!   "cols": 4,
//!   "coords": [0.0, 0.0, 1.0, 0.0, ...],
//!   "start_time": "2010-10-01T00:00:00Z",
//!   "hours_per_step": 3,
//!   "fields": {
//!     "snowpack": [...],
//!     "precipitation": [...]
//!   }
//! }
//! ```
//!
//! Fields left out of `fields` are filled with zeros. Every present field must
//! hold the same number of timesteps.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::attribute::{AttributeRanges, FieldKind};
use crate::error::{CommonError, CommonResult};
use crate::field::ScalarField;
use crate::grid::Grid;

const HOURS_PER_DAY: u32 = 24;

/// Mapping from timestep numbers to wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxis {
    /// Time of timestep 0.
    pub start: DateTime<Utc>,
    /// Hours between consecutive timesteps.
    pub hours_per_step: u32,
}

impl TimeAxis {
    pub fn new(start: DateTime<Utc>, hours_per_step: u32) -> Self {
        Self {
            start,
            hours_per_step,
        }
    }

    /// Wall-clock time of `timestep`.
    pub fn time_of(&self, timestep: usize) -> DateTime<Utc> {
        self.start + Duration::hours(timestep as i64 * self.hours_per_step as i64)
    }

    /// Number of timesteps that make up one day (at least 1).
    pub fn samples_per_day(&self) -> usize {
        (HOURS_PER_DAY / self.hours_per_step.max(1)).max(1) as usize
    }

    /// Day number (from the start) that `timestep` falls on.
    pub fn day_of(&self, timestep: usize) -> usize {
        timestep / self.samples_per_day()
    }
}

#[derive(Debug, Deserialize)]
struct DatasetDocument {
    rows: usize,
    cols: usize,
    coords: Vec<f32>,
    start_time: DateTime<Utc>,
    #[serde(default = "default_hours_per_step")]
    hours_per_step: u32,
    #[serde(default)]
    fields: HashMap<FieldKind, Vec<f32>>,
}

fn default_hours_per_step() -> u32 {
    3
}

/// A fully loaded and validated dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    grid: Grid,
    fields: [ScalarField; 4],
    time: TimeAxis,
    ranges: AttributeRanges,
}

impl Dataset {
    /// Assemble a dataset from already-built parts.
    ///
    /// Fields are given in [`FieldKind::ALL`] order.
    pub fn new(grid: Grid, fields: [ScalarField; 4], time: TimeAxis) -> CommonResult<Self> {
        let timesteps = fields[0].timesteps();
        if timesteps == 0 {
            return Err(CommonError::invalid_dataset("dataset has no timesteps"));
        }

        for (kind, field) in FieldKind::ALL.iter().zip(fields.iter()) {
            if field.rec_size() != grid.rec_size() {
                return Err(CommonError::FieldLengthMismatch {
                    field: kind.to_string(),
                    len: field.values().len(),
                    rec_size: grid.rec_size(),
                });
            }
            if field.timesteps() != timesteps {
                return Err(CommonError::TimestepCountMismatch {
                    field: kind.to_string(),
                    expected: timesteps,
                    actual: field.timesteps(),
                });
            }
        }

        let ranges = AttributeRanges::compute(|kind| &fields[field_slot(kind)]);

        Ok(Self {
            grid,
            fields,
            time,
            ranges,
        })
    }

    /// Parse and validate a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> CommonResult<Self> {
        let doc: DatasetDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Load a dataset from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> CommonResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CommonError::DatasetRead(format!("{}: {}", path.display(), e)))?;
        let dataset = Self::from_json_str(&content)?;

        tracing::info!(
            path = %path.display(),
            rows = dataset.grid.rows(),
            cols = dataset.grid.cols(),
            timesteps = dataset.timesteps(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    fn from_document(mut doc: DatasetDocument) -> CommonResult<Self> {
        let grid = Grid::new(doc.rows, doc.cols, doc.coords)?;
        let rec_size = grid.rec_size();

        let timesteps = doc
            .fields
            .values()
            .map(|v| v.len() / rec_size.max(1))
            .max()
            .ok_or_else(|| CommonError::invalid_dataset("dataset defines no fields"))?;

        let mut build = |kind: FieldKind| -> CommonResult<ScalarField> {
            let values = doc
                .fields
                .remove(&kind)
                .unwrap_or_else(|| vec![0.0; timesteps * rec_size]);
            ScalarField::new(kind.as_str(), rec_size, values)
        };

        let fields = [
            build(FieldKind::Snowpack)?,
            build(FieldKind::Snowfall)?,
            build(FieldKind::Precipitation)?,
            build(FieldKind::Runoff)?,
        ];

        Self::new(grid, fields, TimeAxis::new(doc.start_time, doc.hours_per_step))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn field(&self, kind: FieldKind) -> &ScalarField {
        &self.fields[field_slot(kind)]
    }

    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    pub fn ranges(&self) -> &AttributeRanges {
        &self.ranges
    }

    /// Number of timesteps shared by every field.
    pub fn timesteps(&self) -> usize {
        self.fields[0].timesteps()
    }
}

fn field_slot(kind: FieldKind) -> usize {
    match kind {
        FieldKind::Snowpack => 0,
        FieldKind::Snowfall => 1,
        FieldKind::Precipitation => 2,
        FieldKind::Runoff => 3,
    }
}
