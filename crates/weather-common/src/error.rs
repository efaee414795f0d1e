//! Error types shared by the weather slice crates.

use thiserror::Error;

/// Result type alias using CommonError.
pub type CommonResult<T> = Result<T, CommonError>;

/// Errors raised while building or loading grids, fields and datasets.
#[derive(Debug, Error)]
pub enum CommonError {
    // === Geometry Errors ===
    #[error("Invalid grid dimensions: {rows}x{cols} (need at least 2x2 corners)")]
    InvalidGridDimensions { rows: usize, cols: usize },

    #[error("Corner array has {actual} values, expected {expected} for the grid dimensions")]
    CornerCountMismatch { expected: usize, actual: usize },

    #[error("Invalid point '{0}': expected \"x,y\"")]
    InvalidPoint(String),

    // === Field Errors ===
    #[error("Field '{field}' has {len} values, not a multiple of the record size {rec_size}")]
    FieldLengthMismatch {
        field: String,
        len: usize,
        rec_size: usize,
    },

    #[error("Field '{field}' has {actual} timesteps, expected {expected}")]
    TimestepCountMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Timestep {timestep} out of range (dataset has {available})")]
    TimestepOutOfRange { timestep: usize, available: usize },

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    // === Dataset Errors ===
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Failed to read dataset: {0}")]
    DatasetRead(String),

    #[error("Failed to parse dataset: {0}")]
    DatasetParse(String),
}

impl CommonError {
    /// Create an InvalidDataset error.
    pub fn invalid_dataset(msg: impl Into<String>) -> Self {
        Self::InvalidDataset(msg.into())
    }
}

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        Self::DatasetParse(err.to_string())
    }
}
