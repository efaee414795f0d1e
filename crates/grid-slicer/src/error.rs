//! Error types for slice sampling.

use thiserror::Error;
use weather_common::{CellIndex, CommonError};

/// Errors that can occur while sampling a slice.
#[derive(Error, Debug)]
pub enum SliceError {
    /// The bilinear system for a cell has no well-defined solution.
    #[error("singular bilinear system (conditioning {conditioning:e})")]
    SingularSystem { conditioning: f64 },

    /// A located cell does not start a cell of the grid.
    ///
    /// This is a geometry/indexing bug, never a normal "outside the grid" result.
    #[error("cell {cell:?} (flat index {flat}) out of range at slice step {step}")]
    CellOutOfRange {
        cell: CellIndex,
        flat: usize,
        step: usize,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Grid, field or dataset error.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl SliceError {
    /// Create a SingularSystem error.
    pub fn singular(conditioning: f64) -> Self {
        Self::SingularSystem { conditioning }
    }

    /// Create a ConfigError.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Result type for slice operations.
pub type Result<T> = std::result::Result<T, SliceError>;
