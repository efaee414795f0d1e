//! Configuration for the slice sampler.

use serde::{Deserialize, Serialize};

/// Configuration for the slice sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicerConfig {
    /// Upper bound on samples per slice pass.
    pub max_steps: usize,

    /// Neighbor steps tried before falling back to a full-grid search.
    pub max_walk_depth: usize,

    /// Cells whose bottom-left corner is farther than this (world units)
    /// from the query point are skipped by the full-grid search.
    pub search_radius: f64,

    /// Number of equal segments the slice axis is labelled with.
    pub axis_divisions: usize,

    /// Value reported for samples that land in a singular cell.
    pub singular_fallback: SingularFallback,
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            max_walk_depth: 10,
            search_radius: 1.0,
            axis_divisions: 8,
            singular_fallback: SingularFallback::NearestCorner,
        }
    }
}

impl SlicerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SLICE_MAX_STEPS") {
            if let Ok(steps) = val.parse() {
                config.max_steps = steps;
            }
        }

        if let Ok(val) = std::env::var("SLICE_MAX_WALK_DEPTH") {
            if let Ok(depth) = val.parse() {
                config.max_walk_depth = depth;
            }
        }

        if let Ok(val) = std::env::var("SLICE_SEARCH_RADIUS") {
            if let Ok(radius) = val.parse() {
                config.search_radius = radius;
            }
        }

        if let Ok(val) = std::env::var("SLICE_AXIS_DIVISIONS") {
            if let Ok(divisions) = val.parse() {
                config.axis_divisions = divisions;
            }
        }

        if let Ok(val) = std::env::var("SLICE_SINGULAR_FALLBACK") {
            config.singular_fallback = SingularFallback::from_str(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_steps == 0 {
            return Err("max_steps must be > 0".to_string());
        }

        if self.max_walk_depth == 0 {
            return Err("max_walk_depth must be > 0".to_string());
        }

        if !(self.search_radius.is_finite() && self.search_radius > 0.0) {
            return Err("search_radius must be a positive number".to_string());
        }

        if self.axis_divisions == 0 {
            return Err("axis_divisions must be > 0".to_string());
        }

        Ok(())
    }
}

/// What to report for a sample whose cell cannot be interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SingularFallback {
    /// Value of the cell corner nearest to the sample point.
    #[default]
    NearestCorner,
    /// The out-of-grid sentinel (0.0).
    Sentinel,
}

impl SingularFallback {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sentinel" | "zero" => Self::Sentinel,
            _ => Self::NearestCorner,
        }
    }

    /// Get the policy name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NearestCorner => "nearest-corner",
            Self::Sentinel => "sentinel",
        }
    }
}
