//! Slicer configuration loading.

use anyhow::{Context, Result};
use grid_slicer::{SliceError, SlicerConfig};
use std::path::Path;
use tracing::info;

/// Load the slicer configuration from a YAML file, or from `SLICE_*`
/// environment variables when no file is given, and validate it.
pub fn load_config(path: Option<&Path>) -> Result<SlicerConfig> {
    let config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let config: SlicerConfig = serde_yaml::from_str(&contents)
                .with_context(|| format!("failed to parse config {}", path.display()))?;
            info!(path = %path.display(), "Loaded slicer config");
            config
        }
        None => SlicerConfig::from_env(),
    };

    config.validate().map_err(SliceError::config)?;
    Ok(config)
}
