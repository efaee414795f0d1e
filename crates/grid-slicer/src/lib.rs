//! Slice sampling of scalar fields on curvilinear grids
//!
//! This crate turns a line drawn across the map into a 1-D cross-section of a
//! weather field. It provides:
//!
//! - **Point location**: a neighbor walk that follows consecutive samples
//!   from cell to cell, with a full-grid scan as fallback
//! - **Bilinear interpolation**: an exact fit through each cell's four corners
//! - **Chart layout**: the polyline and axis labels for the slice chart
//!
//! # Architecture
//!
//! ```text
//! QueryLine + ScalarField + timestep
//!      │
//!      ▼
//! SliceSampler::run(line, field, timestep, N)
//!      │
//!      ├─► For each step k: p = lerp(start, end, k / N)
//!      │         │
//!      │         ├─► Searching: Locator::find_first_cell(p)
//!      │         │
//!      │         └─► Tracking:  Locator::next_cell(p, cell)
//!      │
//!      ├─► BilinearSurface::fit(corners, values).value_at(p)
//!      │
//!      └─► SliceOutput { samples, ticks }
//!               │
//!               ▼
//!          ChartLayout::polyline / y_labels / x_labels
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_slicer::{SliceSampler, SlicerConfig};
//! use weather_common::{Point, QueryLine};
//!
//! let sampler = SliceSampler::new(&grid, &SlicerConfig::default());
//! let mut line = QueryLine::new(Point::new(-120.0, 38.0), Point::new(-118.0, 37.0));
//! let output = sampler.run(&mut line, &field, timestep, 500)?;
//!
//! for value in output.values() {
//!     // ...
//! }
//! ```

pub mod bilinear;
pub mod chart;
pub mod config;
pub mod error;
pub mod locate;
pub mod sampler;

// Re-export commonly used types at crate root
pub use bilinear::{interpolate, BilinearSurface};
pub use chart::{AxisLabel, ChartLayout};
pub use config::{SingularFallback, SlicerConfig};
pub use error::{Result, SliceError};
pub use locate::{EdgeTest, Locator, WalkOutcome};
pub use sampler::{
    run_slice_pass, slice_step_count, AttributeSlice, DailySlice, Sample, SliceOutput,
    SliceSampler, OUTSIDE_VALUE,
};
