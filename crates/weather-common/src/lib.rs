//! Common types shared across the weather slice crates.
//!
//! Holds the grid geometry, per-corner scalar fields, loaded datasets and the
//! explicit simulation state that sampling and presentation are driven by.

pub mod attribute;
pub mod bbox;
pub mod dataset;
pub mod error;
pub mod field;
pub mod grid;
pub mod point;
pub mod state;
pub mod view;

pub use attribute::{Attribute, AttributeRanges, FieldKind};
pub use bbox::BoundingBox;
pub use dataset::{Dataset, TimeAxis};
pub use error::{CommonError, CommonResult};
pub use field::ScalarField;
pub use grid::{side_of_line, CellCorners, CellIndex, Grid, LineSide};
pub use point::{Point, QueryLine};
pub use state::SimulationState;
pub use view::{pixel_length, Viewport};
