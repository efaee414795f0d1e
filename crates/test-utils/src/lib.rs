//! Shared test utilities for the weather slice workspace.
//!
//! Synthetic grids and fields with closed-form values, on-disk datasets for
//! loader and CLI tests, and tolerance assertions for sampled values.
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, sum_field, unit_grid};
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

/// Assert that two numbers differ by at most `tol`.
///
/// Both sides are widened to `f64`, so `f32` samples can be compared with
/// `f64` expectations directly.
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr, $tol:expr) => {{
        let (actual, expected, tol) = ($actual as f64, $expected as f64, $tol as f64);
        assert!(
            (actual - expected).abs() <= tol,
            "sample {actual} differs from {expected} by more than {tol}"
        );
    }};
}

/// Assert that two [`weather_common::Point`]s lie within `tol` of each other
/// on both axes.
#[macro_export]
macro_rules! assert_point_approx_eq {
    ($actual:expr, $expected:expr, $tol:expr) => {{
        let (actual, expected) = ($actual, $expected);
        assert!(
            (actual.x - expected.x).abs() <= $tol && (actual.y - expected.y).abs() <= $tol,
            "point {actual:?} is not within {} of {expected:?}",
            $tol
        );
    }};
}
