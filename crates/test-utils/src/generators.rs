//! Test data generators for synthetic grids and fields.
//!
//! These generators create predictable, verifiable geometry and values
//! so that sampled results can be checked against closed-form expectations.

use weather_common::{CellIndex, Grid, Point, ScalarField};

/// Creates a grid with corners at integer coordinates.
///
/// Corner `(row, col)` sits at `(col, row)`, so cell `(r, c)` covers
/// `[c, c+1] × [r, r+1]`.
///
/// # Example
///
/// ```
/// use test_utils::unit_grid;
///
/// let grid = unit_grid(4, 4);
/// assert_eq!(grid.num_cells(), 9);
/// ```
pub fn unit_grid(rows: usize, cols: usize) -> Grid {
    scaled_grid(rows, cols, Point::new(0.0, 0.0), 1.0)
}

/// Creates an axis-aligned grid with square cells of side `spacing`,
/// bottom-left corner at `origin`.
pub fn scaled_grid(rows: usize, cols: usize, origin: Point, spacing: f64) -> Grid {
    build(rows, cols, |r, c| {
        Point::new(origin.x + c as f64 * spacing, origin.y + r as f64 * spacing)
    })
}

/// Creates a sheared grid: every row is shifted right by `shear` times its
/// row number, so the left and right cell edges are slanted.
pub fn skewed_grid(rows: usize, cols: usize, spacing: f64, shear: f64) -> Grid {
    build(rows, cols, |r, c| {
        Point::new((c as f64 + shear * r as f64) * spacing, r as f64 * spacing)
    })
}

/// Creates a square grid rotated counter-clockwise by `angle_deg` about the
/// origin.
pub fn rotated_grid(rows: usize, cols: usize, spacing: f64, angle_deg: f64) -> Grid {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    build(rows, cols, |r, c| {
        let (x, y) = (c as f64 * spacing, r as f64 * spacing);
        Point::new(x * cos - y * sin, x * sin + y * cos)
    })
}

/// Creates a curvilinear grid resembling a lat/lon grid drawn on a cone:
/// rows fan out as they go up (the top row is 20% wider than the bottom
/// one), and corners are jittered deterministically by up to half of
/// `jitter` times the spacing.
pub fn curvilinear_grid(rows: usize, cols: usize, spacing: f64, jitter: f64, seed: u32) -> Grid {
    build(rows, cols, |r, c| {
        let fan = 1.0 + 0.2 * r as f64 / (rows - 1) as f64;
        let center = (cols - 1) as f64 / 2.0;
        let jx = unit_noise(c as u32, r as u32, seed) * jitter;
        let jy = unit_noise(r as u32, c as u32, seed.wrapping_add(1)) * jitter;
        Point::new(
            ((c as f64 - center) * fan + center + jx) * spacing,
            (r as f64 + jy) * spacing,
        )
    })
}

fn build<F>(rows: usize, cols: usize, position: F) -> Grid
where
    F: FnMut(usize, usize) -> Point,
{
    match Grid::from_fn(rows, cols, position) {
        Ok(grid) => grid,
        Err(e) => panic!("invalid test grid {rows}x{cols}: {e}"),
    }
}

/// Creates a field whose value at every corner is `f(corner position)` for
/// each timestep, with `f` also given the timestep number.
pub fn field_from_fn<F>(grid: &Grid, timesteps: usize, mut f: F) -> ScalarField
where
    F: FnMut(usize, Point) -> f32,
{
    let mut values = Vec::with_capacity(timesteps * grid.rec_size());
    for timestep in 0..timesteps {
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                values.push(f(timestep, grid.corner(row, col)));
            }
        }
    }
    match ScalarField::new("test", grid.rec_size(), values) {
        Ok(field) => field,
        Err(e) => panic!("invalid test field: {e}"),
    }
}

/// Creates a field with value `(timestep + 1) * (row + col)` at corner
/// `(row, col)`.
///
/// On a [`unit_grid`] this is exactly `(timestep + 1) * (x + y)` everywhere.
pub fn sum_field(grid: &Grid, timesteps: usize) -> ScalarField {
    let cols = grid.cols();
    let mut values = Vec::with_capacity(timesteps * grid.rec_size());
    for timestep in 0..timesteps {
        for corner in 0..grid.rec_size() {
            let (row, col) = (corner / cols, corner % cols);
            values.push(((timestep + 1) * (row + col)) as f32);
        }
    }
    match ScalarField::new("sum", grid.rec_size(), values) {
        Ok(field) => field,
        Err(e) => panic!("invalid test field: {e}"),
    }
}

/// Creates a field with `a + b·x + c·y` at every corner and timestep.
///
/// Bilinear interpolation reproduces a linear field exactly on any grid.
pub fn linear_field(grid: &Grid, timesteps: usize, a: f64, b: f64, c: f64) -> ScalarField {
    field_from_fn(grid, timesteps, |_, p| (a + b * p.x + c * p.y) as f32)
}

/// Point at local coordinates `(u, v)` in `[0, 1]²` of a cell, blended
/// bilinearly from its corners.
///
/// `(0, 0)` is the bottom-left corner and `(1, 1)` the top-right one.
pub fn cell_point(grid: &Grid, cell: CellIndex, u: f64, v: f64) -> Point {
    let corners = grid.cell_corners(cell);
    let bottom = corners.bottom_left.lerp(&corners.bottom_right, u);
    let top = corners.top_left.lerp(&corners.top_right, u);
    bottom.lerp(&top, v)
}

/// Deterministic pseudo-random `(u, v)` pairs in `[margin, 1 - margin]²`.
pub fn interior_params(count: usize, margin: f64, seed: u32) -> Vec<(f64, f64)> {
    let span = 1.0 - 2.0 * margin;
    (0..count as u32)
        .map(|i| {
            let u = margin + span * (unit_noise(i, 0, seed) + 0.5);
            let v = margin + span * (unit_noise(i, 1, seed) + 0.5);
            (u, v)
        })
        .collect()
}

/// Deterministic noise in `[-0.5, 0.5)`.
fn unit_noise(x: u32, y: u32, seed: u32) -> f64 {
    (simple_hash(x, y, seed) % 10_000) as f64 / 10_000.0 - 0.5
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
