//! Structured grid geometry.
//!
//! A grid is `rows × cols` corner points stored as one flat, row-major array
//! of interleaved `(x, y)` pairs. Row 0 is the bottom row. A cell is the
//! quadrilateral whose bottom-left corner is `(row, col)`; the last row and
//! last column of corners only close cells and never start one.
//!
//! All offset arithmetic into the flat array happens here. The flat layout is
//! kept as-is so the corner buffer can be handed to a renderer unchanged.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::bbox::BoundingBox;
use crate::error::{CommonError, CommonResult};
use crate::point::Point;

/// Position of a point relative to a directed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSide {
    Above,
    On,
    Below,
}

/// Classify `c` against the line through `a` and `b`.
///
/// Uses the parametric position of `c` along each axis rather than a cross
/// product: `tx` and `ty` are where `c` falls between `a` and `b` in x and y.
/// Equal parameters mean `c` is on the line; otherwise the sign of the
/// line's rise decides which side `c` is on.
///
/// A vertical segment (`a.x == b.x`) always reports [`LineSide::On`]. This
/// is a known approximation; callers that test near-vertical edges should
/// evaluate them in the transposed frame (see [`Point::transposed`]).
/// A horizontal segment is resolved by comparing y directly.
pub fn side_of_line(a: Point, b: Point, c: Point) -> LineSide {
    if a.x == b.x {
        return LineSide::On;
    }
    let tx = (c.x - a.x) / (b.x - a.x);

    if a.y == b.y {
        return match c.y.partial_cmp(&a.y) {
            Some(Ordering::Less) => LineSide::Below,
            Some(Ordering::Greater) => LineSide::Above,
            _ => LineSide::On,
        };
    }
    let ty = (c.y - a.y) / (b.y - a.y);

    if tx == ty {
        return LineSide::On;
    }

    let rising = a.y < b.y;
    match (rising, tx > ty) {
        (true, true) | (false, false) => LineSide::Below,
        _ => LineSide::Above,
    }
}

/// Address of a cell by its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The four corner positions of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellCorners {
    pub bottom_left: Point,
    pub bottom_right: Point,
    pub top_left: Point,
    pub top_right: Point,
}

impl CellCorners {
    /// Corners in bottom-left, bottom-right, top-left, top-right order.
    ///
    /// Matches the order of [`Grid::corner_indices`].
    pub fn to_array(&self) -> [Point; 4] {
        [
            self.bottom_left,
            self.bottom_right,
            self.top_left,
            self.top_right,
        ]
    }

    /// Position (in [`CellCorners::to_array`] order) of the corner closest to `p`.
    pub fn nearest_corner(&self, p: &Point) -> usize {
        let corners = self.to_array();
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (k, corner) in corners.iter().enumerate() {
            let d = corner.distance(p);
            if d < best_dist {
                best = k;
                best_dist = d;
            }
        }
        best
    }
}

/// Corner geometry of a structured grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GridLayout", into = "GridLayout")]
pub struct Grid {
    rows: usize,
    cols: usize,
    coords: Vec<f32>,
    bounds: BoundingBox,
}

/// Serialized form of a [`Grid`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridLayout {
    rows: usize,
    cols: usize,
    coords: Vec<f32>,
}

impl TryFrom<GridLayout> for Grid {
    type Error = CommonError;

    fn try_from(layout: GridLayout) -> Result<Self, Self::Error> {
        Grid::new(layout.rows, layout.cols, layout.coords)
    }
}

impl From<Grid> for GridLayout {
    fn from(grid: Grid) -> Self {
        Self {
            rows: grid.rows,
            cols: grid.cols,
            coords: grid.coords,
        }
    }
}

/// Number of interleaved coordinate values for `rows × cols` corners.
fn corner_value_count(rows: usize, cols: usize) -> CommonResult<usize> {
    rows.checked_mul(cols)
        .and_then(|n| n.checked_mul(2))
        .ok_or(CommonError::InvalidGridDimensions { rows, cols })
}

impl Grid {
    /// Build a grid from interleaved corner coordinates.
    ///
    /// `coords` must hold `2 * rows * cols` values, row-major, bottom row first.
    pub fn new(rows: usize, cols: usize, coords: Vec<f32>) -> CommonResult<Self> {
        if rows < 2 || cols < 2 {
            return Err(CommonError::InvalidGridDimensions { rows, cols });
        }

        let expected = corner_value_count(rows, cols)?;
        if coords.len() != expected {
            return Err(CommonError::CornerCountMismatch {
                expected,
                actual: coords.len(),
            });
        }

        let bounds = BoundingBox::enclosing(
            coords
                .chunks_exact(2)
                .map(|xy| Point::new(xy[0] as f64, xy[1] as f64)),
        )
        .ok_or(CommonError::InvalidGridDimensions { rows, cols })?;

        Ok(Self {
            rows,
            cols,
            coords,
            bounds,
        })
    }

    /// Build a grid by evaluating `position(row, col)` for every corner.
    pub fn from_fn<F>(rows: usize, cols: usize, mut position: F) -> CommonResult<Self>
    where
        F: FnMut(usize, usize) -> Point,
    {
        let mut coords = Vec::with_capacity(corner_value_count(rows, cols)?);
        for row in 0..rows {
            for col in 0..cols {
                let p = position(row, col);
                coords.push(p.x as f32);
                coords.push(p.y as f32);
            }
        }
        Self::new(rows, cols, coords)
    }

    /// Number of corner rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of corner columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of corners per timestep (`rows * cols`).
    pub fn rec_size(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of floats per corner row in the interleaved array.
    pub fn points_per_row(&self) -> usize {
        2 * self.cols
    }

    /// Number of rows of cells.
    pub fn cell_rows(&self) -> usize {
        self.rows - 1
    }

    /// Number of columns of cells.
    pub fn cell_cols(&self) -> usize {
        self.cols - 1
    }

    /// Total number of cells.
    pub fn num_cells(&self) -> usize {
        self.cell_rows() * self.cell_cols()
    }

    /// Axis-aligned extent of all corners.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Position of the corner at `(row, col)`.
    pub fn corner(&self, row: usize, col: usize) -> Point {
        debug_assert!(row < self.rows && col < self.cols);
        let i = 2 * (row * self.cols + col);
        Point::new(self.coords[i] as f64, self.coords[i + 1] as f64)
    }

    /// Whether `cell` starts a cell (it is not in the last row or column).
    pub fn contains_cell(&self, cell: CellIndex) -> bool {
        cell.row < self.cell_rows() && cell.col < self.cell_cols()
    }

    /// Offset of the cell's bottom-left x coordinate in the interleaved array.
    pub fn flat_index(&self, cell: CellIndex) -> usize {
        2 * (cell.row * self.cols + cell.col)
    }

    /// Cell starting at interleaved offset `flat`, if that offset is the x
    /// coordinate of a corner that opens a cell.
    pub fn cell_at_flat(&self, flat: usize) -> Option<CellIndex> {
        if !self.is_cell_origin(flat) {
            return None;
        }
        let corner = flat / 2;
        Some(CellIndex::new(corner / self.cols, corner % self.cols))
    }

    /// Whether interleaved offset `flat` is a valid bottom-left cell index.
    ///
    /// Valid offsets point at an x coordinate (even), lie before the last
    /// corner row, and are not in the last corner column.
    pub fn is_cell_origin(&self, flat: usize) -> bool {
        let per_row = self.points_per_row();
        flat % 2 == 0 && flat < 2 * self.rec_size() - per_row && flat % per_row < per_row - 2
    }

    /// Corner positions of `cell`.
    pub fn cell_corners(&self, cell: CellIndex) -> CellCorners {
        debug_assert!(
            self.contains_cell(cell),
            "cell {:?} outside {}x{} grid",
            cell,
            self.rows,
            self.cols
        );
        let i = self.flat_index(cell);
        let stride = self.points_per_row();
        let c = &self.coords;
        let at = |k: usize| Point::new(c[k] as f64, c[k + 1] as f64);

        CellCorners {
            bottom_left: at(i),
            bottom_right: at(i + 2),
            top_left: at(i + stride),
            top_right: at(i + stride + 2),
        }
    }

    /// Corner indices (into a per-timestep record) of `cell`, in
    /// bottom-left, bottom-right, top-left, top-right order.
    pub fn corner_indices(&self, cell: CellIndex) -> [usize; 4] {
        debug_assert!(self.contains_cell(cell));
        let k = cell.row * self.cols + cell.col;
        [k, k + 1, k + self.cols, k + self.cols + 1]
    }

    /// Neighbor of `cell` offset by `(d_row, d_col)`, if it is a cell.
    pub fn neighbor(&self, cell: CellIndex, d_row: isize, d_col: isize) -> Option<CellIndex> {
        let row = cell.row.checked_add_signed(d_row)?;
        let col = cell.col.checked_add_signed(d_col)?;
        let next = CellIndex::new(row, col);
        self.contains_cell(next).then_some(next)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..self.cell_rows())
            .flat_map(move |row| (0..self.cell_cols()).map(move |col| CellIndex::new(row, col)))
    }

    /// Boundary ring of the grid: bottom row left to right, right column
    /// upward, top row right to left, left column downward. The first point
    /// is not repeated at the end.
    pub fn outline(&self) -> Vec<Point> {
        let (rows, cols) = (self.rows, self.cols);
        let mut ring = Vec::with_capacity(2 * (rows + cols) - 4);

        for col in 0..cols {
            ring.push(self.corner(0, col));
        }
        for row in 1..rows {
            ring.push(self.corner(row, cols - 1));
        }
        for col in (0..cols - 1).rev() {
            ring.push(self.corner(rows - 1, col));
        }
        for row in (1..rows - 1).rev() {
            ring.push(self.corner(row, 0));
        }
        ring
    }
}
