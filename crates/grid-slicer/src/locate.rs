//! Point location: which cell of a grid contains a world point.
//!
//! Two strategies are provided. [`Locator::find_first_cell`] scans every cell
//! and is used when nothing is known about where the point is.
//! [`Locator::next_cell`] walks from a known cell toward the point one
//! neighbor at a time, which is O(1) for consecutive samples along a line.

use tracing::{debug, trace};
use weather_common::{side_of_line, CellCorners, CellIndex, Grid, LineSide, Point};

use crate::config::SlicerConfig;

/// Result of testing a point against the four edges of one cell.
///
/// Each flag is set when the point lies on the outer side of that edge.
/// Points exactly on an edge are not flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeTest {
    pub below_bottom: bool,
    pub right_of_right: bool,
    pub above_top: bool,
    pub left_of_left: bool,
}

impl EdgeTest {
    /// Test `p` against the edges of a cell.
    ///
    /// The bottom and top edges are classified directly. The left and right
    /// edges run roughly along y, so they are classified in the transposed
    /// frame, where "above" means larger x.
    pub fn evaluate(corners: &CellCorners, p: Point) -> Self {
        let pt = p.transposed();

        Self {
            below_bottom: side_of_line(corners.bottom_left, corners.bottom_right, p)
                == LineSide::Below,
            above_top: side_of_line(corners.top_left, corners.top_right, p) == LineSide::Above,
            right_of_right: side_of_line(
                corners.bottom_right.transposed(),
                corners.top_right.transposed(),
                pt,
            ) == LineSide::Above,
            left_of_left: side_of_line(
                corners.bottom_left.transposed(),
                corners.top_left.transposed(),
                pt,
            ) == LineSide::Below,
        }
    }

    /// True when no edge test failed.
    pub fn is_inside(&self) -> bool {
        !(self.below_bottom || self.right_of_right || self.above_top || self.left_of_left)
    }

    /// Direction `(d_row, d_col)` of the neighbor across the failing edges.
    pub fn step(&self) -> (isize, isize) {
        let d_row = if self.below_bottom {
            -1
        } else if self.above_top {
            1
        } else {
            0
        };
        let d_col = if self.left_of_left {
            -1
        } else if self.right_of_right {
            1
        } else {
            0
        };
        (d_row, d_col)
    }
}

/// Outcome of a neighbor walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// The walk reached the containing cell after `steps` moves.
    Found { cell: CellIndex, steps: usize },
    /// The walk gave up and the full-grid scan found the cell.
    FoundByScan(CellIndex),
    /// The point is not inside any cell.
    Outside,
}

impl WalkOutcome {
    /// The containing cell, if one was found.
    pub fn cell(&self) -> Option<CellIndex> {
        match *self {
            Self::Found { cell, .. } | Self::FoundByScan(cell) => Some(cell),
            Self::Outside => None,
        }
    }
}

/// Locates points in the cells of one grid.
#[derive(Debug, Clone, Copy)]
pub struct Locator<'a> {
    grid: &'a Grid,
    search_radius: f64,
    max_walk_depth: usize,
}

impl<'a> Locator<'a> {
    pub fn new(grid: &'a Grid, config: &SlicerConfig) -> Self {
        Self {
            grid,
            search_radius: config.search_radius,
            max_walk_depth: config.max_walk_depth,
        }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Edge tests of `p` against `cell`.
    pub fn edge_test(&self, p: Point, cell: CellIndex) -> EdgeTest {
        EdgeTest::evaluate(&self.grid.cell_corners(cell), p)
    }

    /// Whether `p` lies in `cell`, boundary included.
    pub fn inside_cell(&self, p: Point, cell: CellIndex) -> bool {
        self.edge_test(p, cell).is_inside()
    }

    /// Scan every cell in row-major order for one containing `p`.
    ///
    /// Cells whose bottom-left corner is farther than the search radius from
    /// `p` are skipped without running the edge tests.
    pub fn find_first_cell(&self, p: Point) -> Option<CellIndex> {
        if !self.grid.bounds().contains(&p) {
            return None;
        }

        let radius_sq = self.search_radius * self.search_radius;
        self.grid.cells().find(|&cell| {
            let origin = self.grid.corner(cell.row, cell.col);
            let (dx, dy) = (p.x - origin.x, p.y - origin.y);
            dx * dx + dy * dy <= radius_sq && self.inside_cell(p, cell)
        })
    }

    /// Walk from `start` toward the cell containing `p`.
    ///
    /// Each failed inside test moves to the neighbor across the failing
    /// edges. When that neighbor does not exist, the row-only and
    /// column-only moves are tried; if none exists the point is outside.
    /// At most `max_walk_depth` cells are tested before the walk gives up
    /// and scans the grid.
    pub fn next_cell(&self, p: Point, start: CellIndex) -> WalkOutcome {
        let mut cell = start;

        for steps in 0..self.max_walk_depth {
            let test = self.edge_test(p, cell);
            if test.is_inside() {
                return WalkOutcome::Found { cell, steps };
            }

            let (d_row, d_col) = test.step();
            match self.step_toward(cell, d_row, d_col) {
                Some(next) => {
                    trace!(?cell, ?next, x = p.x, y = p.y, "Walk step");
                    cell = next;
                }
                None => {
                    trace!(?cell, d_row, d_col, "Walk left the grid");
                    return WalkOutcome::Outside;
                }
            }
        }

        debug!(
            ?start,
            depth = self.max_walk_depth,
            x = p.x,
            y = p.y,
            "Walk depth exceeded, scanning grid"
        );
        match self.find_first_cell(p) {
            Some(cell) => WalkOutcome::FoundByScan(cell),
            None => WalkOutcome::Outside,
        }
    }

    fn step_toward(&self, cell: CellIndex, d_row: isize, d_col: isize) -> Option<CellIndex> {
        self.grid.neighbor(cell, d_row, d_col).or_else(|| {
            if d_row != 0 && d_col != 0 {
                self.grid
                    .neighbor(cell, 0, d_col)
                    .or_else(|| self.grid.neighbor(cell, d_row, 0))
            } else {
                None
            }
        })
    }
}
