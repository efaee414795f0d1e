//! World-space points and slice query lines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommonError;

/// A point in world coordinates (the same space as the grid corners).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point {
            x: (1.0 - t) * self.x + t * other.x,
            y: (1.0 - t) * self.y + t * other.y,
        }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// The same point with its axes swapped.
    ///
    /// Edge tests against the near-vertical sides of a cell are evaluated in
    /// this frame so that "above"/"below" mean right/left.
    pub fn transposed(&self) -> Point {
        Point {
            x: self.y,
            y: self.x,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1},{:.1})", self.x, self.y)
    }
}

/// Parse a point from an `"x,y"` string.
impl FromStr for Point {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(CommonError::InvalidPoint(s.to_string()));
        }

        let x = parts[0]
            .parse()
            .map_err(|_| CommonError::InvalidPoint(s.to_string()))?;
        let y = parts[1]
            .parse()
            .map_err(|_| CommonError::InvalidPoint(s.to_string()))?;

        Ok(Self { x, y })
    }
}

/// A user-drawn slice line in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryLine {
    pub start: Point,
    pub end: Point,
}

impl QueryLine {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Reorder the endpoints so the line runs left to right.
    ///
    /// Returns `true` if the endpoints were swapped.
    pub fn canonicalize(&mut self) -> bool {
        if self.start.x > self.end.x {
            std::mem::swap(&mut self.start, &mut self.end);
            true
        } else {
            false
        }
    }

    /// Point at parameter `t` along the line.
    pub fn point_at(&self, t: f64) -> Point {
        self.start.lerp(&self.end, t)
    }

    /// Split the line into `divisions` equal segments and return every
    /// division point, both endpoints included.
    ///
    /// The endpoints are copied verbatim rather than recomputed, so the last
    /// tick is exactly `end` even when the step does not divide evenly.
    pub fn division_points(&self, divisions: usize) -> Vec<Point> {
        if divisions == 0 {
            return vec![self.start, self.end];
        }

        let step_x = (self.end.x - self.start.x) / divisions as f64;
        let step_y = (self.end.y - self.start.y) / divisions as f64;

        let mut points = Vec::with_capacity(divisions + 1);
        points.push(self.start);
        for i in 1..divisions {
            points.push(Point {
                x: self.start.x + i as f64 * step_x,
                y: self.start.y + i as f64 * step_y,
            });
        }
        points.push(self.end);
        points
    }
}
