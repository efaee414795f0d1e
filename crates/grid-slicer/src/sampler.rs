//! Slice sampling: N evenly spaced samples of a field along a query line.
//!
//! The sampler keeps track of the cell the previous sample landed in, so
//! consecutive samples are located by a short neighbor walk instead of a
//! scan over the whole grid:
//!
//! ```text
//!            find_first_cell ok
//!   Searching ──────────────────► Tracking(cell)
//!       ▲  │ miss: emit 0.0          │  │ next_cell ok: interpolate
//!       │  └──────┘                  │  └──────┘
//!       └────────────────────────────┘
//!            next_cell outside: emit 0.0
//! ```
//!
//! Every pass starts in `Searching` and reads the field record for its
//! timestep once, up front.

use serde::Serialize;
use tracing::{debug, error, warn};
use weather_common::{
    pixel_length, Attribute, CellIndex, CommonError, Dataset, Grid, Point, QueryLine,
    ScalarField, SimulationState,
};

use crate::bilinear::BilinearSurface;
use crate::config::{SingularFallback, SlicerConfig};
use crate::error::{Result, SliceError};
use crate::locate::Locator;

/// Value emitted for samples outside the grid.
pub const OUTSIDE_VALUE: f32 = 0.0;

/// One sample along a slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Sample {
    /// Interpolated value.
    Value { value: f32 },
    /// The sample point is not inside any cell.
    Outside,
    /// The owning cell has no well-defined bilinear surface; `value` is the
    /// configured fallback.
    Singular { cell: CellIndex, value: f32 },
}

impl Sample {
    /// The value to plot for this sample.
    pub fn value(&self) -> f32 {
        match *self {
            Self::Value { value } | Self::Singular { value, .. } => value,
            Self::Outside => OUTSIDE_VALUE,
        }
    }
}

/// Result of one slice pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceOutput {
    /// The line as sampled (left endpoint first).
    pub line: QueryLine,
    pub timestep: usize,
    pub samples: Vec<Sample>,
    /// Axis division points along the line, both endpoints included.
    pub ticks: Vec<Point>,
}

impl SliceOutput {
    /// Plotted value of every sample.
    pub fn values(&self) -> Vec<f32> {
        self.samples.iter().map(Sample::value).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of samples that fell outside the grid.
    pub fn outside_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| matches!(s, Sample::Outside))
            .count()
    }

    /// Number of samples that landed in singular cells.
    pub fn singular_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| matches!(s, Sample::Singular { .. }))
            .count()
    }
}

/// A daily attribute: the slice at the current timestep and, unless that is
/// the first timestep, at the one before it.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySlice {
    pub current: SliceOutput,
    pub previous: Option<SliceOutput>,
}

impl DailySlice {
    /// Previous-timestep values, zeros at the first timestep.
    pub fn previous_values(&self) -> Vec<f32> {
        match &self.previous {
            Some(previous) => previous.values(),
            None => vec![OUTSIDE_VALUE; self.current.len()],
        }
    }

    /// Per-sample change since the previous timestep.
    pub fn difference(&self) -> Vec<f32> {
        self.current
            .values()
            .into_iter()
            .zip(self.previous_values())
            .map(|(now, before)| now - before)
            .collect()
    }
}

/// A slice of whichever attribute is selected.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeSlice {
    Accumulated(SliceOutput),
    Daily(DailySlice),
}

impl AttributeSlice {
    /// The slice at the current timestep.
    pub fn current(&self) -> &SliceOutput {
        match self {
            Self::Accumulated(output) => output,
            Self::Daily(daily) => &daily.current,
        }
    }

    /// Values as shown to the user (differences for daily attributes).
    pub fn display_values(&self) -> Vec<f32> {
        match self {
            Self::Accumulated(output) => output.values(),
            Self::Daily(daily) => daily.difference(),
        }
    }

    /// Previous-timestep values for daily attributes.
    pub fn previous_values(&self) -> Option<Vec<f32>> {
        match self {
            Self::Accumulated(_) => None,
            Self::Daily(daily) => Some(daily.previous_values()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackState {
    Searching,
    Tracking(CellIndex),
}

/// Samples scalar fields defined on one grid.
#[derive(Debug, Clone)]
pub struct SliceSampler<'a> {
    locator: Locator<'a>,
    axis_divisions: usize,
    singular_fallback: SingularFallback,
}

impl<'a> SliceSampler<'a> {
    pub fn new(grid: &'a Grid, config: &SlicerConfig) -> Self {
        Self {
            locator: Locator::new(grid, config),
            axis_divisions: config.axis_divisions,
            singular_fallback: config.singular_fallback,
        }
    }

    pub fn grid(&self) -> &'a Grid {
        self.locator.grid()
    }

    /// Sample `field` at `timestep` in `num_steps` evenly spaced steps.
    ///
    /// The line is canonicalized in place first. Step `k` samples the point
    /// at `t = k / num_steps`, so the end point itself is not sampled.
    pub fn run(
        &self,
        line: &mut QueryLine,
        field: &ScalarField,
        timestep: usize,
        num_steps: usize,
    ) -> Result<SliceOutput> {
        let grid = self.grid();
        if field.rec_size() != grid.rec_size() {
            return Err(CommonError::FieldLengthMismatch {
                field: "slice field".to_string(),
                len: field.values().len(),
                rec_size: grid.rec_size(),
            }
            .into());
        }

        line.canonicalize();
        let record = field.record(timestep)?;

        let mut state = TrackState::Searching;
        let mut samples = Vec::with_capacity(num_steps);

        for step in 0..num_steps {
            let t = step as f64 / num_steps as f64;
            let p = line.point_at(t);

            let located = match state {
                TrackState::Searching => self.locator.find_first_cell(p),
                TrackState::Tracking(cell) => self.locator.next_cell(p, cell).cell(),
            };

            let Some(cell) = located else {
                state = TrackState::Searching;
                samples.push(Sample::Outside);
                continue;
            };

            let flat = grid.flat_index(cell);
            if !grid.is_cell_origin(flat) {
                error!(
                    ?cell,
                    flat,
                    step,
                    rows = grid.rows(),
                    cols = grid.cols(),
                    "Located cell is not a valid cell origin"
                );
                return Err(SliceError::CellOutOfRange { cell, flat, step });
            }

            state = TrackState::Tracking(cell);
            samples.push(self.interpolate(cell, record, p)?);
        }

        let output = SliceOutput {
            line: *line,
            timestep,
            samples,
            ticks: line.division_points(self.axis_divisions),
        };

        debug!(
            timestep,
            steps = num_steps,
            outside = output.outside_count(),
            singular = output.singular_count(),
            "Slice pass complete"
        );
        Ok(output)
    }

    /// Sample the attribute selected in `state` from `dataset`.
    ///
    /// The dataset must be defined on this sampler's grid. Daily attributes
    /// sample the previous timestep as well.
    pub fn sample_attribute(
        &self,
        line: &mut QueryLine,
        dataset: &Dataset,
        state: &SimulationState,
        num_steps: usize,
    ) -> Result<AttributeSlice> {
        let Attribute { field, daily } = state.attribute;
        let field = dataset.field(field);
        let timestep = state.timestep;

        let current = self.run(line, field, timestep, num_steps)?;
        if !daily {
            return Ok(AttributeSlice::Accumulated(current));
        }

        let previous = match state.previous_timestep() {
            Some(previous) => Some(self.run(line, field, previous, num_steps)?),
            None => None,
        };
        Ok(AttributeSlice::Daily(DailySlice { current, previous }))
    }

    fn interpolate(&self, cell: CellIndex, record: &[f32], p: Point) -> Result<Sample> {
        let grid = self.grid();
        let corners = grid.cell_corners(cell);
        let indices = grid.corner_indices(cell);
        let values = indices.map(|i| record[i] as f64);

        match BilinearSurface::fit(&corners.to_array(), &values) {
            Ok(surface) => Ok(Sample::Value {
                value: surface.value_at(p) as f32,
            }),
            Err(SliceError::SingularSystem { conditioning }) => {
                let value = match self.singular_fallback {
                    SingularFallback::NearestCorner => record[indices[corners.nearest_corner(&p)]],
                    SingularFallback::Sentinel => OUTSIDE_VALUE,
                };
                warn!(
                    ?cell,
                    conditioning,
                    fallback = self.singular_fallback.as_str(),
                    value,
                    "Singular cell, using fallback value"
                );
                Ok(Sample::Singular { cell, value })
            }
            Err(e) => Err(e),
        }
    }
}

/// Number of samples for a line drawn between two screen positions: its
/// pixel length, truncated, capped at `max_steps`.
pub fn slice_step_count(screen_start: (f64, f64), screen_end: (f64, f64), max_steps: usize) -> usize {
    (pixel_length(screen_start, screen_end) as usize).min(max_steps)
}

/// Run one slice pass with the default configuration.
///
/// Returns the sample values (0.0 outside the grid) and the axis ticks.
pub fn run_slice_pass(
    line_start: Point,
    line_end: Point,
    grid: &Grid,
    field: &ScalarField,
    timestep: usize,
    num_steps: usize,
) -> Result<(Vec<f32>, Vec<Point>)> {
    let sampler = SliceSampler::new(grid, &SlicerConfig::default());
    let mut line = QueryLine::new(line_start, line_end);
    let output = sampler.run(&mut line, field, timestep, num_steps)?;
    Ok((output.values(), output.ticks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use weather_common::{FieldKind, TimeAxis};

    fn unit_grid(n: usize) -> Grid {
        Grid::from_fn(n, n, |r, c| Point::new(c as f64, r as f64)).unwrap()
    }

    /// Field whose value at corner (r, c) is `scale * (r + c)` at each
    /// timestep in `scales`.
    fn sum_field(n: usize, scales: &[f32]) -> ScalarField {
        let mut values = Vec::new();
        for scale in scales {
            for r in 0..n {
                for c in 0..n {
                    values.push(scale * (r + c) as f32);
                }
            }
        }
        ScalarField::new("sum", n * n, values).unwrap()
    }

    fn diamond_grid() -> Grid {
        Grid::new(2, 2, vec![0.0, 0.0, 1.0, 1.0, -1.0, 1.0, 0.0, 2.0]).unwrap()
    }

    #[test]
    fn test_diagonal_scenario() {
        let grid = unit_grid(4);
        let field = sum_field(4, &[1.0]);

        let (values, ticks) = run_slice_pass(
            Point::new(0.5, 0.5),
            Point::new(2.5, 2.5),
            &grid,
            &field,
            0,
            5,
        )
        .unwrap();

        let expected = [1.0, 1.8, 2.6, 3.4, 4.2];
        assert_eq!(values.len(), 5);
        for (got, want) in values.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-4, "{got} != {want}");
        }
        assert!(values.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(ticks.len(), 9);
        assert_eq!(ticks[0], Point::new(0.5, 0.5));
        assert_eq!(ticks[8], Point::new(2.5, 2.5));
    }

    #[test]
    fn test_line_outside_grid_is_all_sentinel() {
        let grid = unit_grid(4);
        let field = sum_field(4, &[1.0]);
        let sampler = SliceSampler::new(&grid, &SlicerConfig::default());

        let mut line = QueryLine::new(Point::new(-5.0, -5.0), Point::new(-1.0, -1.0));
        let output = sampler.run(&mut line, &field, 0, 5).unwrap();

        assert_eq!(output.values(), vec![0.0; 5]);
        assert_eq!(output.outside_count(), 5);
    }

    #[test]
    fn test_line_is_canonicalized() {
        let grid = unit_grid(4);
        let field = sum_field(4, &[1.0]);
        let sampler = SliceSampler::new(&grid, &SlicerConfig::default());

        let mut line = QueryLine::new(Point::new(2.5, 0.5), Point::new(0.5, 0.5));
        let output = sampler.run(&mut line, &field, 0, 4).unwrap();

        assert_eq!(line.start, Point::new(0.5, 0.5));
        assert_eq!(output.line, line);
        // x + y from x = 0.5 rightward
        assert!((output.values()[0] - 1.0).abs() < 1e-5);
        assert!((output.values()[2] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_line_leaving_and_reentering_grid() {
        let grid = unit_grid(4);
        let field = sum_field(4, &[1.0]);
        let sampler = SliceSampler::new(&grid, &SlicerConfig::default());

        // Starts outside on the left, crosses the grid, ends outside on the right
        let mut line = QueryLine::new(Point::new(-1.5, 1.5), Point::new(4.5, 1.5));
        let output = sampler.run(&mut line, &field, 0, 12).unwrap();
        let samples = &output.samples;

        // x = -1.5 + 0.5k
        assert_eq!(samples[0], Sample::Outside);
        assert_eq!(samples[2], Sample::Outside);
        assert!(matches!(samples[4], Sample::Value { .. }));
        assert!((samples[4].value() - 2.0).abs() < 1e-5);
        assert!(matches!(samples[9], Sample::Value { .. }));
        assert_eq!(samples[10], Sample::Outside);
        assert_eq!(samples[11], Sample::Outside);
    }

    #[test]
    fn test_timestep_out_of_range() {
        let grid = unit_grid(4);
        let field = sum_field(4, &[1.0]);
        let sampler = SliceSampler::new(&grid, &SlicerConfig::default());

        let mut line = QueryLine::new(Point::new(0.5, 0.5), Point::new(2.5, 2.5));
        let err = sampler.run(&mut line, &field, 3, 5).unwrap_err();
        assert!(matches!(
            err,
            SliceError::Common(CommonError::TimestepOutOfRange { .. })
        ));
    }

    #[test]
    fn test_field_must_match_grid() {
        let grid = unit_grid(4);
        let field = sum_field(3, &[1.0]);
        let sampler = SliceSampler::new(&grid, &SlicerConfig::default());

        let mut line = QueryLine::new(Point::new(0.5, 0.5), Point::new(2.5, 2.5));
        assert!(sampler.run(&mut line, &field, 0, 5).is_err());
    }

    #[test]
    fn test_singular_cell_nearest_corner() {
        let grid = diamond_grid();
        let field = ScalarField::new("test", 4, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let sampler = SliceSampler::new(&grid, &SlicerConfig::default());

        let mut line = QueryLine::new(Point::new(0.1, 0.5), Point::new(0.2, 0.5));
        let output = sampler.run(&mut line, &field, 0, 1).unwrap();

        assert_eq!(
            output.samples[0],
            Sample::Singular {
                cell: CellIndex::new(0, 0),
                value: 1.0
            }
        );
        assert_eq!(output.singular_count(), 1);
    }

    #[test]
    fn test_singular_cell_sentinel() {
        let grid = diamond_grid();
        let field = ScalarField::new("test", 4, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let config = SlicerConfig {
            singular_fallback: SingularFallback::Sentinel,
            ..SlicerConfig::default()
        };
        let sampler = SliceSampler::new(&grid, &config);

        let mut line = QueryLine::new(Point::new(0.1, 0.5), Point::new(0.2, 0.5));
        let output = sampler.run(&mut line, &field, 0, 1).unwrap();

        assert!(matches!(output.samples[0], Sample::Singular { .. }));
        assert_eq!(output.values(), vec![0.0]);
        assert_eq!(output.outside_count(), 0);
    }

    #[test]
    fn test_zero_steps() {
        let grid = unit_grid(4);
        let field = sum_field(4, &[1.0]);
        let (values, ticks) = run_slice_pass(
            Point::new(0.5, 0.5),
            Point::new(2.5, 2.5),
            &grid,
            &field,
            0,
            0,
        )
        .unwrap();
        assert!(values.is_empty());
        assert_eq!(ticks.len(), 9);
    }

    #[test]
    fn test_slice_step_count() {
        assert_eq!(slice_step_count((0.0, 0.0), (300.0, 400.0), 1000), 500);
        assert_eq!(slice_step_count((0.0, 0.0), (10.7, 0.0), 1000), 10);
        assert_eq!(slice_step_count((0.0, 0.0), (1200.0, 900.0), 1000), 1000);
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    fn two_step_dataset() -> Dataset {
        let grid = unit_grid(4);
        let fields = [
            sum_field(4, &[1.0, 2.0]),
            sum_field(4, &[0.0, 0.0]),
            sum_field(4, &[0.0, 0.0]),
            sum_field(4, &[0.0, 0.0]),
        ];
        let start = Utc.with_ymd_and_hms(2010, 10, 1, 0, 0, 0).unwrap();
        Dataset::new(grid, fields, TimeAxis::new(start, 3)).unwrap()
    }

    #[test]
    fn test_daily_attribute_difference() {
        let dataset = two_step_dataset();
        let sampler = SliceSampler::new(dataset.grid(), &SlicerConfig::default());
        let mut state = SimulationState::new(Attribute::daily(FieldKind::Snowpack), [0.0, 0.0, 10.0]);
        state.timestep = 1;

        let mut line = QueryLine::new(Point::new(0.5, 0.5), Point::new(2.5, 2.5));
        let slice = sampler.sample_attribute(&mut line, &dataset, &state, 5).unwrap();

        // Timestep 1 doubles timestep 0, so the change equals timestep 0
        let expected = [1.0, 1.8, 2.6, 3.4, 4.2];
        for (got, want) in slice.display_values().iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-4);
        }
        assert!((slice.current().values()[0] - 2.0).abs() < 1e-4);
        assert!(slice.previous_values().is_some());
    }

    #[test]
    fn test_daily_attribute_first_timestep() {
        let dataset = two_step_dataset();
        let sampler = SliceSampler::new(dataset.grid(), &SlicerConfig::default());
        let state = SimulationState::new(Attribute::daily(FieldKind::Snowpack), [0.0, 0.0, 10.0]);

        let mut line = QueryLine::new(Point::new(0.5, 0.5), Point::new(2.5, 2.5));
        let slice = sampler.sample_attribute(&mut line, &dataset, &state, 5).unwrap();

        let AttributeSlice::Daily(daily) = &slice else {
            panic!("expected a daily slice");
        };
        assert!(daily.previous.is_none());
        assert_eq!(daily.previous_values(), vec![0.0; 5]);
        assert_eq!(slice.display_values(), daily.current.values());
    }

    #[test]
    fn test_accumulated_attribute() {
        let dataset = two_step_dataset();
        let sampler = SliceSampler::new(dataset.grid(), &SlicerConfig::default());
        let state = SimulationState::new(Attribute::accumulated(FieldKind::Runoff), [0.0, 0.0, 10.0]);

        let mut line = QueryLine::new(Point::new(0.5, 0.5), Point::new(2.5, 2.5));
        let slice = sampler.sample_attribute(&mut line, &dataset, &state, 5).unwrap();

        assert!(matches!(slice, AttributeSlice::Accumulated(_)));
        assert_eq!(slice.display_values(), vec![0.0; 5]);
        assert!(slice.previous_values().is_none());
    }

    #[test]
    fn test_sample_json_shape() {
        let value = serde_json::to_value(Sample::Value { value: 1.5 }).unwrap();
        assert_eq!(value, serde_json::json!({"status": "value", "value": 1.5}));

        let outside = serde_json::to_value(Sample::Outside).unwrap();
        assert_eq!(outside, serde_json::json!({"status": "outside"}));

        let singular = serde_json::to_value(Sample::Singular {
            cell: CellIndex::new(2, 3),
            value: 0.0,
        })
        .unwrap();
        assert_eq!(singular["status"], "singular");
        assert_eq!(singular["cell"]["row"], 2);
        assert_eq!(singular["cell"]["col"], 3);
    }
}
