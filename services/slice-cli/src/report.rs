//! JSON report of one slice.

use chrono::{DateTime, Utc};
use grid_slicer::{AttributeSlice, AxisLabel, ChartLayout};
use serde::Serialize;
use weather_common::{Dataset, Point, QueryLine, SimulationState};

/// Everything the slice chart shows, plus the data behind it.
#[derive(Debug, Clone, Serialize)]
pub struct SliceReport {
    pub attribute: String,
    pub timestep: usize,
    pub time: DateTime<Utc>,
    pub day: usize,
    pub line: QueryLine,
    pub steps: usize,
    /// Values as displayed (changes since the previous timestep for daily
    /// attributes).
    pub values: Vec<f32>,
    /// Previous-timestep samples, for daily attributes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<Vec<f32>>,
    pub outside: usize,
    pub singular: usize,
    pub range: ValueRange,
    pub ticks: Vec<Point>,
    pub chart: ChartReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_outline: Option<Vec<Point>>,
}

/// Dataset-wide range of the attribute.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartReport {
    pub width: f32,
    pub height: f32,
    pub polyline: Vec<[f32; 2]>,
    pub x_labels: Vec<AxisLabel>,
    pub y_labels: Vec<AxisLabel>,
}

impl SliceReport {
    pub fn new(
        dataset: &Dataset,
        state: &SimulationState,
        slice: &AttributeSlice,
        chart: &ChartLayout,
    ) -> Self {
        let attribute = state.attribute;
        let ranges = dataset.ranges();
        let current = slice.current();
        let previous = slice.previous_values();

        let chart = ChartReport {
            width: chart.width,
            height: chart.height,
            polyline: chart.polyline(&current.values(), previous.as_deref(), ranges.max(attribute)),
            x_labels: chart.x_labels(&current.ticks),
            y_labels: chart.y_labels(ranges.span(attribute)),
        };

        Self {
            attribute: attribute.to_string(),
            timestep: state.timestep,
            time: dataset.time().time_of(state.timestep),
            day: dataset.time().day_of(state.timestep),
            line: current.line,
            steps: current.len(),
            values: slice.display_values(),
            previous,
            outside: current.outside_count(),
            singular: current.singular_count(),
            range: ValueRange {
                min: ranges.min(attribute),
                max: ranges.max(attribute),
            },
            ticks: current.ticks.clone(),
            chart,
            grid_outline: None,
        }
    }

    /// Attach the boundary ring of the dataset's grid.
    pub fn with_outline(mut self, dataset: &Dataset) -> Self {
        self.grid_outline = Some(dataset.grid().outline());
        self
    }
}
