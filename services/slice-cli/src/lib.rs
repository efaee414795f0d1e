//! Command-line slice sampling of weather datasets.
//!
//! Loads a dataset, samples one attribute along a line given either in
//! world coordinates or in window pixels, and builds a [`SliceReport`] with
//! the sampled values and the chart layout.

pub mod cli;
pub mod config;
pub mod report;

use anyhow::{bail, Context, Result};
use grid_slicer::{slice_step_count, ChartLayout, SliceSampler};
use tracing::{info, warn};
use weather_common::{Dataset, QueryLine, SimulationState, Viewport};

pub use cli::Args;
pub use config::load_config;
pub use report::SliceReport;

/// Camera height used when no eye position is given.
const DEFAULT_EYE_HEIGHT: f64 = 10.0;

/// Run one slice as described by `args`.
pub fn run(args: &Args) -> Result<SliceReport> {
    let config = load_config(args.config.as_deref())?;

    let dataset = Dataset::from_path(&args.dataset)
        .with_context(|| format!("failed to load dataset {}", args.dataset.display()))?;

    if args.timestep >= dataset.timesteps() {
        bail!(
            "timestep {} out of range (dataset has {})",
            args.timestep,
            dataset.timesteps()
        );
    }

    let center = dataset.grid().bounds().center();
    let mut state = SimulationState::new(
        args.attribute,
        args.eye.unwrap_or([center.x, center.y, DEFAULT_EYE_HEIGHT]),
    );
    state.timestep = args.timestep;

    let (mut line, pixel_steps) = resolve_line(args, &state)?;

    let steps = match (args.steps, args.pixels) {
        (Some(steps), _) => steps,
        (None, Some(pixels)) => slice_step_count((0.0, 0.0), (pixels, 0.0), config.max_steps),
        (None, None) => pixel_steps.unwrap_or(config.max_steps),
    };
    if steps > config.max_steps {
        warn!(
            requested = steps,
            max_steps = config.max_steps,
            "Step count capped"
        );
    }
    let steps = steps.min(config.max_steps);

    let sampler = SliceSampler::new(dataset.grid(), &config);
    let slice = sampler.sample_attribute(&mut line, &dataset, &state, steps)?;

    let mut report = SliceReport::new(&dataset, &state, &slice, &ChartLayout::default());
    if args.outline {
        report = report.with_outline(&dataset);
    }

    info!(
        attribute = %report.attribute,
        timestep = report.timestep,
        steps = report.steps,
        outside = report.outside,
        singular = report.singular,
        "Slice complete"
    );
    Ok(report)
}

/// The world-space line, and for screen input the step count implied by
/// its pixel length.
fn resolve_line(args: &Args, state: &SimulationState) -> Result<(QueryLine, Option<usize>)> {
    if let (Some(start), Some(end)) = (args.start, args.end) {
        return Ok((QueryLine::new(start, end), None));
    }

    if let (Some(screen_start), Some(screen_end)) = (args.screen_start, args.screen_end) {
        let viewport = Viewport::default();
        let start = viewport.screen_to_world(screen_start.x, screen_start.y, state.eye, 0.0);
        let end = viewport.screen_to_world(screen_end.x, screen_end.y, state.eye, 0.0);
        let steps = slice_step_count(
            (screen_start.x, screen_start.y),
            (screen_end.x, screen_end.y),
            usize::MAX,
        );
        return Ok((QueryLine::new(start, end), Some(steps)));
    }

    bail!("a line is required: pass --start/--end or --screen-start/--screen-end")
}
