//! End-to-end tests: parse arguments, load a dataset from disk, slice it.

use clap::Parser;
use slice_cli::{run, Args};
use test_utils::{assert_approx_eq, assert_point_approx_eq, write_temp_dataset, write_temp_file};
use weather_common::Point;

fn args(dataset: &std::path::Path, extra: &[&str]) -> Args {
    let mut argv = vec!["slice-cli", "--dataset", dataset.to_str().unwrap()];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

// ============================================================================
// World-space lines
// ============================================================================

#[test]
fn test_world_line_values() {
    let file = write_temp_dataset(4, 4, 2);
    let report = run(&args(
        file.path(),
        &["--start", "0.5,0.5", "--end", "2.5,2.5", "--steps", "5"],
    ))
    .unwrap();

    assert_eq!(report.attribute, "snowpack");
    assert_eq!(report.steps, 5);
    for (got, want) in report.values.iter().zip([1.0, 1.8, 2.6, 3.4, 4.2]) {
        assert_approx_eq!(*got, want, 1e-4);
    }
    assert!(report.previous.is_none());
    assert_eq!(report.outside, 0);
    assert_eq!(report.ticks.len(), 9);
    assert_eq!(report.chart.polyline.len(), 5);
    assert!(report.grid_outline.is_none());
}

#[test]
fn test_daily_attribute_shows_change() {
    let file = write_temp_dataset(4, 4, 2);
    let report = run(&args(
        file.path(),
        &[
            "--start", "0.5,0.5", "--end", "2.5,2.5", "--steps", "5",
            "--attribute", "snowpack-daily", "--timestep", "1",
        ],
    ))
    .unwrap();

    // Timestep 1 holds 2(x + y), timestep 0 holds x + y
    let previous = report.previous.clone().unwrap();
    for ((shown, prev), want) in report.values.iter().zip(&previous).zip([1.0, 1.8, 2.6, 3.4, 4.2]) {
        assert_approx_eq!(*shown, want, 1e-4);
        assert_approx_eq!(*prev, want, 1e-4);
    }
    assert_eq!(report.time.to_rfc3339(), "2010-10-01T03:00:00+00:00");
    assert_eq!(report.day, 0);
}

#[test]
fn test_outside_line_is_all_zero() {
    let file = write_temp_dataset(4, 4, 1);
    let report = run(&args(
        file.path(),
        &["--start", "-5,-5", "--end", "-1,-1", "--steps", "37"],
    ))
    .unwrap();

    assert_eq!(report.values, vec![0.0; 37]);
    assert_eq!(report.outside, 37);
}

#[test]
fn test_outline_included_on_request() {
    let file = write_temp_dataset(4, 4, 1);
    let report = run(&args(
        file.path(),
        &["--start", "0.5,0.5", "--end", "2.5,2.5", "--steps", "5", "--outline"],
    ))
    .unwrap();

    assert_eq!(report.grid_outline.map(|ring| ring.len()), Some(12));
}

// ============================================================================
// Step counts
// ============================================================================

#[test]
fn test_pixel_length_sets_steps() {
    let file = write_temp_dataset(4, 4, 1);

    let long = run(&args(
        file.path(),
        &["--start", "0.5,0.5", "--end", "2.5,2.5", "--pixels", "2500"],
    ))
    .unwrap();
    assert_eq!(long.steps, 1000);

    let short = run(&args(
        file.path(),
        &["--start", "0.5,0.5", "--end", "2.5,2.5", "--pixels", "37.9"],
    ))
    .unwrap();
    assert_eq!(short.steps, 37);
}

#[test]
fn test_config_file_caps_steps() {
    let file = write_temp_dataset(4, 4, 1);
    let config = write_temp_file("max_steps: 20\nsingular_fallback: sentinel\n");
    let report = run(&args(
        file.path(),
        &[
            "--start", "0.5,0.5", "--end", "2.5,2.5", "--steps", "50",
            "--config", config.path().to_str().unwrap(),
        ],
    ))
    .unwrap();

    assert_eq!(report.steps, 20);
}

#[test]
fn test_screen_line() {
    let file = write_temp_dataset(4, 4, 1);
    let report = run(&args(
        file.path(),
        &[
            "--screen-start", "640,360", "--screen-end", "740,360",
            "--eye", "1.5,1.5,10",
        ],
    ))
    .unwrap();

    // Window center maps to the point under the eye
    assert_eq!(report.steps, 100);
    assert_point_approx_eq!(report.line.start, Point::new(1.5, 1.5), 1e-9);
    assert!(report.line.end.x > 1.5);
    assert_eq!(report.line.end.y, report.line.start.y);
    assert_eq!(report.outside, 0);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_line() {
    let file = write_temp_dataset(4, 4, 1);
    assert!(run(&args(file.path(), &[])).is_err());
}

#[test]
fn test_timestep_out_of_range() {
    let file = write_temp_dataset(4, 4, 2);
    let err = run(&args(
        file.path(),
        &["--start", "0.5,0.5", "--end", "2.5,2.5", "--timestep", "5"],
    ))
    .unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn test_missing_dataset_file() {
    let result = run(&args(
        std::path::Path::new("/nonexistent/dataset.json"),
        &["--start", "0,0", "--end", "1,1"],
    ));
    assert!(result.is_err());
}

#[test]
fn test_point_arguments_parse() {
    let file = write_temp_dataset(3, 3, 1);
    let parsed = args(file.path(), &["--start", "0.25,1", "--end", "1.75,0.5"]);
    assert_eq!(parsed.start, Some(Point::new(0.25, 1.0)));
    assert_eq!(parsed.end, Some(Point::new(1.75, 0.5)));
}
