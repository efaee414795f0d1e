//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;
use weather_common::{Attribute, Point};

/// Weather slice sampler
#[derive(Parser, Debug, Clone)]
#[command(name = "slice-cli")]
#[command(about = "Sample a weather attribute along a line and print the slice as JSON")]
pub struct Args {
    /// Dataset JSON file
    #[arg(short, long, env = "SLICE_DATASET")]
    pub dataset: PathBuf,

    /// Line start in world coordinates ("x,y")
    #[arg(long, allow_hyphen_values = true, requires = "end")]
    pub start: Option<Point>,

    /// Line end in world coordinates ("x,y")
    #[arg(long, allow_hyphen_values = true, requires = "start")]
    pub end: Option<Point>,

    /// Line start in window pixels ("x,y", origin top-left)
    #[arg(long, requires = "screen_end", conflicts_with_all = ["start", "end"])]
    pub screen_start: Option<Point>,

    /// Line end in window pixels ("x,y", origin top-left)
    #[arg(long, requires = "screen_start")]
    pub screen_end: Option<Point>,

    /// Camera position "x,y,z" used for screen coordinates (default: above
    /// the grid center)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_eye)]
    pub eye: Option<[f64; 3]>,

    /// Attribute to sample (snowpack, snowfall, precipitation, runoff, or
    /// any of them with a "-daily" suffix)
    #[arg(short, long, default_value = "snowpack")]
    pub attribute: Attribute,

    /// Timestep to sample
    #[arg(short, long, default_value_t = 0)]
    pub timestep: usize,

    /// Number of samples along the line
    #[arg(long, conflicts_with = "pixels")]
    pub steps: Option<usize>,

    /// On-screen length of the line in pixels; one sample per pixel
    #[arg(long)]
    pub pixels: Option<f64>,

    /// Slicer configuration file (YAML). SLICE_* environment variables are
    /// used when not given
    #[arg(short, long, env = "SLICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Include the grid boundary ring in the report
    #[arg(long)]
    pub outline: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

fn parse_eye(s: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected \"x,y,z\", got {s:?}"));
    }

    let mut eye = [0.0; 3];
    for (slot, part) in eye.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("invalid number {part:?} in {s:?}"))?;
    }
    Ok(eye)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eye() {
        assert_eq!(parse_eye("-118.5, 37, 12").unwrap(), [-118.5, 37.0, 12.0]);
        assert!(parse_eye("1,2").is_err());
        assert!(parse_eye("1,b,3").is_err());
    }

    #[test]
    fn test_negative_coordinates() {
        let args = Args::try_parse_from([
            "slice-cli",
            "--dataset",
            "data.json",
            "--start",
            "-5,-5",
            "--end",
            "-1,-1",
        ])
        .unwrap();
        assert_eq!(args.start, Some(Point::new(-5.0, -5.0)));
        assert_eq!(args.attribute, Attribute::default());
    }

    #[test]
    fn test_steps_conflict_with_pixels() {
        let result = Args::try_parse_from([
            "slice-cli",
            "--dataset",
            "data.json",
            "--start",
            "0,0",
            "--end",
            "1,1",
            "--steps",
            "10",
            "--pixels",
            "20",
        ]);
        assert!(result.is_err());
    }
}
