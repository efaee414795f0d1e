//! Weather slice sampler
//!
//! Samples one attribute of a weather dataset along a line and prints the
//! slice report as JSON on stdout. Logs go to stderr.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use slice_cli::Args;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    let report = slice_cli::run(&args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
