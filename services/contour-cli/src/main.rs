//! Contour CLI
//!
//! Reads a gridded scalar field from JSON and writes contour paths, edge
//! paths and fill boundaries for each requested level.

use anyhow::{Context, Result};
use clap::Parser;
use contour_cli::{run, write_output, Args};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    // Logs go to stderr so stdout stays clean for the JSON result
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);
    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    info!(input = %args.input.display(), "Starting contour-cli");

    let set = run(&args, |key| std::env::var(key).ok())?;
    write_output(&set, args.output.as_ref(), args.pretty).context("Failed to write contours")?;

    Ok(())
}
