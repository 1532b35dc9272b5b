//! restitch: reassemble fragmented line geometries from the command line.
//!
//! Reads a GeoJSON FeatureCollection of unordered line fragments, stitches
//! them into one travel-order chain by greedy nearest-endpoint matching,
//! and writes the result to a new GeoJSON file -- either as a single
//! combined LineString or as ordered, reoriented fragment records.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, error, info, warn};

use restitch_core::{DistanceMetric, OutputMode, StitchConfig, stitch};
use restitch_io::{read_lines, write_lines};

/// Reassemble fragmented line geometries into an ordered chain.
#[derive(Parser)]
#[command(name = "restitch", version)]
struct Cli {
    /// Source GeoJSON file containing the unordered line fragments.
    source: PathBuf,

    /// Destination GeoJSON file for the assembled result.
    destination: PathBuf,

    /// Max distance between fragment endpoints to be considered
    /// connected. Coordinate units by default, meters with --meters.
    #[arg(short, long, default_value_t = StitchConfig::DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Overwrite the destination file if it already exists.
    #[arg(short = 'O', long)]
    overwrite: bool,

    /// Combine the ordered fragments into a single line feature instead
    /// of writing them as separate ordered records.
    #[arg(short, long)]
    combine: bool,

    /// Use great-circle distance, treating coordinates as
    /// (longitude, latitude) degrees; tolerance is then in meters.
    #[arg(short, long)]
    meters: bool,

    /// Turn on debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    debug: bool,

    /// Turn off all logging except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.source.exists() {
        return Err(format!("source file {} does not exist", cli.source.display()).into());
    }

    if cli.destination.exists() {
        if cli.overwrite {
            info!("removing existing destination {}", cli.destination.display());
            std::fs::remove_file(&cli.destination)?;
        } else {
            return Err(format!(
                "destination {} already exists, will not overwrite",
                cli.destination.display()
            )
            .into());
        }
    }

    let source = read_lines(&cli.source)?;
    info!(
        fragments = source.polylines.len(),
        "loaded source collection"
    );

    let config = StitchConfig {
        tolerance: cli.tolerance,
        metric: if cli.meters {
            DistanceMetric::GreatCircle
        } else {
            DistanceMetric::Planar
        },
        mode: if cli.combine {
            OutputMode::Combine
        } else {
            OutputMode::Sequence
        },
    };
    let result = stitch(source.polylines, &config)?;

    if let Some(stall) = result.stall {
        warn!(
            unmatched = stall.remaining,
            tail_distance = stall.tail_distance,
            head_distance = stall.head_distance,
            "writing a partial result"
        );
    }

    info!("writing output to {}", cli.destination.display());
    write_lines(&cli.destination, &result.polylines, source.crs.as_ref())?;

    Ok(())
}
