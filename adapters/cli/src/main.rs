#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that prints the level layout of a Strata world.

mod config;
mod report;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use strata_core::{WorldConstants, WorldSeed};
use strata_system_camps::CampPlanner;
use strata_system_ordinals::OrdinalMapper;
use tracing::info;
use tracing_subscriber::EnvFilter;

use report::SeedReport;

#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(about = "Print the level and camp layout generated for a world seed")]
struct Args {
    /// World seed (uses a random seed if not specified)
    #[arg(short, long, allow_hyphen_values = true)]
    seed: Option<i64>,

    /// TOML file overriding the default world constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Aligned plain-text table.
    Table,
    /// Pretty-printed JSON document.
    Json,
}

/// Entry point for the Strata command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let constants = match &args.config {
        Some(path) => config::load_constants(path)?,
        None => WorldConstants::default(),
    };
    let seed = WorldSeed::new(args.seed.unwrap_or_else(rand::random));
    info!(seed = seed.get(), format = ?args.format, "building world report");

    let planner = CampPlanner::new(Arc::new(OrdinalMapper::new(constants)));
    let report = SeedReport::build(&planner, seed);
    match args.format {
        OutputFormat::Table => print!("{report}"),
        OutputFormat::Json => {
            let json = report
                .to_json()
                .context("failed to encode the report as json")?;
            println!("{json}");
        }
    }
    Ok(())
}
