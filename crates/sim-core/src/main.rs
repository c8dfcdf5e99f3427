//! Alien Invasion Simulator
//!
//! Reads a map of cities, drops aliens on it, and lets them fight until the
//! world or the aliens are used up.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use sim_core::{sim_rng, start_simulation, Config, FsLoader, SimulationParams};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "aliensim")]
#[command(about = "aliensim - a simple CLI to simulate alien invasions")]
struct Args {
    /// Map file, one `city direction=city ...` row per line
    map: PathBuf,

    /// Number of aliens to spawn
    aliens: usize,

    /// Print map stats on every round
    #[arg(long)]
    verbose: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Moves each alien may make before stopping
    #[arg(long)]
    max_moves: Option<u32>,

    /// TOML configuration file
    #[arg(long, default_value = sim_core::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Write a JSON report of the final state here
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::load_or_default(&args.config).simulation;
    if args.verbose {
        config.verbose = true;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(max_moves) = args.max_moves {
        config.max_moves = max_moves;
    }

    let rng = sim_rng(config.seed);
    let params = SimulationParams {
        map_path: args.map,
        num_aliens: args.aliens,
        config,
    };

    let report = match start_simulation(&params, &FsLoader, rng) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Simulation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = args.report {
        if let Err(e) = report.write_to(&path) {
            tracing::error!("Could not write report to {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        tracing::info!("Wrote report to {}", path.display());
    }
    ExitCode::SUCCESS
}
