//! Command-line entry point: configure and run the simulator.

use apxr_sim::SimConfig;
use apxr_sim::driver::SimulationDriver;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// An agent-based market microstructure simulator.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of independent runs.
    #[arg(long)]
    runs: Option<u32>,

    /// Timesteps per run.
    #[arg(long)]
    timesteps: Option<u64>,

    /// Master RNG seed for the first run.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory to write per-run CSV output into.
    #[arg(long)]
    output_dir: Option<String>,

    /// Starting cash for every agent.
    #[arg(long)]
    initial_cash: Option<f64>,

    /// Print the resolved configuration as JSON and exit without running.
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = SimConfig::default();
    if let Some(runs) = cli.runs {
        config.runs = runs;
    }
    if let Some(timesteps) = cli.timesteps {
        config.timesteps = timesteps;
    }
    if let Some(seed) = cli.seed {
        config.master_seed = seed;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(initial_cash) = cli.initial_cash {
        config.initial_cash = initial_cash;
    }

    if cli.print_config {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => {
                println!("{json}");
                return ExitCode::SUCCESS;
            }
            Err(err) => {
                tracing::error!(%err, "failed to serialize configuration");
                return ExitCode::FAILURE;
            }
        }
    }

    let driver = SimulationDriver::new(config);
    match driver.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "simulation run failed");
            ExitCode::FAILURE
        }
    }
}
