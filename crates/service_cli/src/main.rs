//! hpmc-moves CLI - Operator Tooling for the HPMC Trial Move Kernel
//!
//! # Commands
//!
//! - `hpmc-moves check` - Run statistical self-checks of the generators
//! - `hpmc-moves order --sweep <t>` - Print the update order for a sweep
//! - `hpmc-moves sample --sweep <t> --particle <i>` - Print one trial move
//! - `hpmc-moves plan --sweep <t>` - Summarise a whole-sweep proposal plan
//!
//! # Configuration
//!
//! Settings are layered (highest priority first): command-line flags,
//! `HPMC_SEED` / `HPMC_DIMENSION`, the TOML file given by `--config`,
//! built-in defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hpmc_core::types::Dimension;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

/// HPMC trial move kernel CLI
#[derive(Parser)]
#[command(name = "hpmc-moves")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "hpmc.toml")]
    config: PathBuf,

    /// Override the simulation seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Override the dimensionality (2 or 3)
    #[arg(short, long, global = true)]
    dimension: Option<Dimension>,

    /// Override the particle count
    #[arg(short = 'n', long, global = true)]
    particles: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run statistical self-checks of index selection, moves and ordering
    Check {
        /// Samples per statistical check
        #[arg(short, long, default_value = "100000")]
        samples: usize,
    },

    /// Print the particle update order for a sweep
    Order {
        /// Sweep index
        #[arg(short, long, default_value = "0")]
        sweep: u64,
    },

    /// Print the trial move proposed for one particle
    Sample {
        /// Sweep index
        #[arg(short, long, default_value = "0")]
        sweep: u64,

        /// Particle index
        #[arg(short, long, default_value = "0")]
        particle: usize,
    },

    /// Plan a whole sweep and summarise the proposals
    Plan {
        /// Sweep index
        #[arg(short, long, default_value = "0")]
        sweep: u64,

        /// Evaluate proposals on a single thread
        #[arg(long)]
        sequential: bool,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { cli.log_level.as_str() };
    init_tracing(log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let overrides = config::Overrides {
        seed: cli.seed,
        dimension: cli.dimension,
        particles: cli.particles,
    };
    let move_config = config::resolve(&cli.config, &overrides)?;
    info!(
        seed = move_config.seed(),
        dimension = %move_config.dimension(),
        particles = move_config.n_particles(),
        "Configuration resolved"
    );

    match cli.command {
        Commands::Check { samples } => commands::check::run(&move_config, samples),
        Commands::Order { sweep } => commands::order::run(&move_config, sweep),
        Commands::Sample { sweep, particle } => {
            commands::sample::run(&move_config, sweep, particle)
        }
        Commands::Plan { sweep, sequential } => {
            commands::plan::run(&move_config, sweep, sequential)
        }
    }
}
