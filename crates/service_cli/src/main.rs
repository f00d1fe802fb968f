//! Lattice CLI - Command Line Harness for the Binomial Pricer
//!
//! # Commands
//!
//! - `lattice price` - Price the configured contract
//! - `lattice ladder --steps-list 100,1000,10000` - Convergence and latency table
//! - `lattice sweep --strikes 225,235,245 [--parallel]` - Strike sweep
//! - `lattice check` - Validate configuration against the closed form
//!
//! Every pricing command accepts contract overrides such as
//! `--type call --exercise european --strike 240 --dividend 0.25@0.25`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use service_cli::commands::{self, OutputFormat};
use service_cli::config::{build_config, CliArgs, ContractArgs, LogLevel, DEFAULT_CONFIG_FILE};
use service_cli::Result;

/// Binomial lattice option pricer
#[derive(Parser)]
#[command(name = "lattice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (missing file means built-in defaults)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides LATTICE_LOG_LEVEL and the file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (same as --log-level info)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one contract
    Price {
        #[command(flatten)]
        contract: ContractArgs,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Price at increasing step counts and report latency
    Ladder {
        #[command(flatten)]
        contract: ContractArgs,

        /// Comma-separated step counts (defaults to the configured ladder)
        #[arg(long = "steps-list", value_delimiter = ',')]
        steps_list: Vec<usize>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Price across a list of strikes
    Sweep {
        #[command(flatten)]
        contract: ContractArgs,

        /// Comma-separated strikes (defaults to the configured strikes)
        #[arg(long, value_delimiter = ',')]
        strikes: Vec<f64>,

        /// Price strikes on the Rayon thread pool
        #[arg(long)]
        parallel: bool,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check configuration and compare the lattice against the closed form
    Check {
        #[command(flatten)]
        contract: ContractArgs,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

impl Commands {
    fn contract(&self) -> &ContractArgs {
        match self {
            Commands::Price { contract, .. }
            | Commands::Ladder { contract, .. }
            | Commands::Sweep { contract, .. }
            | Commands::Check { contract, .. } => contract,
        }
    }

    fn format(&self) -> &str {
        match self {
            Commands::Price { format, .. }
            | Commands::Ladder { format, .. }
            | Commands::Sweep { format, .. }
            | Commands::Check { format, .. } => format,
        }
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(log_level.env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match (&cli.log_level, cli.verbose) {
        (Some(level), _) => Some(level.clone()),
        (None, true) => Some("info".to_string()),
        (None, false) => None,
    };
    let args = CliArgs {
        config_file: cli.config.clone(),
        log_level,
        contract: cli.command.contract().clone(),
    };
    let (config, source) = build_config(&args)?;
    let format: OutputFormat = cli.command.format().parse()?;

    init_tracing(config.log_level);
    info!(
        source = %source,
        log_level = %config.log_level,
        format = %format,
        "Lattice CLI v{}",
        env!("CARGO_PKG_VERSION")
    );

    match &cli.command {
        Commands::Price { .. } => commands::price::run(&config, format),
        Commands::Ladder { steps_list, .. } => {
            let steps = if steps_list.is_empty() {
                &config.ladder_steps
            } else {
                steps_list
            };
            commands::ladder::run(&config, steps, format)
        }
        Commands::Sweep {
            strikes, parallel, ..
        } => {
            let strikes = if strikes.is_empty() {
                &config.strikes
            } else {
                strikes
            };
            commands::sweep::run(&config, strikes, *parallel, format)
        }
        Commands::Check { .. } => commands::check::run(&config, &source, format),
    }
}
