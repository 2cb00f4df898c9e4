//! grouping CLI: group measurements around running means.
//!
//! Usage:
//!   grouping group [PATH] [OPTIONS]   Group numbers or delimited records
//!   grouping config [--init]          Show or initialize configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use grouping_common::config::AppConfig;
use grouping_common::timing::{Stopwatch, TimingReport};

mod commands;
mod input;

#[derive(Parser)]
#[command(
    name = "grouping",
    about = "Online greedy grouping of measurements by running mean",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging and print a timing report
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group values read from a file or stdin
    Group {
        /// Input file; stdin when omitted or "-"
        path: Option<PathBuf>,

        /// Maximum distance from a cluster's running mean (config default: 20)
        #[arg(short, long, allow_hyphen_values = true)]
        tolerance: Option<f64>,

        /// Treat each line as a record and group by this zero-based field
        #[arg(short, long)]
        field: Option<usize>,

        /// Record field delimiter (config default: ',')
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Print clusters as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(grouping_common::config::config_file_path);
    let config = AppConfig::load_from(&config_path);

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    grouping_common::logging::init_logging(&logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let mut timings = TimingReport::new();
    let mut total = Stopwatch::start();

    let result = match cli.command {
        Commands::Group {
            path,
            tolerance,
            field,
            delimiter,
            json,
        } => commands::group::run(
            commands::group::GroupArgs {
                path,
                tolerance: tolerance.unwrap_or(config.grouping.tolerance),
                field,
                delimiter: delimiter.unwrap_or(config.grouping.delimiter),
                json,
            },
            &mut timings,
        ),
        Commands::Config { init, force } => {
            commands::config::run(&config, config_path, init, force)
        }
    };

    timings.record("total", total.stop().as_secs_f64());
    if cli.verbose {
        timings.report();
    }

    result
}
