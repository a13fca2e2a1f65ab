use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface options.
#[derive(Debug, Parser)]
#[command(name = "tourforge", version)]
#[command(about = "Heuristic tours for symmetric distance matrices", long_about = None)]
pub struct Cli {
    /// Engine configuration file (TOML, or YAML by extension).
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log detail (-v debug, -vv trace).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a store of random graphs.
    Generate {
        /// Output store file.
        #[arg(short = 'o', long)]
        out: PathBuf,

        /// Graph sizes; defaults to `generator.sizes`.
        #[arg(short = 's', long, value_delimiter = ',')]
        sizes: Vec<usize>,

        /// Graphs per size; defaults to `generator.graphs_per_size`.
        #[arg(short = 'n', long)]
        per_size: Option<usize>,

        /// Random seed; defaults to `random_seed`.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Solve one matrix file.
    Solve {
        /// JSON matrix file, diagonal as `null`.
        matrix: PathBuf,

        /// Algorithm label such as `multiFrag+2Opt`; defaults to the config.
        #[arg(short = 'a', long)]
        algorithm: Option<String>,
    },

    /// Record every configured attempt on a store, in place.
    Run {
        /// Store file to update.
        store: PathBuf,
    },

    /// Enumerate every tour of a small matrix file.
    BruteForce {
        /// JSON matrix file, diagonal as `null`.
        matrix: PathBuf,

        /// Print every enumerated weight.
        #[arg(long, default_value_t = false, action = ArgAction::SetTrue)]
        all: bool,
    },

    /// Measure improvement percentages over random instances of growing size.
    Experiment {
        /// Algorithm label; defaults to the config.
        #[arg(short = 'a', long)]
        algorithm: Option<String>,

        #[arg(long)]
        low: Option<usize>,

        #[arg(long)]
        high: Option<usize>,

        #[arg(short = 'i', long)]
        iterations: Option<usize>,

        /// CSV output file; stdout otherwise.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Per-size improvement summary of a batch-filled store.
    Summary {
        /// Store file.
        store: PathBuf,

        /// Construction code, e.g. `multiFrag`.
        #[arg(long, default_value = "multiFrag")]
        construction: String,

        /// CSV output file; stdout otherwise.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
}
