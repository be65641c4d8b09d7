use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use seqlab::commands::growth::{DEFAULT_COUNT, MAX_COUNT};
use seqlab::seq::AppendMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seqlab", bin_name = "seqlab", version)]
#[command(
    about = "Workbench for growable sequences: append, slice and alias",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding config.json
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run workbench scripts
    Run {
        /// Script files, each run with fresh bindings
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Override the configured append mode
        #[arg(long, value_name = "bulk|incremental")]
        mode: Option<AppendMode>,
    },

    /// Evaluate statements given as arguments, one per argument
    Eval {
        #[arg(required = true, allow_hyphen_values = true)]
        statements: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Override the configured append mode
        #[arg(long, value_name = "bulk|incremental")]
        mode: Option<AppendMode>,
    },

    /// Show the reallocations of one-at-a-time appends
    Growth {
        /// Number of elements to append
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_COUNT,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_COUNT as u64)
        )]
        count: usize,

        /// Override the configured append mode
        #[arg(long, value_name = "bulk|incremental")]
        mode: Option<AppendMode>,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get or set config values
    Config {
        /// Config key (growth-threshold, append-mode, color)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}
