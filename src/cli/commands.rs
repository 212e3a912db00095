//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Output location resolver for partitioned table writes
#[derive(Parser, Debug)]
#[command(name = "write-locator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Job definition file (YAML)
    #[arg(short, long, global = true)]
    pub job: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the output location and print the configured job properties
    Resolve {
        /// Override the dynamic partitioning job id from the job file
        #[arg(long)]
        dynamic_job_id: Option<String>,

        /// Override the scratch output id from the job file
        #[arg(long)]
        output_id: Option<String>,

        /// Include every configured job property, not just the location
        #[arg(long)]
        properties: bool,
    },

    /// Project the input schema and print the column properties
    Project,

    /// Validate the job definition and write request
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}
