//! CLI module
//!
//! Command-line interface for configuring table write jobs.
//!
//! # Commands
//!
//! - `resolve` - Resolve the output location of a job
//! - `project` - Project the input schema of a job
//! - `validate` - Validate a job file and its write request

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
