//! YAML Loader module
//!
//! Parse job definitions from YAML files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `load_job_config` - Load and validate a job file
//! - `load_job_config_from_str` - Same, from a YAML string
//! - Validation of table and write definitions

mod parser;

pub use parser::{load_job_config, load_job_config_from_str};
