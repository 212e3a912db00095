//! Output location resolution
//!
//! Computes where a job writes: a working directory unique to the job, plus a
//! relative path under it chosen by a closed set of output plans.
//!
//! # Overview
//!
//! - `OutputPlan` / `decide_output_plan` - Which rule places the output
//! - `working_directory` - Dynamic temp area or static scratch area
//! - `resolve_output_location` - Full resolution pass over a descriptor
//! - `validate_write_request` - Preconditions on the write request
//!
//! Resolution is pure path composition; nothing touches a filesystem.

mod plan;
mod resolver;

pub use plan::{decide_output_plan, OutputPlan};
pub use resolver::{
    publish_output_dir, relative_output_path, resolve_output_location, validate_write_request,
    working_directory, Resolution,
};

#[cfg(test)]
mod tests;
