//! Resolution pass over a write descriptor

use super::plan::{decide_output_plan, OutputPlan};
use crate::error::{Error, Result};
use crate::job::{DynamicPartitionContext, JobWriteDescriptor, WriteMode};
use crate::path::{partition_path, StoragePath};
use crate::template;
use crate::types::{keys, JobProperties, DYNTEMP_DIR_NAME, SCRATCH_DIR_NAME};
use tracing::{debug, warn};

/// Outcome of one resolution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Plan that placed the output
    pub plan: OutputPlan,
    /// Job-unique intermediate directory
    pub working_directory: StoragePath,
    /// Path under the working directory; empty when output goes directly into it
    pub relative_path: String,
    /// Working directory joined with the relative path
    pub location: StoragePath,
    /// Whether `location` is the job's single output directory
    pub publish_output_dir: bool,
}

/// Check the write request for combinations the resolver can not place
pub fn validate_write_request(descriptor: &JobWriteDescriptor, mode: &WriteMode) -> Result<()> {
    let table = &descriptor.table;

    let unknown: Vec<&str> = descriptor
        .partition_values
        .keys()
        .map(String::as_str)
        .filter(|key| !table.is_partition_column(key))
        .collect();
    if !unknown.is_empty() {
        return Err(Error::validation(format!(
            "partition values given for [{}], which are not partition columns of {}",
            unknown.join(", "),
            table.qualified_name()
        )));
    }

    if let Some(template) = descriptor.custom_dynamic_path() {
        if !table.external {
            return Err(Error::validation(format!(
                "custom dynamic partition path is only supported for external tables, {} is managed",
                table.qualified_name()
            )));
        }
        if template.starts_with('/')
            || template.contains("://")
            || template.split('/').any(|segment| segment == "..")
        {
            return Err(Error::validation(format!(
                "custom dynamic partition path '{template}' must stay under the job's working directory"
            )));
        }
        let unknown: Vec<String> = template::extract_variables(template)
            .into_iter()
            .filter(|name| !table.is_partition_column(name))
            .collect();
        if !unknown.is_empty() {
            return Err(Error::validation(format!(
                "custom dynamic partition path '{template}' references [{}], which are not partition columns",
                unknown.join(", ")
            )));
        }
        if !mode.is_dynamic() {
            warn!(
                table = %table.qualified_name(),
                "Custom dynamic partition path ignored for a static write"
            );
        }
    }

    if descriptor.location_override().is_some() && !table.external {
        warn!(
            table = %table.qualified_name(),
            "Location override ignored for a managed table"
        );
    }

    Ok(())
}

/// Job-unique directory all output of this job is written under.
///
/// Dynamic writes use `<root>/_DYNTEMP_<dyn_hash>`, where an external table's
/// custom dynamic root replaces the table root; static writes use
/// `<table location>/_SCRATCH_<id_hash>`.
pub fn working_directory(descriptor: &JobWriteDescriptor, mode: &WriteMode) -> Result<StoragePath> {
    let table_root = StoragePath::parse(&descriptor.table.location)?;

    match mode {
        WriteMode::Dynamic { dyn_hash } => {
            let root = match descriptor.custom_dynamic_root() {
                Some(custom_root) if descriptor.table.external => table_root.join(custom_root)?,
                _ => table_root,
            };
            root.join(&format!("{DYNTEMP_DIR_NAME}{dyn_hash}"))
        }
        WriteMode::Static { id_hash } => {
            table_root.join(&format!("{SCRATCH_DIR_NAME}{id_hash}"))
        }
    }
}

/// Relative output path for `plan`
pub fn relative_output_path(plan: &OutputPlan, descriptor: &JobWriteDescriptor) -> String {
    match plan {
        // Columns without a static value are matched per row by the task writers
        OutputPlan::OverrideByTemplate { template } => {
            template::render(template, &descriptor.partition_values)
        }
        OutputPlan::OverrideByLocation { .. }
        | OutputPlan::Unpartitioned
        | OutputPlan::DynamicPartitions => String::new(),
        OutputPlan::PartitionPath => partition_path(&descriptor.table, &descriptor.partition_values),
    }
}

/// Resolve and record the output location of `descriptor`.
///
/// Any location left by an earlier pass is discarded first.
pub fn resolve_output_location(
    descriptor: &mut JobWriteDescriptor,
    context: &DynamicPartitionContext,
) -> Result<Resolution> {
    descriptor.clear_location();

    let mode = context.mode()?;
    validate_write_request(descriptor, &mode)?;

    let working_directory = working_directory(descriptor, &mode)?;
    let plan = decide_output_plan(descriptor, &mode);
    let relative_path = relative_output_path(&plan, descriptor);

    let location = if relative_path.is_empty() {
        working_directory.clone()
    } else {
        working_directory.join(&relative_path)?
    };
    descriptor.set_location(location.to_string());

    let publish_output_dir = descriptor.is_fully_materialized();

    debug!(
        table = %descriptor.table.qualified_name(),
        plan = plan.name(),
        working_directory = %working_directory,
        location = %location,
        publish_output_dir,
        "Resolved output location"
    );

    Ok(Resolution {
        plan,
        working_directory,
        relative_path,
        location,
        publish_output_dir,
    })
}

/// Set the output directory property when the resolution allows it.
///
/// Returns whether the property was set.
pub fn publish_output_dir(resolution: &Resolution, job_properties: &mut JobProperties) -> bool {
    if resolution.publish_output_dir {
        job_properties.insert(keys::OUTPUT_DIR.to_string(), resolution.location.to_string());
    }
    resolution.publish_output_dir
}
