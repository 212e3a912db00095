//! Output plan selection

use crate::job::{JobWriteDescriptor, WriteMode};

/// How the relative output path under the working directory is chosen.
///
/// Exactly one plan applies to a write; see [`decide_output_plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPlan {
    /// Dynamic partitions of an external table laid out by a custom
    /// `${column}` template. Columns without a static value are rendered as a
    /// `[^/]*` pattern matched by the task writers.
    OverrideByTemplate { template: String },

    /// Static write to an external table with an explicit location. Nothing
    /// is appended to the working directory; the override stays on the
    /// descriptor as the final location for the commit phase.
    OverrideByLocation { location: String },

    /// Static write to a table without partition columns
    Unpartitioned,

    /// Dynamic write whose partition values are not all known yet. Task
    /// writers compose each partition directory under the working directory.
    DynamicPartitions,

    /// `col=value/...` directory of the known partition values, in declared
    /// column order
    PartitionPath,
}

impl OutputPlan {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            OutputPlan::OverrideByTemplate { .. } => "override_by_template",
            OutputPlan::OverrideByLocation { .. } => "override_by_location",
            OutputPlan::Unpartitioned => "unpartitioned",
            OutputPlan::DynamicPartitions => "dynamic_partitions",
            OutputPlan::PartitionPath => "partition_path",
        }
    }
}

/// Select the output plan for a write. First match wins:
///
/// 1. dynamic mode with a custom path template
/// 2. static mode, external table, explicit location
/// 3. static mode, table without partition columns
/// 4. dynamic mode with partition values still to be discovered
/// 5. partition path of the known values
pub fn decide_output_plan(descriptor: &JobWriteDescriptor, mode: &WriteMode) -> OutputPlan {
    let dynamic = mode.is_dynamic();

    if dynamic {
        if let Some(template) = descriptor.custom_dynamic_path() {
            return OutputPlan::OverrideByTemplate {
                template: template.to_string(),
            };
        }
    }

    if !dynamic && descriptor.table.external {
        if let Some(location) = descriptor.location_override() {
            return OutputPlan::OverrideByLocation {
                location: location.to_string(),
            };
        }
    }

    if !dynamic && !descriptor.table.is_partitioned() {
        return OutputPlan::Unpartitioned;
    }

    if dynamic && !descriptor.is_fully_materialized() {
        return OutputPlan::DynamicPartitions;
    }

    OutputPlan::PartitionPath
}
