//! Job descriptor types

use crate::error::{Error, Result};
use crate::table::TableMetadata;
use crate::types::{keys, JobProperties, StringMap};
use serde::{Deserialize, Serialize};

// ============================================================================
// Write Descriptor
// ============================================================================

/// Output side of a job: the target table, known partition values, user
/// overrides, and the location resolved for this job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobWriteDescriptor {
    /// Target table
    pub table: TableMetadata,

    /// Partition values known at configuration time, keyed by column name.
    /// May cover only a leading subset of the partition columns.
    #[serde(default)]
    pub partition_values: StringMap,

    /// Root that dynamic partitions of an external table are written under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_dynamic_root: Option<String>,

    /// `${column}` template for dynamic partition directories of an external table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_dynamic_path: Option<String>,

    /// Explicit location an external table write should land in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_override: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl JobWriteDescriptor {
    /// Create a descriptor for writing into `table`
    pub fn new(table: TableMetadata) -> Self {
        Self {
            table,
            partition_values: StringMap::new(),
            custom_dynamic_root: None,
            custom_dynamic_path: None,
            location_override: None,
            location: None,
        }
    }

    /// Add a known partition value
    #[must_use]
    pub fn with_partition_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.partition_values.insert(key.into(), value.into());
        self
    }

    /// Set the custom dynamic partition root
    #[must_use]
    pub fn with_custom_dynamic_root(mut self, root: impl Into<String>) -> Self {
        self.custom_dynamic_root = Some(root.into());
        self
    }

    /// Set the custom dynamic partition path template
    #[must_use]
    pub fn with_custom_dynamic_path(mut self, template: impl Into<String>) -> Self {
        self.custom_dynamic_path = Some(template.into());
        self
    }

    /// Set an explicit output location
    #[must_use]
    pub fn with_location_override(mut self, location: impl Into<String>) -> Self {
        self.location_override = Some(location.into());
        self
    }

    /// Custom dynamic root, if set and non-empty
    pub fn custom_dynamic_root(&self) -> Option<&str> {
        non_empty(self.custom_dynamic_root.as_deref())
    }

    /// Custom dynamic path template, if set and non-empty
    pub fn custom_dynamic_path(&self) -> Option<&str> {
        non_empty(self.custom_dynamic_path.as_deref())
    }

    /// Location override, if set and non-empty
    pub fn location_override(&self) -> Option<&str> {
        non_empty(self.location_override.as_deref())
    }

    /// Location resolved by the last resolution pass
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub(crate) fn set_location(&mut self, location: String) {
        self.location = Some(location);
    }

    pub(crate) fn clear_location(&mut self) {
        self.location = None;
    }

    /// Whether every declared partition column has a known value
    pub fn is_fully_materialized(&self) -> bool {
        self.table
            .partition_column_names()
            .all(|name| self.partition_values.contains_key(name))
    }

    /// Partition columns whose values are discovered at runtime, in declared order
    pub fn dynamic_partition_keys(&self) -> Vec<&str> {
        self.table
            .partition_column_names()
            .filter(|name| !self.partition_values.contains_key(*name))
            .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ============================================================================
// Read Descriptor
// ============================================================================

/// Input side of a job: the table being read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReadDescriptor {
    /// Source table
    pub table: TableMetadata,

    /// Partition filter expression, if the read is restricted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl JobReadDescriptor {
    /// Create a descriptor for reading `table`
    pub fn new(table: TableMetadata) -> Self {
        Self {
            table,
            filter: None,
        }
    }

    /// Restrict the read with a partition filter
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

// ============================================================================
// Dynamic Partition Context
// ============================================================================

/// Job-scoped identifiers selecting the working directory of a write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicPartitionContext {
    /// Present when partition values are discovered at runtime
    pub dyn_hash: Option<String>,
    /// Identifies this job's static scratch area
    pub id_hash: Option<String>,
}

/// Execution mode of a write, one per job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteMode {
    /// Partition values discovered per row; output goes to a dynamic temp area
    Dynamic { dyn_hash: String },
    /// Output goes to a static scratch area
    Static { id_hash: String },
}

impl DynamicPartitionContext {
    /// Context for a dynamic partitioning job
    pub fn dynamic(dyn_hash: impl Into<String>) -> Self {
        Self {
            dyn_hash: Some(dyn_hash.into()),
            id_hash: None,
        }
    }

    /// Context for a static write job
    pub fn scratch(id_hash: impl Into<String>) -> Self {
        Self {
            dyn_hash: None,
            id_hash: Some(id_hash.into()),
        }
    }

    /// Context from raw marker values; empty values count as absent
    pub fn from_ids(dyn_hash: Option<&str>, id_hash: Option<&str>) -> Self {
        let present = |v: Option<&str>| v.filter(|v| !v.is_empty()).map(str::to_string);
        Self {
            dyn_hash: present(dyn_hash),
            id_hash: present(id_hash),
        }
    }

    /// Read both markers from job properties
    pub fn from_job_properties(props: &JobProperties) -> Self {
        Self::from_ids(
            props.get(keys::DYNAMIC_PARTITIONING_JOB_ID).map(String::as_str),
            props.get(keys::OUTPUT_ID_HASH).map(String::as_str),
        )
    }

    /// Resolve the execution mode. The dynamic marker takes precedence; a job
    /// with neither marker has no working directory and is rejected.
    pub fn mode(&self) -> Result<WriteMode> {
        match (&self.dyn_hash, &self.id_hash) {
            (Some(dyn_hash), _) => Ok(WriteMode::Dynamic {
                dyn_hash: dyn_hash.clone(),
            }),
            (None, Some(id_hash)) => Ok(WriteMode::Static {
                id_hash: id_hash.clone(),
            }),
            (None, None) => Err(Error::missing_state(format!(
                "neither '{}' nor '{}' is set",
                keys::DYNAMIC_PARTITIONING_JOB_ID,
                keys::OUTPUT_ID_HASH
            ))),
        }
    }
}

impl WriteMode {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, WriteMode::Dynamic { .. })
    }
}
