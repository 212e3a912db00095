//! Job configuration file types
//!
//! A job file describes one table write (and optionally read) the way a
//! submitting client would hand it to the storage handler: table metadata,
//! storage formats, the write request and the job-scoped ids.

use crate::error::Result;
use crate::handler::StorageFormats;
use crate::job::{
    encode, DynamicPartitionContext, JobInfoCodec, JobReadDescriptor, JobWriteDescriptor,
};
use crate::table::{FieldSchema, TableMetadata};
use crate::types::{keys, JobProperties, StringMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Top-Level Job Config
// ============================================================================

/// Complete job configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Kind of config (always "job")
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Table being written
    pub table: TableConfig,

    /// Storage format names
    #[serde(default)]
    pub storage: StorageConfig,

    /// Write request
    #[serde(default)]
    pub write: WriteConfig,

    /// Read request
    #[serde(default)]
    pub read: ReadConfig,

    /// Job-scoped ids
    #[serde(default)]
    pub job: JobIdsConfig,

    /// Extra job properties passed through unchanged
    #[serde(default)]
    pub properties: StringMap,
}

fn default_kind() -> String {
    "job".to_string()
}

// ============================================================================
// Table Config
// ============================================================================

/// Table definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Database name
    #[serde(default = "default_database")]
    pub database: String,

    /// Table name
    pub name: String,

    /// Table root location
    pub location: String,

    /// Data columns in declared order
    #[serde(default)]
    pub columns: Vec<FieldSchema>,

    /// Partition columns in declared order
    #[serde(default)]
    pub partition_columns: Vec<FieldSchema>,

    /// Table parameters (`EXTERNAL`, `transactional`, format settings, ...)
    #[serde(default)]
    pub parameters: BTreeMap<String, ScalarValue>,
}

fn default_database() -> String {
    "default".to_string()
}

// ============================================================================
// Storage Config
// ============================================================================

/// Storage format names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_input_format")]
    pub input_format: String,

    #[serde(default = "default_output_format")]
    pub output_format: String,

    #[serde(default = "default_serde")]
    pub serde: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            input_format: default_input_format(),
            output_format: default_output_format(),
            serde: default_serde(),
        }
    }
}

fn default_input_format() -> String {
    "org.apache.hadoop.mapred.TextInputFormat".to_string()
}

fn default_output_format() -> String {
    "org.apache.hadoop.hive.ql.io.HiveIgnoreKeyTextOutputFormat".to_string()
}

fn default_serde() -> String {
    "org.apache.hadoop.hive.serde2.lazy.LazySimpleSerDe".to_string()
}

// ============================================================================
// Write Config
// ============================================================================

/// Write request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteConfig {
    /// Partition values known up front
    #[serde(default)]
    pub partition_values: BTreeMap<String, ScalarValue>,

    /// Custom root for dynamic partitions of an external table
    #[serde(default)]
    pub custom_dynamic_root: Option<String>,

    /// `${column}` template for dynamic partitions of an external table
    #[serde(default)]
    pub custom_dynamic_path: Option<String>,

    /// Explicit location for an external table
    #[serde(default)]
    pub location: Option<String>,
}

// ============================================================================
// Read Config
// ============================================================================

/// Read request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadConfig {
    /// Partition filter expression restricting the read
    #[serde(default)]
    pub filter: Option<String>,
}

// ============================================================================
// Job Ids Config
// ============================================================================

/// Job-scoped ids selecting the working directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobIdsConfig {
    /// Set for dynamic partitioning jobs
    #[serde(default)]
    pub dynamic_job_id: Option<String>,

    /// Set for static writes
    #[serde(default)]
    pub output_id: Option<String>,
}

// ============================================================================
// Scalar Values
// ============================================================================

/// A YAML scalar used where the job file allows unquoted values.
///
/// Quote values with leading zeros (`month: "05"`); unquoted they parse as
/// numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{b}"),
            ScalarValue::Int(i) => write!(f, "{i}"),
            ScalarValue::Float(x) => write!(f, "{x}"),
            ScalarValue::String(s) => write!(f, "{s}"),
        }
    }
}

fn to_string_map(values: &BTreeMap<String, ScalarValue>) -> StringMap {
    values
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect()
}

// ============================================================================
// Conversions
// ============================================================================

impl JobConfig {
    /// Table metadata, with flags derived from the table parameters
    pub fn table_metadata(&self) -> Result<TableMetadata> {
        let mut table = TableMetadata::new(&self.table.name, &self.table.location)
            .with_database(&self.table.database);
        table.data_columns.clone_from(&self.table.columns);
        table.partition_columns.clone_from(&self.table.partition_columns);
        table.with_parameters(to_string_map(&self.table.parameters))
    }

    /// Write descriptor for this job, unresolved
    pub fn write_descriptor(&self) -> Result<JobWriteDescriptor> {
        let mut descriptor = JobWriteDescriptor::new(self.table_metadata()?);
        for (key, value) in &self.write.partition_values {
            descriptor = descriptor.with_partition_value(key, value.to_string());
        }
        if let Some(root) = &self.write.custom_dynamic_root {
            descriptor = descriptor.with_custom_dynamic_root(root);
        }
        if let Some(template) = &self.write.custom_dynamic_path {
            descriptor = descriptor.with_custom_dynamic_path(template);
        }
        if let Some(location) = &self.write.location {
            descriptor = descriptor.with_location_override(location);
        }
        Ok(descriptor)
    }

    /// Read descriptor for the same table
    pub fn read_descriptor(&self) -> Result<JobReadDescriptor> {
        let descriptor = JobReadDescriptor::new(self.table_metadata()?);
        Ok(match &self.read.filter {
            Some(filter) => descriptor.with_filter(filter),
            None => descriptor,
        })
    }

    /// Dynamic partitioning and scratch markers of this job
    pub fn dynamic_partition_context(&self) -> DynamicPartitionContext {
        DynamicPartitionContext::from_ids(
            self.job.dynamic_job_id.as_deref(),
            self.job.output_id.as_deref(),
        )
    }

    /// Storage format names
    pub fn storage_formats(&self) -> StorageFormats {
        StorageFormats::new(
            &self.storage.input_format,
            &self.storage.output_format,
            &self.storage.serde,
        )
    }

    /// Job properties as a submitting client would set them: encoded read and
    /// write descriptors, the job ids, and any extra properties
    pub fn incoming_properties(&self, codec: &dyn JobInfoCodec) -> Result<JobProperties> {
        let mut props = self.properties.clone();
        props.insert(
            keys::OUTPUT_INFO.to_string(),
            encode(codec, &self.write_descriptor()?)?,
        );
        props.insert(
            keys::JOB_INFO.to_string(),
            encode(codec, &vec![self.read_descriptor()?])?,
        );
        let context = self.dynamic_partition_context();
        if let Some(id) = context.dyn_hash {
            props.insert(keys::DYNAMIC_PARTITIONING_JOB_ID.to_string(), id);
        }
        if let Some(id) = context.id_hash {
            props.insert(keys::OUTPUT_ID_HASH.to_string(), id);
        }
        Ok(props)
    }
}
