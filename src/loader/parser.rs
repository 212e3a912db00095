//! YAML parser for job definitions
//!
//! Parses and validates job YAML files.

use crate::config::{JobConfig, TableConfig};
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load a job definition from a file path
pub fn load_job_config(path: impl AsRef<Path>) -> Result<JobConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read job file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_job_config_from_str(&content)
}

/// Load a job definition from a YAML string
pub fn load_job_config_from_str(yaml: &str) -> Result<JobConfig> {
    let config: JobConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse job YAML: {e}")))?;

    validate_job_config(&config)?;
    Ok(config)
}

/// Validate a job definition
fn validate_job_config(config: &JobConfig) -> Result<()> {
    if config.kind != "job" {
        return Err(Error::invalid_value(
            "kind",
            format!("expected 'job', found '{}'", config.kind),
        ));
    }

    validate_table(&config.table)?;

    let context = config.dynamic_partition_context();
    if context.dyn_hash.is_none() && context.id_hash.is_none() {
        return Err(Error::config(
            "Job must set job.dynamic_job_id or job.output_id",
        ));
    }

    Ok(())
}

/// Validate a table definition
fn validate_table(table: &TableConfig) -> Result<()> {
    if table.name.is_empty() {
        return Err(Error::missing_field("table.name"));
    }

    if table.location.trim().is_empty() {
        return Err(Error::missing_field("table.location"));
    }

    let mut seen = HashSet::new();
    for column in &table.columns {
        if column.name.is_empty() {
            return Err(Error::config(format!(
                "Table '{}' has a column without a name",
                table.name
            )));
        }
        if !seen.insert(column.name.as_str()) {
            return Err(Error::config(format!(
                "Duplicate column '{}' in table '{}'",
                column.name, table.name
            )));
        }
    }

    let mut partition_seen = HashSet::new();
    for column in &table.partition_columns {
        if seen.contains(column.name.as_str()) {
            return Err(Error::config(format!(
                "Partition column '{}' is also a data column of table '{}'",
                column.name, table.name
            )));
        }
        if !partition_seen.insert(column.name.as_str()) {
            return Err(Error::config(format!(
                "Duplicate partition column '{}' in table '{}'",
                column.name, table.name
            )));
        }
    }

    Ok(())
}
