//! Column and transactional metadata projection

use crate::error::{Error, Result};
use crate::job::{decode, JobInfoCodec, JobReadDescriptor};
use crate::table::{AcidOperationalProperties, TableMetadata};
use crate::types::{keys, JobProperties};

/// Column layout and transactional flags of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedSchema {
    /// Data column names in declared order
    pub column_names: Vec<String>,
    /// Data column type descriptors, parallel to `column_names`
    pub column_types: Vec<String>,
    /// Whether the table is transactional
    pub transactional: bool,
    /// Operational properties; tables without any get the default bitset
    pub acid_properties: AcidOperationalProperties,
}

impl ProjectedSchema {
    /// Project the data columns of `table`
    pub fn from_table(table: &TableMetadata) -> Self {
        let (column_names, column_types): (Vec<String>, Vec<String>) = table
            .data_columns
            .iter()
            .map(|f| (f.name.clone(), f.type_string.clone()))
            .unzip();
        Self {
            column_names,
            column_types,
            transactional: table.transactional,
            acid_properties: table
                .acid_properties
                .unwrap_or_else(AcidOperationalProperties::default_acid),
        }
    }

    /// Column names joined with `,`
    pub fn columns(&self) -> String {
        self.column_names.join(",")
    }

    /// Column types joined with `:`
    pub fn column_types(&self) -> String {
        self.column_types.join(":")
    }

    /// Write column and transactional properties into `job_properties`.
    ///
    /// The schema evolution keys carry the same values as the plain ones.
    pub fn apply_to(&self, job_properties: &mut JobProperties) {
        let columns = self.columns();
        let types = self.column_types();

        job_properties.insert(keys::SCHEMA_EVOLUTION_COLUMNS.to_string(), columns.clone());
        job_properties.insert(keys::COLUMNS.to_string(), columns);
        job_properties.insert(keys::SCHEMA_EVOLUTION_COLUMNS_TYPES.to_string(), types.clone());
        job_properties.insert(keys::COLUMNS_TYPES.to_string(), types);

        job_properties.insert(
            keys::TRANSACTIONAL_TABLE_SCAN.to_string(),
            self.transactional.to_string(),
        );
        job_properties.insert(
            keys::TXN_OPERATIONAL_PROPERTIES.to_string(),
            self.acid_properties.to_bits().to_string(),
        );
    }
}

/// Decode the read descriptors from `incoming`, project the last one, and
/// publish it into `job_properties`.
pub fn project_input_schema(
    incoming: &JobProperties,
    codec: &dyn JobInfoCodec,
    job_properties: &mut JobProperties,
) -> Result<ProjectedSchema> {
    let encoded = incoming.get(keys::JOB_INFO).ok_or_else(|| {
        Error::missing_state(format!("no read descriptor under '{}'", keys::JOB_INFO))
    })?;

    let descriptors: Vec<JobReadDescriptor> = decode(codec, encoded)?;
    let descriptor = descriptors
        .last()
        .ok_or_else(|| Error::missing_state("No read descriptor was set in job config"))?;

    let projected = ProjectedSchema::from_table(&descriptor.table);
    projected.apply_to(job_properties);
    Ok(projected)
}
