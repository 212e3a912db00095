//! Table metadata types

use crate::error::{Error, Result};
use crate::types::{params, parse_bool, StringMap};
use serde::{Deserialize, Serialize};

/// A column definition: name plus type descriptor (e.g. `int`, `map<string,int>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Column name
    pub name: String,
    /// Type descriptor string
    #[serde(rename = "type")]
    pub type_string: String,
}

impl FieldSchema {
    /// Create a new field
    pub fn new(name: impl Into<String>, type_string: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_string: type_string.into(),
        }
    }
}

// ============================================================================
// ACID Operational Properties
// ============================================================================

/// Operational properties of a transactional table, carried as a bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcidOperationalProperties {
    bits: u32,
}

impl AcidOperationalProperties {
    pub const SPLIT_UPDATE_BIT: u32 = 0x01;
    pub const HASH_BASED_MERGE_BIT: u32 = 0x02;
    pub const INSERT_ONLY_BIT: u32 = 0x04;

    const DEFAULT_VALUE: &'static str = "default";
    const SPLIT_UPDATE: &'static str = "split_update";
    const HASH_BASED_MERGE: &'static str = "hash_merge";
    const INSERT_ONLY: &'static str = "insert_only";

    /// Properties of a full ACID table with split updates
    pub fn default_acid() -> Self {
        Self {
            bits: Self::SPLIT_UPDATE_BIT,
        }
    }

    /// Properties of an insert-only table
    pub fn insert_only() -> Self {
        Self {
            bits: Self::INSERT_ONLY_BIT,
        }
    }

    /// Build from a raw bitset
    pub fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Parse the `transactional_properties` table parameter.
    ///
    /// Accepts `default`, `insert_only`, a `|`-separated list of
    /// `split_update`/`hash_merge`, or a decimal bitset.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(Self::DEFAULT_VALUE) {
            return Ok(Self::default_acid());
        }
        if value.eq_ignore_ascii_case(Self::INSERT_ONLY) {
            return Ok(Self::insert_only());
        }
        if let Ok(bits) = value.parse::<u32>() {
            return Ok(Self::from_bits(bits));
        }

        let mut bits = 0;
        for option in value.split('|').map(str::trim) {
            bits |= match option.to_ascii_lowercase().as_str() {
                Self::SPLIT_UPDATE => Self::SPLIT_UPDATE_BIT,
                Self::HASH_BASED_MERGE => Self::HASH_BASED_MERGE_BIT,
                _ => {
                    return Err(Error::invalid_value(
                        params::TRANSACTIONAL_PROPERTIES,
                        format!("unknown operational property '{option}'"),
                    ))
                }
            };
        }
        Ok(Self { bits })
    }

    /// Raw bitset
    pub fn to_bits(self) -> u32 {
        self.bits
    }
}

impl std::fmt::Display for AcidOperationalProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits)
    }
}

// ============================================================================
// Table Metadata
// ============================================================================

/// Metadata of a table, loaded once per job configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Database the table belongs to
    #[serde(default)]
    pub database_name: String,

    /// Table name
    pub table_name: String,

    /// Root location of the table
    pub location: String,

    /// Data columns in declared order
    #[serde(default)]
    pub data_columns: Vec<FieldSchema>,

    /// Partition columns in declared order
    #[serde(default)]
    pub partition_columns: Vec<FieldSchema>,

    /// Whether the table's storage lifecycle is externally managed
    #[serde(default)]
    pub external: bool,

    /// Whether the table is transactional
    #[serde(default)]
    pub transactional: bool,

    /// ACID operational properties (transactional tables only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acid_properties: Option<AcidOperationalProperties>,

    /// Free-form table parameters
    #[serde(default, skip_serializing_if = "StringMap::is_empty")]
    pub parameters: StringMap,
}

impl TableMetadata {
    /// Create metadata for a managed, non-transactional table
    pub fn new(table_name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            database_name: "default".to_string(),
            table_name: table_name.into(),
            location: location.into(),
            data_columns: Vec::new(),
            partition_columns: Vec::new(),
            external: false,
            transactional: false,
            acid_properties: None,
            parameters: StringMap::new(),
        }
    }

    /// Set the database name
    #[must_use]
    pub fn with_database(mut self, database_name: impl Into<String>) -> Self {
        self.database_name = database_name.into();
        self
    }

    /// Append a data column
    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, type_string: impl Into<String>) -> Self {
        self.data_columns.push(FieldSchema::new(name, type_string));
        self
    }

    /// Append a partition column
    #[must_use]
    pub fn with_partition_column(
        mut self,
        name: impl Into<String>,
        type_string: impl Into<String>,
    ) -> Self {
        self.partition_columns
            .push(FieldSchema::new(name, type_string));
        self
    }

    /// Mark the table as external
    #[must_use]
    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }

    /// Mark the table as transactional with the given operational properties
    #[must_use]
    pub fn transactional(mut self, props: AcidOperationalProperties) -> Self {
        self.transactional = true;
        self.acid_properties = Some(props);
        self
    }

    /// Apply table parameters, deriving the external and transactional flags
    /// from `EXTERNAL`, `transactional` and `transactional_properties`.
    pub fn with_parameters(mut self, parameters: StringMap) -> Result<Self> {
        self.external = parse_bool(parameters.get(params::EXTERNAL).map(String::as_str));
        self.transactional =
            parse_bool(parameters.get(params::TRANSACTIONAL).map(String::as_str));
        self.acid_properties = if self.transactional {
            Some(
                parameters
                    .get(params::TRANSACTIONAL_PROPERTIES)
                    .map(|v| AcidOperationalProperties::parse(v))
                    .transpose()?
                    .unwrap_or_else(AcidOperationalProperties::default_acid),
            )
        } else {
            None
        };
        self.parameters = parameters;
        Ok(self)
    }

    /// Fully qualified `db.table` name
    pub fn qualified_name(&self) -> String {
        if self.database_name.is_empty() {
            self.table_name.clone()
        } else {
            format!("{}.{}", self.database_name, self.table_name)
        }
    }

    /// Partition column names in declared order
    pub fn partition_column_names(&self) -> impl Iterator<Item = &str> {
        self.partition_columns.iter().map(|f| f.name.as_str())
    }

    /// Whether `name` is a declared partition column
    pub fn is_partition_column(&self, name: &str) -> bool {
        self.partition_columns.iter().any(|f| f.name == name)
    }

    /// Whether the table is partitioned at all
    pub fn is_partitioned(&self) -> bool {
        !self.partition_columns.is_empty()
    }

    /// Get a table parameter
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}
