//! Common types used throughout write-locator
//!
//! This module contains the job property map type and the well-known
//! property keys and directory names shared with downstream phases.

use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Flat job configuration map shared between configuration passes.
///
/// Ordered so that dumps and snapshots are deterministic.
pub type JobProperties = BTreeMap<String, String>;

/// Generic key-value map with string keys and values
pub type StringMap = BTreeMap<String, String>;

// ============================================================================
// Property Keys
// ============================================================================

/// Well-known job property keys
pub mod keys {
    /// Encoded list of read descriptors (input side)
    pub const JOB_INFO: &str = "mapreduce.lib.hcat.job.info";

    /// Encoded write descriptor (output side)
    pub const OUTPUT_INFO: &str = "mapreduce.lib.hcatoutput.info";

    /// Job-scoped id present when partition values are discovered at runtime
    pub const DYNAMIC_PARTITIONING_JOB_ID: &str = "mapreduce.lib.hcatoutput.dynamic.jobid";

    /// Job-scoped id of the static scratch area
    pub const OUTPUT_ID_HASH: &str = "mapreduce.lib.hcatoutput.id";

    /// Single output directory, only set for fully materialized partitions
    pub const OUTPUT_DIR: &str = "mapred.output.dir";

    pub const COLUMNS: &str = "columns";
    pub const COLUMNS_TYPES: &str = "columns.types";
    pub const SCHEMA_EVOLUTION_COLUMNS: &str = "schema.evolution.columns";
    pub const SCHEMA_EVOLUTION_COLUMNS_TYPES: &str = "schema.evolution.columns.types";

    /// Whether the scanned table is transactional
    pub const TRANSACTIONAL_TABLE_SCAN: &str = "hive.transactional.table.scan";

    /// ACID operational properties bitset
    pub const TXN_OPERATIONAL_PROPERTIES: &str = "hive.txn.operational.properties";
}

// ============================================================================
// Table Parameters
// ============================================================================

/// Table parameter names understood when deriving table metadata
pub mod params {
    pub const EXTERNAL: &str = "EXTERNAL";
    pub const TRANSACTIONAL: &str = "transactional";
    pub const TRANSACTIONAL_PROPERTIES: &str = "transactional_properties";
}

// ============================================================================
// Directory Names
// ============================================================================

/// Prefix of the per-job directory used by dynamic partition writes
pub const DYNTEMP_DIR_NAME: &str = "_DYNTEMP_";

/// Prefix of the per-job scratch directory used by static writes
pub const SCRATCH_DIR_NAME: &str = "_SCRATCH_";

/// Directory name used for a partition whose value is null or empty
pub const DEFAULT_PARTITION_NAME: &str = "__HIVE_DEFAULT_PARTITION__";

/// Parse a boolean the lenient way table parameters are written
/// (`"TRUE"`, `"true"`, `"True"` are all true; anything else is false).
pub fn parse_bool(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}
