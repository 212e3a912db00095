//! Table metadata module
//!
//! Describes the table being written to or read from.
//!
//! # Overview
//!
//! The table module provides:
//! - `TableMetadata` - Location, columns, partition columns and storage flags
//! - `FieldSchema` - A single column name and type descriptor
//! - `AcidOperationalProperties` - Transactional operational bitset
//!
//! Table metadata is read-only once loaded for a job.

mod types;

pub use types::{AcidOperationalProperties, FieldSchema, TableMetadata};
