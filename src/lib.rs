//! # write-locator
//!
//! Output location resolution and schema projection for jobs writing into
//! partitioned, file-based tables.
//!
//! ## Features
//!
//! - **Job-scoped working directories**: every job writes under its own
//!   dynamic temp or scratch directory, so concurrent jobs never collide
//! - **Partition paths**: `col=value/...` directories in declared column
//!   order, with partial materialization for dynamic partition inserts
//! - **External table overrides**: custom dynamic roots, `${column}` path
//!   templates and explicit locations
//! - **Schema projection**: column names, types and transactional flags for
//!   the input side of a job
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use write_locator::handler::{FileStorageHandler, StorageFormats};
//! use write_locator::types::JobProperties;
//!
//! let handler = FileStorageHandler::new(StorageFormats::new(
//!     "org.apache.hadoop.hive.ql.io.orc.OrcInputFormat",
//!     "org.apache.hadoop.hive.ql.io.orc.OrcOutputFormat",
//!     "org.apache.hadoop.hive.ql.io.orc.OrcSerde",
//! ));
//!
//! let mut job_properties = JobProperties::new();
//! let resolution = handler.configure_output_job_properties(&incoming, &mut job_properties)?;
//! println!("writing to {}", resolution.location);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      FileStorageHandler                      │
//! │  configure_input_job_properties   configure_output_job_...   │
//! └──────────────────────────────────────────────────────────────┘
//!            │                                  │
//!     ┌──────┴──────┐      ┌───────────┬────────┴──┬──────────────┐
//!     │ Projection  │      │ Location  │   Path    │ SpecialCases │
//!     ├─────────────┤      ├───────────┼───────────┼──────────────┤
//!     │ columns     │      │ OutputPlan│ join      │ ORC          │
//!     │ types       │      │ work dir  │ escape    │ Parquet      │
//!     │ ACID flags  │      │ publish   │ part name │ Avro         │
//!     └─────────────┘      └───────────┴───────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types, property keys and directory names
pub mod types;

/// Table metadata
pub mod table;

/// Job descriptors and their encoding
pub mod job;

/// Storage paths and partition directory names
pub mod path;

/// Custom partition path templates
pub mod template;

/// Input schema projection
pub mod projection;

/// Output location resolution
pub mod location;

/// Format-specific job property adjustments
pub mod special_cases;

/// Storage handler entry points
pub mod handler;

/// Job definition files
pub mod config;

/// YAML loader for job definitions
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use handler::{FileStorageHandler, StorageFormats};
pub use job::{DynamicPartitionContext, JobReadDescriptor, JobWriteDescriptor, WriteMode};
pub use location::{OutputPlan, Resolution};
pub use table::{FieldSchema, TableMetadata};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
