//! Schema projection module
//!
//! Publishes the column layout and transactional flags of the table a job
//! reads, so the input side and serializers agree on columns.

mod projector;

pub use projector::{project_input_schema, ProjectedSchema};
