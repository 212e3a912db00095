//! Storage handler for file-based tables
//!
//! Entry points called once per job submission to configure the input and
//! output sides of a job. Descriptors are decoded from the incoming job
//! properties on entry and encoded back on exit; everything in between works
//! on plain values.

use crate::error::{Error, Result};
use crate::job::{decode, encode, Base64JsonCodec, DynamicPartitionContext, JobInfoCodec, JobWriteDescriptor};
use crate::location::{publish_output_dir, resolve_output_location, Resolution};
use crate::projection::{project_input_schema, ProjectedSchema};
use crate::special_cases::{FormatSpecialCases, SpecialCases};
use crate::types::{keys, JobProperties};
use std::sync::Arc;
use tracing::{debug, info};

/// Format names of a file-based table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageFormats {
    pub input_format: String,
    pub output_format: String,
    pub serde: String,
}

impl StorageFormats {
    pub fn new(
        input_format: impl Into<String>,
        output_format: impl Into<String>,
        serde: impl Into<String>,
    ) -> Self {
        Self {
            input_format: input_format.into(),
            output_format: output_format.into(),
            serde: serde.into(),
        }
    }
}

/// Configures jobs reading or writing a file-based table
#[derive(Clone)]
pub struct FileStorageHandler {
    formats: StorageFormats,
    codec: Arc<dyn JobInfoCodec>,
    special_cases: Arc<dyn SpecialCases>,
}

impl std::fmt::Debug for FileStorageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorageHandler")
            .field("formats", &self.formats)
            .finish_non_exhaustive()
    }
}

impl FileStorageHandler {
    /// Create a handler using the default codec and format special cases
    pub fn new(formats: StorageFormats) -> Self {
        Self {
            formats,
            codec: Arc::new(Base64JsonCodec),
            special_cases: Arc::new(FormatSpecialCases),
        }
    }

    /// Use a different job info codec
    #[must_use]
    pub fn with_codec(mut self, codec: impl JobInfoCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    /// Use a different special-cases hook
    #[must_use]
    pub fn with_special_cases(mut self, special_cases: impl SpecialCases + 'static) -> Self {
        self.special_cases = Arc::new(special_cases);
        self
    }

    pub fn input_format(&self) -> &str {
        &self.formats.input_format
    }

    pub fn output_format(&self) -> &str {
        &self.formats.output_format
    }

    pub fn serde(&self) -> &str {
        &self.formats.serde
    }

    /// Codec used for descriptors in job properties
    pub fn codec(&self) -> &dyn JobInfoCodec {
        self.codec.as_ref()
    }

    /// Publish the column layout of the table being read.
    ///
    /// Fails if `incoming` carries no read descriptor or it can not be decoded.
    pub fn configure_input_job_properties(
        &self,
        incoming: &JobProperties,
        job_properties: &mut JobProperties,
    ) -> Result<ProjectedSchema> {
        let projected = project_input_schema(incoming, self.codec(), job_properties)
            .map_err(|e| Error::job_configuration("Failed to project input schema", e))?;

        debug!(
            columns = %projected.columns(),
            transactional = projected.transactional,
            "Projected input schema"
        );
        Ok(projected)
    }

    /// Resolve the output location of the job and republish its descriptor.
    ///
    /// Reads the write descriptor and the dynamic partitioning/scratch ids
    /// from `incoming`; writes the output directory (when fully materialized),
    /// any format special cases, and the updated descriptor to
    /// `job_properties`.
    pub fn configure_output_job_properties(
        &self,
        incoming: &JobProperties,
        job_properties: &mut JobProperties,
    ) -> Result<Resolution> {
        self.configure_output(incoming, job_properties)
            .map_err(|e| Error::job_configuration("Failed to set output path", e))
    }

    fn configure_output(
        &self,
        incoming: &JobProperties,
        job_properties: &mut JobProperties,
    ) -> Result<Resolution> {
        let encoded = incoming.get(keys::OUTPUT_INFO).ok_or_else(|| {
            Error::missing_state(format!("no write descriptor under '{}'", keys::OUTPUT_INFO))
        })?;
        let mut descriptor: JobWriteDescriptor = decode(self.codec(), encoded)?;
        let context = DynamicPartitionContext::from_job_properties(incoming);

        let resolution = resolve_output_location(&mut descriptor, &context)?;

        // Nothing reaches the caller's map until the descriptor is encoded
        let mut staged = job_properties.clone();
        let published = publish_output_dir(&resolution, &mut staged);
        self.special_cases
            .apply(self.output_format(), &descriptor, &mut staged);
        staged.insert(
            keys::OUTPUT_INFO.to_string(),
            encode(self.codec(), &descriptor)?,
        );
        *job_properties = staged;

        info!(
            table = %descriptor.table.qualified_name(),
            location = %resolution.location,
            output_dir_published = published,
            "Configured output location"
        );
        Ok(resolution)
    }
}
