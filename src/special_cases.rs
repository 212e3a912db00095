//! Format-specific job property adjustments
//!
//! Some file formats read their writer settings from job properties rather
//! than from table parameters. The hook here copies those settings across
//! for the output format a table uses.

use crate::job::JobWriteDescriptor;
use crate::types::JobProperties;
use tracing::debug;

/// File format family, recognized from an output format name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormatKind {
    Orc,
    Parquet,
    Avro,
    Text,
    SequenceFile,
    Other(String),
}

impl OutputFormatKind {
    /// Recognize the format family of an output format name such as
    /// `org.apache.hadoop.hive.ql.io.orc.OrcOutputFormat` or `parquet`
    pub fn from_name(name: &str) -> Self {
        let simple = name.rsplit('.').next().unwrap_or(name).to_ascii_lowercase();
        if simple.starts_with("orc") {
            Self::Orc
        } else if simple.contains("parquet") {
            Self::Parquet
        } else if simple.contains("avro") {
            Self::Avro
        } else if simple.contains("sequencefile") {
            Self::SequenceFile
        } else if simple.contains("text") || simple.contains("ignorekey") {
            Self::Text
        } else {
            Self::Other(name.to_string())
        }
    }

    /// Table parameters this format expects to find in job properties
    pub fn job_parameters(&self) -> &'static [&'static str] {
        match self {
            Self::Orc => &[
                "orc.compress",
                "orc.compress.size",
                "orc.stripe.size",
                "orc.block.padding",
                "orc.row.index.stride",
                "orc.create.index",
                "orc.bloom.filter.columns",
                "orc.bloom.filter.fpp",
            ],
            Self::Parquet => &[
                "parquet.compression",
                "parquet.block.size",
                "parquet.enable.dictionary",
            ],
            Self::Avro => &["avro.schema.literal", "avro.schema.url"],
            Self::Text | Self::SequenceFile | Self::Other(_) => &[],
        }
    }
}

/// Hook adjusting job properties for the output format in use
pub trait SpecialCases: Send + Sync {
    /// Adjust `job_properties` for a write through `output_format`
    fn apply(
        &self,
        output_format: &str,
        descriptor: &JobWriteDescriptor,
        job_properties: &mut JobProperties,
    );
}

/// Copies format writer settings from table parameters into job properties,
/// never overwriting a value the job already carries
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatSpecialCases;

impl SpecialCases for FormatSpecialCases {
    fn apply(
        &self,
        output_format: &str,
        descriptor: &JobWriteDescriptor,
        job_properties: &mut JobProperties,
    ) {
        let kind = OutputFormatKind::from_name(output_format);
        for key in kind.job_parameters() {
            let Some(value) = descriptor.table.parameter(key) else {
                continue;
            };
            if !job_properties.contains_key(*key) {
                debug!(key, value, format = ?kind, "Copying table parameter to job properties");
                job_properties.insert((*key).to_string(), value.to_string());
            }
        }
    }
}

/// Leaves job properties untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpecialCases;

impl SpecialCases for NoSpecialCases {
    fn apply(&self, _: &str, _: &JobWriteDescriptor, _: &mut JobProperties) {}
}
