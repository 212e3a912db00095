//! Job descriptor module
//!
//! Per-job state that travels through job properties between the
//! configuration pass, task attempts and the commit phase.
//!
//! # Overview
//!
//! The job module provides:
//! - `JobWriteDescriptor` - What a job writes and where it resolved to
//! - `JobReadDescriptor` - What a job reads
//! - `DynamicPartitionContext` / `WriteMode` - Dynamic vs. static scratch mode
//! - `JobInfoCodec` - Encoding of descriptors into property values

mod codec;
mod types;

pub use codec::{decode, encode, Base64JsonCodec, JobInfoCodec};
pub use types::{DynamicPartitionContext, JobReadDescriptor, JobWriteDescriptor, WriteMode};

#[cfg(test)]
mod tests;
