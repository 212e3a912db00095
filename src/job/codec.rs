//! Encoding of job descriptors into job property values
//!
//! Descriptors travel between configuration, task attempts and commit as a
//! single opaque string per property key. The wire format sits behind
//! [`JobInfoCodec`] so callers can plug in whatever their job runtime reads.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Encodes structured job info to and from a property string
pub trait JobInfoCodec: Send + Sync {
    /// Encode a value to its property string form
    fn encode(&self, value: &Value) -> Result<String>;

    /// Decode a property string
    fn decode(&self, encoded: &str) -> Result<Value>;
}

/// JSON wrapped in standard base64
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64JsonCodec;

impl JobInfoCodec for Base64JsonCodec {
    fn encode(&self, value: &Value) -> Result<String> {
        let json = serde_json::to_vec(value).map_err(|e| Error::encode(e.to_string()))?;
        Ok(STANDARD.encode(json))
    }

    fn decode(&self, encoded: &str) -> Result<Value> {
        let bytes = STANDARD.decode(encoded.trim())?;
        serde_json::from_slice(&bytes).map_err(|e| Error::decode(e.to_string()))
    }
}

/// Encode a typed value with `codec`
pub fn encode<T: Serialize>(codec: &dyn JobInfoCodec, value: &T) -> Result<String> {
    let value = serde_json::to_value(value).map_err(|e| Error::encode(e.to_string()))?;
    codec.encode(&value)
}

/// Decode a typed value with `codec`
pub fn decode<T: DeserializeOwned>(codec: &dyn JobInfoCodec, encoded: &str) -> Result<T> {
    let value = codec.decode(encoded)?;
    serde_json::from_value(value).map_err(|e| Error::decode(e.to_string()))
}
