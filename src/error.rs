//! Error types for write-locator
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for write-locator
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Job Info Errors
    // ============================================================================
    #[error("Failed to decode job info: {message}")]
    Decode { message: String },

    #[error("Failed to encode job info: {message}")]
    Encode { message: String },

    #[error("Invalid base64 job info: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Missing job state: {message}")]
    MissingState { message: String },

    #[error("Inconsistent write request: {message}")]
    Validation { message: String },

    /// Terminal failure of a configuration pass; wraps whatever went wrong.
    #[error("Failed to configure job: {message}: {source}")]
    JobConfiguration {
        message: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Create a missing state error
    pub fn missing_state(message: impl Into<String>) -> Self {
        Self::MissingState {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Wrap an error as a terminal job configuration failure
    pub fn job_configuration(message: impl Into<String>, source: Error) -> Self {
        Self::JobConfiguration {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Root cause, looking through configuration wrappers
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::JobConfiguration { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether this is a precondition failure on the write request
    pub fn is_validation(&self) -> bool {
        matches!(self.root_cause(), Error::Validation { .. })
    }
}

/// Result type alias for write-locator
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
