//! Error types for kernel selection and configuration
//!
//! The kernels themselves are infallible. Errors only arise on the cold
//! paths: validating a configuration, constructing a checked region, or
//! explicitly requesting a backend the machine does not have.

use thiserror::Error;

/// Core error type for dotgeneral operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data (regions that do not fit their buffers)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Hardware feature not available on this machine or build
    #[error("Feature not available: {0}")]
    FeatureNotAvailable(String),

    /// Serialized configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a region that runs past the end of its buffer
    pub fn out_of_bounds(offset: usize, len: usize, buffer_len: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "{context}: region [{offset}, {}) exceeds buffer of length {buffer_len}",
            offset.saturating_add(len)
        ))
    }

    /// Create an error for a backend that cannot run here
    pub fn unavailable(backend: &str) -> Self {
        Self::FeatureNotAvailable(format!("{backend} backend is not supported on this machine"))
    }
}
