//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Encoding to or decoding from JSON failed
    #[error("Checkpoint serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint data failed validation
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
