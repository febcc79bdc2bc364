//! Transition tool call errors.

use thiserror::Error;

/// Errors that can occur while decoding a transition tool call
#[derive(Debug, Error)]
pub enum ToolCallError {
    /// Arguments were not a JSON object of the expected shape
    #[error("failed to parse workflow__transition arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    /// The model called the tool without naming an event
    #[error("workflow__transition call is missing an event")]
    MissingEvent,
}
