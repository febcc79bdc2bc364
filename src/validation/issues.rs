//! Findings reported by spec validation.

use thiserror::Error;

/// Blocking structural defect in a spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("version must be 1, got {found}")]
    UnsupportedVersion { found: i64 },

    #[error("states must be non-empty")]
    NoStates,

    #[error("entry state {entry:?} not found in states")]
    UnknownEntry { entry: String },

    #[error("entry state {state:?} references unknown prompt_task {prompt_task:?}")]
    UnknownEntryPromptTask { state: String, prompt_task: String },

    #[error("state {state:?} references unknown prompt_task {prompt_task:?}")]
    UnknownPromptTask { state: String, prompt_task: String },

    #[error("state {state:?} event {event:?} targets unknown state {target:?}")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },

    #[error("state {state:?} has invalid persistence {value:?} (expected \"transient\" or \"persistent\")")]
    InvalidPersistence { state: String, value: String },

    #[error("state {state:?} has invalid orchestration {value:?} (expected \"internal\", \"external\" or \"hybrid\")")]
    InvalidOrchestration { state: String, value: String },
}

/// Advisory finding that never blocks use of a spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationWarning {
    #[error("state {state:?} event {event:?} should be PascalCase")]
    EventNotPascalCase { state: String, event: String },

    #[error("cycle detected: {from} -> {to}")]
    Cycle { from: String, to: String },
}
