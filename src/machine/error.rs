//! Errors returned when an event cannot be applied.

use thiserror::Error;

/// Coarse classification of a rejected event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The event is not defined for the current state, or the current state
    /// is not defined in the spec
    InvalidEvent,
    /// The current state has no outgoing events
    TerminalState,
}

/// Reasons `process_event` can reject an event.
///
/// None of these leave the context modified, so the caller can surface the
/// message back to the model and let it retry with a different event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("invalid event {event:?}: current state {state:?} is not defined in the workflow")]
    UndefinedState { state: String, event: String },

    #[error("state {state:?} is terminal and accepts no events (got {event:?})")]
    TerminalState { state: String, event: String },

    #[error(
        "invalid event {event:?} for state {state:?} (valid events: {})",
        .valid_events.join(", ")
    )]
    InvalidEvent {
        state: String,
        event: String,
        valid_events: Vec<String>,
    },
}

impl TransitionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UndefinedState { .. } | Self::InvalidEvent { .. } => ErrorKind::InvalidEvent,
            Self::TerminalState { .. } => ErrorKind::TerminalState,
        }
    }

    /// The rejected event name.
    pub fn event(&self) -> &str {
        match self {
            Self::UndefinedState { event, .. }
            | Self::TerminalState { event, .. }
            | Self::InvalidEvent { event, .. } => event,
        }
    }
}
