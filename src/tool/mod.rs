//! Model-facing transition tool.
//!
//! Each turn the host offers the model a `workflow__transition` tool whose
//! `event` argument is an enum of exactly the current state's legal events.
//! When the model calls it, the arguments are parsed back into a
//! [`TransitionCall`] and applied to the machine.
//!
//! # Example
//!
//! ```rust
//! use flowmind::core::{Spec, State};
//! use flowmind::tool::{build_transition_provider_descriptor, TransitionCall};
//! use flowmind::StateMachine;
//!
//! let spec = Spec::new("triage")
//!     .with_state(
//!         "triage",
//!         State::new("triage_prompt")
//!             .with_event("Escalate", "human")
//!             .with_event("Resolve", "closed"),
//!     )
//!     .with_state("human", State::new("handoff_prompt"))
//!     .with_state("closed", State::new("closing_prompt"));
//! let mut machine = StateMachine::new(spec);
//!
//! let tool = build_transition_provider_descriptor(&machine.available_events());
//! assert_eq!(tool.input_schema["properties"]["event"]["enum"][0], "Escalate");
//!
//! let call = TransitionCall::from_arguments(r#"{"event":"Resolve","context":"fixed"}"#).unwrap();
//! let outcome = call.apply(&mut machine).unwrap();
//! assert_eq!(outcome.new_state, "closed");
//! ```

mod call;
mod descriptor;
mod error;

pub use call::{ScheduledTransition, TransitionCall, TransitionOutcome};
pub use descriptor::{
    build_transition_provider_descriptor, build_transition_tool_descriptor,
    ProviderToolDescriptor, ToolDescriptor,
};
pub use error::ToolCallError;

use serde_json::{json, Value};
use std::collections::HashMap;

/// Qualified name of the transition tool.
pub const TRANSITION_TOOL_NAME: &str = "workflow__transition";

/// Namespace the transition tool is registered under.
pub const TRANSITION_TOOL_NAMESPACE: &str = "workflow";

pub const TRANSITION_TOOL_DESCRIPTION: &str = "Move the workflow to its next state. \
Call this once the current task is complete, choosing the event that best \
describes the outcome, and summarize what the next state needs to know in \
`context`.";

/// Sorted event names from a state's transition table.
///
/// Matches [`StateMachine::available_events`](crate::StateMachine::available_events)
/// for the same state.
pub fn sorted_events(on_event: &HashMap<String, String>) -> Vec<String> {
    let mut events: Vec<String> = on_event.keys().cloned().collect();
    events.sort_unstable();
    events
}

/// JSON Schema for the transition tool's arguments.
pub fn transition_input_schema<S: AsRef<str>>(events: &[S]) -> Value {
    let events: Vec<&str> = events.iter().map(|event| event.as_ref()).collect();
    json!({
        "type": "object",
        "properties": {
            "event": {
                "type": "string",
                "enum": events,
                "description": "The event that triggers the next workflow state"
            },
            "context": {
                "type": "string",
                "description": "Summary of the conversation to carry into the next state"
            }
        },
        "required": ["event", "context"]
    })
}
