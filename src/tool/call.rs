//! Decoding and applying transition tool calls.

use super::error::ToolCallError;
use crate::core::Spec;
use crate::machine::{StateMachine, TransitionError};
use serde::{Deserialize, Serialize};

/// Arguments the model passes to the transition tool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionCall {
    #[serde(default)]
    pub event: String,
    /// Summary the model wants carried into the next state
    #[serde(default)]
    pub context: String,
}

/// Result reported back to the model after a transition is applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub new_state: String,
    pub event: String,
}

/// Immediate acknowledgement for a call the host will apply later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTransition {
    pub status: String,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_state: Option<String>,
}

impl TransitionCall {
    /// Parse the raw JSON argument string of a tool call.
    pub fn from_arguments(arguments: &str) -> Result<Self, ToolCallError> {
        let call: Self = serde_json::from_str(arguments)?;
        call.require_event()
    }

    /// Parse already-decoded tool call arguments.
    pub fn from_value(arguments: serde_json::Value) -> Result<Self, ToolCallError> {
        let call: Self = serde_json::from_value(arguments)?;
        call.require_event()
    }

    fn require_event(self) -> Result<Self, ToolCallError> {
        if self.event.trim().is_empty() {
            return Err(ToolCallError::MissingEvent);
        }
        Ok(self)
    }

    /// Feed the chosen event into the machine.
    pub fn apply(&self, machine: &mut StateMachine) -> Result<TransitionOutcome, TransitionError> {
        let transition = machine.process_event(&self.event)?;
        Ok(TransitionOutcome {
            new_state: transition.to.clone(),
            event: transition.event.clone(),
        })
    }

    /// Acknowledge the call before it is applied, naming the state the event
    /// leads to when the spec declares one.
    pub fn schedule(&self, spec: &Spec) -> ScheduledTransition {
        ScheduledTransition {
            status: "transition_scheduled".to_string(),
            event: self.event.clone(),
            target_state: spec.target_of(&self.event).map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use serde_json::json;

    fn spec() -> Spec {
        Spec::new("triage")
            .with_state(
                "triage",
                State::new("triage_prompt")
                    .with_event("Escalate", "human")
                    .with_event("Resolve", "closed"),
            )
            .with_state("human", State::new("handoff_prompt"))
            .with_state("closed", State::new("closing_prompt"))
    }

    #[test]
    fn parses_argument_string() {
        let call =
            TransitionCall::from_arguments(r#"{"event":"Escalate","context":"angry customer"}"#)
                .unwrap();

        assert_eq!(call.event, "Escalate");
        assert_eq!(call.context, "angry customer");
    }

    #[test]
    fn missing_context_defaults_to_empty() {
        let call = TransitionCall::from_value(json!({ "event": "Resolve" })).unwrap();
        assert_eq!(call.context, "");
    }

    #[test]
    fn missing_event_is_rejected() {
        let err = TransitionCall::from_value(json!({ "context": "x" })).unwrap_err();
        assert!(matches!(err, ToolCallError::MissingEvent));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = TransitionCall::from_arguments("{not json").unwrap_err();
        assert!(matches!(err, ToolCallError::InvalidArguments(_)));
        assert!(err.to_string().contains("workflow__transition"));
    }

    #[test]
    fn apply_moves_machine_and_reports_outcome() {
        let mut machine = StateMachine::new(spec());
        let call = TransitionCall {
            event: "Escalate".to_string(),
            context: String::new(),
        };

        let outcome = call.apply(&mut machine).unwrap();

        assert_eq!(
            outcome,
            TransitionOutcome {
                new_state: "human".to_string(),
                event: "Escalate".to_string(),
            }
        );
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({ "new_state": "human", "event": "Escalate" })
        );
    }

    #[test]
    fn apply_surfaces_invalid_event_for_retry() {
        let mut machine = StateMachine::new(spec());
        let call = TransitionCall {
            event: "Close".to_string(),
            context: String::new(),
        };

        let err = call.apply(&mut machine).unwrap_err();

        assert!(err.to_string().contains("Escalate, Resolve"));
        assert_eq!(machine.current_state(), "triage");
    }

    #[test]
    fn schedule_names_target_state() {
        let call = TransitionCall {
            event: "Resolve".to_string(),
            context: String::new(),
        };

        let ack = serde_json::to_value(call.schedule(&spec())).unwrap();
        assert_eq!(
            ack,
            json!({
                "status": "transition_scheduled",
                "event": "Resolve",
                "target_state": "closed"
            })
        );
    }

    #[test]
    fn schedule_omits_unknown_target() {
        let call = TransitionCall {
            event: "Vanish".to_string(),
            context: String::new(),
        };

        let ack = call.schedule(&spec());
        assert_eq!(ack.target_state, None);
    }
}
