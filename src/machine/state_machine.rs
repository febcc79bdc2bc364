//! Runtime engine that applies events to a context under a spec.

use super::builder::{system_clock, Clock, StateMachineBuilder};
use super::error::TransitionError;
use crate::core::{Context, Orchestration, Spec, State, StateTransition};
use crate::tool::sorted_events;
use std::fmt;
use std::sync::Arc;

/// Event-driven state machine for one workflow run.
///
/// The machine owns its [`Context`] exclusively. Reads hand out clones, and
/// [`process_event`](Self::process_event) takes `&mut self`, so a snapshot
/// can never observe a half-applied transition.
///
/// # Example
///
/// ```rust
/// use flowmind::core::{Spec, State};
/// use flowmind::StateMachine;
///
/// let spec = Spec::new("draft")
///     .with_state("draft", State::new("draft_prompt").with_event("Review", "review"))
///     .with_state(
///         "review",
///         State::new("review_prompt")
///             .with_event("Approve", "done")
///             .with_event("Revise", "draft"),
///     )
///     .with_state("done", State::new("done_prompt"));
///
/// let mut machine = StateMachine::new(spec);
/// assert_eq!(machine.current_prompt_task(), "draft_prompt");
///
/// machine.process_event("Review").unwrap();
/// assert_eq!(machine.available_events(), vec!["Approve", "Revise"]);
///
/// machine.process_event("Approve").unwrap();
/// assert!(machine.is_terminal());
/// assert_eq!(machine.context().transition_count(), 2);
/// ```
pub struct StateMachine {
    spec: Arc<Spec>,
    context: Context,
    clock: Clock,
}

impl StateMachine {
    /// Start a fresh run at the spec's entry state.
    pub fn new(spec: impl Into<Arc<Spec>>) -> Self {
        StateMachineBuilder::new(spec).build()
    }

    /// Resume a run from a previously persisted context.
    pub fn from_context(spec: impl Into<Arc<Spec>>, context: Context) -> Self {
        Self::from_parts(spec.into(), context, system_clock())
    }

    pub fn builder(spec: impl Into<Arc<Spec>>) -> StateMachineBuilder {
        StateMachineBuilder::new(spec)
    }

    pub(crate) fn from_parts(spec: Arc<Spec>, context: Context, clock: Clock) -> Self {
        Self {
            spec,
            context,
            clock,
        }
    }

    pub fn spec(&self) -> &Arc<Spec> {
        &self.spec
    }

    pub fn current_state(&self) -> &str {
        &self.context.current_state
    }

    /// Definition of the current state, if the spec has one.
    pub fn current_definition(&self) -> Option<&State> {
        self.spec.states.get(&self.context.current_state)
    }

    /// Prompt task of the current state; empty when the state is unknown.
    pub fn current_prompt_task(&self) -> &str {
        self.current_definition()
            .map(|state| state.prompt_task.as_str())
            .unwrap_or_default()
    }

    /// Apply `event` to the current state.
    ///
    /// On success the transition is appended to the history and returned.
    /// On failure nothing changes.
    pub fn process_event(&mut self, event: &str) -> Result<&StateTransition, TransitionError> {
        let target = match self.resolve(event) {
            Ok(target) => target.to_string(),
            Err(err) => {
                tracing::debug!(
                    state = %self.context.current_state,
                    event = event,
                    error = %err,
                    "workflow event rejected"
                );
                return Err(err);
            }
        };

        let transition = StateTransition {
            from: self.context.current_state.clone(),
            to: target,
            event: event.to_string(),
            timestamp: (self.clock)(),
        };

        tracing::debug!(
            from = %transition.from,
            to = %transition.to,
            event = event,
            "workflow transition"
        );

        Ok(self.context.apply(transition))
    }

    fn resolve(&self, event: &str) -> Result<&str, TransitionError> {
        let state_id = &self.context.current_state;
        let Some(state) = self.spec.states.get(state_id) else {
            return Err(TransitionError::UndefinedState {
                state: state_id.clone(),
                event: event.to_string(),
            });
        };

        if state.is_terminal() {
            return Err(TransitionError::TerminalState {
                state: state_id.clone(),
                event: event.to_string(),
            });
        }

        state
            .on_event
            .get(event)
            .map(String::as_str)
            .ok_or_else(|| TransitionError::InvalidEvent {
                state: state_id.clone(),
                event: event.to_string(),
                valid_events: sorted_events(&state.on_event),
            })
    }

    /// True when the current state has no outgoing events or is unknown.
    pub fn is_terminal(&self) -> bool {
        self.current_definition().is_none_or(State::is_terminal)
    }

    /// Events valid from the current state, sorted.
    pub fn available_events(&self) -> Vec<String> {
        self.current_definition()
            .map(|state| sorted_events(&state.on_event))
            .unwrap_or_default()
    }

    /// Independent copy of the live context.
    pub fn context(&self) -> Context {
        self.context.clone()
    }

    pub fn into_context(self) -> Context {
        self.context
    }

    /// Effective orchestration of the current state (`Internal` when unset
    /// or when the state is unknown).
    pub fn orchestration(&self) -> Orchestration {
        self.current_definition()
            .map(State::effective_orchestration)
            .unwrap_or(Orchestration::Internal)
    }

    /// Whether the model should be offered the transition tool this turn.
    pub fn accepts_model_transitions(&self) -> bool {
        !self.is_terminal() && self.orchestration() != Orchestration::External
    }

    /// Transient states are not written to the persistence layer.
    pub fn should_persist(&self) -> bool {
        !self.current_definition().is_some_and(State::is_transient)
    }

    pub fn metadata(&self, key: &str) -> Option<&serde_json::Value> {
        self.context.metadata.get(key)
    }

    pub fn set_metadata(
        &mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Option<serde_json::Value> {
        self.context.metadata.insert(key.into(), value.into())
    }
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("entry", &self.spec.entry)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::error::ErrorKind;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use serde_json::json;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn review_spec() -> Spec {
        Spec::new("draft")
            .with_state("draft", State::new("draft_prompt").with_event("Review", "review"))
            .with_state(
                "review",
                State::new("review_prompt")
                    .with_event("Revise", "draft")
                    .with_event("Approve", "done"),
            )
            .with_state("done", State::new("done_prompt"))
    }

    fn ticking_clock() -> impl Fn() -> DateTime<Utc> + Send + Sync + 'static {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let tick = AtomicI64::new(0);
        move || base + Duration::seconds(tick.fetch_add(1, Ordering::SeqCst))
    }

    #[test]
    fn starts_at_entry() {
        let machine = StateMachine::new(review_spec());

        assert_eq!(machine.current_state(), "draft");
        assert_eq!(machine.current_prompt_task(), "draft_prompt");
        assert_eq!(machine.available_events(), vec!["Review"]);
        assert!(!machine.is_terminal());
    }

    #[test]
    fn declared_event_moves_to_target_and_records_history() {
        let mut machine = StateMachine::new(review_spec());

        let transition = machine.process_event("Review").unwrap().clone();

        assert_eq!(transition.from, "draft");
        assert_eq!(transition.to, "review");
        assert_eq!(transition.event, "Review");
        assert_eq!(machine.current_state(), "review");
        assert_eq!(machine.context().transition_count(), 1);
    }

    #[test]
    fn undefined_event_leaves_context_untouched() {
        let mut machine = StateMachine::new(review_spec());
        machine.process_event("Review").unwrap();
        let before = machine.context();

        let err = machine.process_event("Ship").unwrap_err();

        assert_eq!(
            err,
            TransitionError::InvalidEvent {
                state: "review".to_string(),
                event: "Ship".to_string(),
                valid_events: vec!["Approve".to_string(), "Revise".to_string()],
            }
        );
        assert_eq!(machine.context(), before);
    }

    #[test]
    fn terminal_state_rejects_any_event() {
        let mut machine = StateMachine::new(review_spec());
        machine.process_event("Review").unwrap();
        machine.process_event("Approve").unwrap();
        let before = machine.context();

        for event in ["Review", "Approve", "", "anything"] {
            let err = machine.process_event(event).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TerminalState);
        }
        assert_eq!(machine.context(), before);
    }

    #[test]
    fn unknown_current_state_is_terminal_and_rejects_events() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut machine = StateMachine::from_context(review_spec(), Context::new("ghost", t0));

        assert!(machine.is_terminal());
        assert!(machine.available_events().is_empty());
        assert_eq!(machine.current_prompt_task(), "");

        let err = machine.process_event("Review").unwrap_err();
        assert!(matches!(err, TransitionError::UndefinedState { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidEvent);
        assert_eq!(machine.current_state(), "ghost");
        assert_eq!(machine.context().transition_count(), 0);
    }

    #[test]
    fn timestamps_come_from_injected_clock() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut machine = StateMachine::builder(review_spec())
            .clock(ticking_clock())
            .build();

        machine.process_event("Review").unwrap();
        machine.process_event("Revise").unwrap();

        let ctx = machine.context();
        assert_eq!(ctx.started_at, base);
        assert_eq!(
            ctx.history.transitions()[0].timestamp,
            base + Duration::seconds(1)
        );
        assert_eq!(ctx.updated_at, base + Duration::seconds(2));
    }

    #[test]
    fn snapshot_mutation_does_not_leak_into_machine() {
        let mut machine = StateMachine::new(review_spec());
        machine.set_metadata("ticket", 42);

        let mut snapshot = machine.context();
        snapshot.current_state = "done".to_string();
        snapshot.metadata.insert("ticket".to_string(), json!(0));
        snapshot.history = Default::default();

        assert_eq!(machine.current_state(), "draft");
        assert_eq!(machine.metadata("ticket"), Some(&json!(42)));
        assert!(machine.process_event("Review").is_ok());
    }

    #[test]
    fn resumed_machine_continues_history() {
        let mut original = StateMachine::new(review_spec());
        original.process_event("Review").unwrap();
        let snapshot = original.context();

        let mut resumed = StateMachine::from_context(review_spec(), snapshot.clone());

        assert_eq!(resumed.current_state(), original.current_state());
        assert_eq!(resumed.current_prompt_task(), original.current_prompt_task());
        assert_eq!(resumed.available_events(), original.available_events());

        resumed.process_event("Approve").unwrap();
        let ctx = resumed.into_context();
        assert_eq!(ctx.transition_count(), snapshot.transition_count() + 1);
        assert_eq!(ctx.history.events(), vec!["Review", "Approve"]);
    }

    #[test]
    fn orchestration_and_persistence_hints() {
        let spec = Spec::new("a")
            .with_state(
                "a",
                State::new("p")
                    .with_orchestration("external")
                    .with_persistence("transient")
                    .with_event("Next", "b"),
            )
            .with_state("b", State::new("p").with_event("Next", "c"))
            .with_state("c", State::new("p"));
        let mut machine = StateMachine::new(spec);

        assert_eq!(machine.orchestration(), Orchestration::External);
        assert!(!machine.accepts_model_transitions());
        assert!(!machine.should_persist());

        machine.process_event("Next").unwrap();
        assert_eq!(machine.orchestration(), Orchestration::Internal);
        assert!(machine.accepts_model_transitions());
        assert!(machine.should_persist());

        machine.process_event("Next").unwrap();
        assert!(!machine.accepts_model_transitions());
    }

    #[test]
    fn available_events_match_tool_enum() {
        let mut machine = StateMachine::new(review_spec());
        machine.process_event("Review").unwrap();
        let spec = review_spec();
        let review = &spec.states["review"];

        assert_eq!(machine.available_events(), sorted_events(&review.on_event));

        let TransitionError::InvalidEvent { valid_events, .. } =
            machine.process_event("Ship").unwrap_err()
        else {
            panic!("expected InvalidEvent");
        };
        assert_eq!(valid_events, machine.available_events());
    }

    #[test]
    fn debug_output_omits_clock() {
        let machine = StateMachine::new(review_spec());
        let rendered = format!("{machine:?}");
        assert!(rendered.contains("StateMachine"));
        assert!(rendered.contains("draft"));
    }
}
