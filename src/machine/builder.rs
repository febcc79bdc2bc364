//! Builder for constructing state machines.

use super::state_machine::StateMachine;
use crate::core::{Context, Spec};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Source of "now" for transition timestamps.
///
/// Only timestamps depend on it; transition logic never does.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub(crate) fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use flowmind::core::{Spec, State};
/// use flowmind::StateMachineBuilder;
/// use chrono::{TimeZone, Utc};
///
/// let spec = Spec::new("start")
///     .with_state("start", State::new("p").with_event("Finish", "end"))
///     .with_state("end", State::new("p"));
///
/// let fixed = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// let mut machine = StateMachineBuilder::new(spec)
///     .clock(move || fixed)
///     .build();
///
/// let transition = machine.process_event("Finish").unwrap();
/// assert_eq!(transition.timestamp, fixed);
/// ```
pub struct StateMachineBuilder {
    spec: Arc<Spec>,
    context: Option<Context>,
    clock: Option<Clock>,
}

impl StateMachineBuilder {
    pub fn new(spec: impl Into<Arc<Spec>>) -> Self {
        Self {
            spec: spec.into(),
            context: None,
            clock: None,
        }
    }

    /// Continue a previously persisted run instead of starting at the entry.
    pub fn resume(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Override the time source (defaults to the system clock).
    pub fn clock<F>(mut self, now: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Some(Arc::new(now));
        self
    }

    pub fn build(self) -> StateMachine {
        let clock = self.clock.unwrap_or_else(system_clock);
        let context = match self.context {
            Some(context) => context,
            None => Context::new(self.spec.entry.clone(), clock()),
        };
        StateMachine::from_parts(self.spec, context, clock)
    }
}
