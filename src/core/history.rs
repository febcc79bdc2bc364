//! State transition history tracking.
//!
//! History is append-only: transitions are recorded in the order they were
//! applied and never rewritten afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied event.
///
/// # Example
///
/// ```rust
/// use flowmind::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "draft".to_string(),
///     to: "review".to_string(),
///     event: "Submit".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.event, "Submit");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: String,
    /// The state being transitioned to
    pub to: String,
    /// The event that triggered the transition
    pub event: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, append-only sequence of transitions.
///
/// Serializes as a plain JSON array.
///
/// # Example
///
/// ```rust
/// use flowmind::core::{StateTransition, TransitionHistory};
/// use chrono::Utc;
///
/// let mut history = TransitionHistory::new();
/// history.record(StateTransition {
///     from: "start".to_string(),
///     to: "middle".to_string(),
///     event: "Next".to_string(),
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: "middle".to_string(),
///     to: "end".to_string(),
///     event: "Finish".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec!["start", "middle", "end"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionHistory {
    transitions: Vec<StateTransition>,
}

impl TransitionHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition to the end of the history.
    pub fn record(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    /// States visited in order: the first `from`, then each `to`.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_str());
        }
        path.extend(self.transitions.iter().map(|t| t.to.as_str()));
        path
    }

    /// Events applied in order.
    pub fn events(&self) -> Vec<&str> {
        self.transitions.iter().map(|t| t.event.as_str()).collect()
    }

    /// Time between the first and last transition.
    ///
    /// Returns `None` for an empty history or when timestamps run backwards.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StateTransition> {
        self.transitions.iter()
    }
}

impl<'a> IntoIterator for &'a TransitionHistory {
    type Item = &'a StateTransition;
    type IntoIter = std::slice::Iter<'a, StateTransition>;

    fn into_iter(self) -> Self::IntoIter {
        self.transitions.iter()
    }
}

impl From<Vec<StateTransition>> for TransitionHistory {
    fn from(transitions: Vec<StateTransition>) -> Self {
        Self { transitions }
    }
}
