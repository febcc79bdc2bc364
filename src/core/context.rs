//! Serializable execution record of one workflow run.

use super::history::{StateTransition, TransitionHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The mutable record of one in-progress workflow run.
///
/// A context is owned by exactly one [`StateMachine`](crate::StateMachine).
/// Callers only ever see clones of it, so a snapshot handed to a persistence
/// layer can be mutated or dropped freely. `Clone` copies the history and
/// metadata element by element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub current_state: String,
    #[serde(default)]
    pub history: TransitionHistory,
    /// Caller-owned key/value data carried alongside the run
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Context {
    /// Fresh context positioned at `entry`.
    pub fn new(entry: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            current_state: entry.into(),
            history: TransitionHistory::new(),
            metadata: HashMap::new(),
            started_at: now,
            updated_at: now,
        }
    }

    /// Append a transition and move to its target.
    pub(crate) fn apply(&mut self, transition: StateTransition) -> &StateTransition {
        let index = self.history.len();
        self.current_state = transition.to.clone();
        self.updated_at = transition.timestamp;
        self.history.record(transition);
        &self.history.transitions()[index]
    }

    pub fn transition_count(&self) -> usize {
        self.history.len()
    }

    pub fn last_transition(&self) -> Option<&StateTransition> {
        self.history.last()
    }
}
