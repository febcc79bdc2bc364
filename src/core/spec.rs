//! Declarative workflow definition.
//!
//! A [`Spec`] is the immutable description of a workflow: which states exist,
//! where execution starts, and which events move between states. Specs are
//! produced by an external loader and shared read-only by every machine that
//! runs them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The only spec format version this crate understands.
pub const SPEC_VERSION: i64 = 1;

/// Persistence hint for a state.
///
/// Unrecognised strings are kept as [`Persistence::Unknown`] so that the
/// validator can report them instead of the loader rejecting the document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Persistence {
    #[default]
    Unset,
    Transient,
    Persistent,
    Unknown(String),
}

impl Persistence {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::Transient => "transient",
            Self::Persistent => "persistent",
            Self::Unknown(value) => value,
        }
    }
}

impl From<String> for Persistence {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => Self::Unset,
            "transient" => Self::Transient,
            "persistent" => Self::Persistent,
            _ => Self::Unknown(value),
        }
    }
}

impl From<Option<String>> for Persistence {
    fn from(value: Option<String>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

impl From<&str> for Persistence {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Persistence> for String {
    fn from(value: Persistence) -> Self {
        value.as_str().to_string()
    }
}

/// Who drives transitions out of a state.
///
/// `Internal` means the model requests transitions through the transition
/// tool; `External` means an outside caller (an HTTP handler, a queue
/// consumer) does; `Hybrid` allows both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Orchestration {
    #[default]
    Unset,
    Internal,
    External,
    Hybrid,
    Unknown(String),
}

impl Orchestration {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::Internal => "internal",
            Self::External => "external",
            Self::Hybrid => "hybrid",
            Self::Unknown(value) => value,
        }
    }
}

impl From<String> for Orchestration {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => Self::Unset,
            "internal" => Self::Internal,
            "external" => Self::External,
            "hybrid" => Self::Hybrid,
            _ => Self::Unknown(value),
        }
    }
}

impl From<Option<String>> for Orchestration {
    fn from(value: Option<String>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

impl From<&str> for Orchestration {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Orchestration> for String {
    fn from(value: Orchestration) -> Self {
        value.as_str().to_string()
    }
}

/// One node of the workflow graph.
///
/// # Example
///
/// ```rust
/// use flowmind::core::State;
///
/// let review = State::new("review_prompt")
///     .with_event("Approve", "done")
///     .with_event("Revise", "draft");
///
/// assert!(!review.is_terminal());
/// assert!(State::new("done_prompt").is_terminal());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Identifier into the external prompt catalog
    pub prompt_task: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Event name -> target state id. Empty marks a terminal state.
    #[serde(default)]
    pub on_event: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Persistence::is_unset")]
    pub persistence: Persistence,

    #[serde(default, skip_serializing_if = "Orchestration::is_unset")]
    pub orchestration: Orchestration,
}

impl State {
    pub fn new(prompt_task: impl Into<String>) -> Self {
        Self {
            prompt_task: prompt_task.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_event(mut self, event: impl Into<String>, target: impl Into<String>) -> Self {
        self.on_event.insert(event.into(), target.into());
        self
    }

    pub fn with_persistence(mut self, persistence: impl Into<Persistence>) -> Self {
        self.persistence = persistence.into();
        self
    }

    pub fn with_orchestration(mut self, orchestration: impl Into<Orchestration>) -> Self {
        self.orchestration = orchestration.into();
        self
    }

    /// A state with no outgoing events ends the workflow.
    pub fn is_terminal(&self) -> bool {
        self.on_event.is_empty()
    }

    /// Outgoing event names in sorted order.
    pub fn events(&self) -> Vec<&str> {
        let mut events: Vec<&str> = self.on_event.keys().map(String::as_str).collect();
        events.sort_unstable();
        events
    }

    pub fn is_transient(&self) -> bool {
        self.persistence == Persistence::Transient
    }

    /// Orchestration mode with `Unset` resolved to `Internal`.
    pub fn effective_orchestration(&self) -> Orchestration {
        match &self.orchestration {
            Orchestration::Unset => Orchestration::Internal,
            other => other.clone(),
        }
    }
}

/// Immutable workflow definition.
///
/// # Example
///
/// ```rust
/// use flowmind::core::{Spec, State};
///
/// let spec = Spec::new("draft")
///     .with_state("draft", State::new("draft_prompt").with_event("Submit", "done"))
///     .with_state("done", State::new("done_prompt"));
///
/// assert_eq!(spec.entry, "draft");
/// assert_eq!(spec.state_ids(), vec!["done", "draft"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    pub version: i64,
    pub entry: String,
    #[serde(default)]
    pub states: HashMap<String, State>,
    /// Opaque engine configuration, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<serde_json::Value>,
}

impl Spec {
    /// Create an empty spec at the current format version.
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            version: SPEC_VERSION,
            entry: entry.into(),
            states: HashMap::new(),
            engine: None,
        }
    }

    pub fn with_state(mut self, id: impl Into<String>, state: State) -> Self {
        self.states.insert(id.into(), state);
        self
    }

    pub fn with_engine(mut self, engine: serde_json::Value) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.get(id)
    }

    /// State identifiers in sorted order.
    pub fn state_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.states.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// States paired with their identifiers, sorted by identifier.
    pub fn sorted_states(&self) -> Vec<(&str, &State)> {
        let mut states: Vec<(&str, &State)> = self
            .states
            .iter()
            .map(|(id, state)| (id.as_str(), state))
            .collect();
        states.sort_unstable_by_key(|(id, _)| *id);
        states
    }

    /// Target of the first state (in sorted id order) that declares `event`.
    pub fn target_of(&self, event: &str) -> Option<&str> {
        self.sorted_states()
            .into_iter()
            .find_map(|(_, state)| state.on_event.get(event))
            .map(String::as_str)
    }
}
