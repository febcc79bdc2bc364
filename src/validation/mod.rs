//! Static validation of workflow specs.
//!
//! Validation accumulates every defect in one pass instead of stopping at the
//! first one, using Stillwater's `Validation` type for the blocking rules.
//! The only early exit is an empty state table, after which no other rule can
//! say anything meaningful.
//!
//! # Example
//!
//! ```rust
//! use flowmind::core::{Spec, State};
//! use flowmind::validation::validate;
//!
//! let spec = Spec::new("draft")
//!     .with_state("draft", State::new("draft_prompt").with_event("Submit", "done"))
//!     .with_state("done", State::new("done_prompt"));
//!
//! let result = validate(&spec, &["draft_prompt", "done_prompt"]);
//! assert!(result.is_valid());
//! assert!(result.warnings.is_empty());
//! ```

mod catalog;
mod cycles;
mod issues;

pub use catalog::PromptCatalog;
pub use issues::{ValidationError, ValidationWarning};

use crate::core::{Orchestration, Persistence, Spec, State, SPEC_VERSION};
use regex::Regex;
use std::sync::LazyLock;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ValidationError>>;

// Literal pattern, exercised by `pascal_case_pattern`.
static EVENT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("event name pattern compiles")
});

/// Outcome of validating a spec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Blocking defects, in rule order
    pub errors: Vec<ValidationError>,
    /// Advisory findings, in rule order
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// True when no blocking errors were found. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Check a spec's structure against a catalog of known prompt tasks.
pub fn validate<C>(spec: &Spec, prompts: &C) -> ValidationResult
where
    C: PromptCatalog + ?Sized,
{
    let mut checks: Vec<Check> = Vec::new();

    checks.push(require(spec.version == SPEC_VERSION, || {
        ValidationError::UnsupportedVersion {
            found: spec.version,
        }
    }));

    if spec.states.is_empty() {
        checks.push(Validation::fail(ValidationError::NoStates));
        return finish(checks, Vec::new());
    }

    match spec.states.get(&spec.entry) {
        Some(entry) => checks.push(require(has_known_prompt(entry, prompts), || {
            ValidationError::UnknownEntryPromptTask {
                state: spec.entry.clone(),
                prompt_task: entry.prompt_task.clone(),
            }
        })),
        None => checks.push(Validation::fail(ValidationError::UnknownEntry {
            entry: spec.entry.clone(),
        })),
    }

    let states = spec.sorted_states();

    for &(id, state) in states.iter().filter(|(id, _)| *id != spec.entry) {
        checks.push(require(has_known_prompt(state, prompts), || {
            ValidationError::UnknownPromptTask {
                state: id.to_string(),
                prompt_task: state.prompt_task.clone(),
            }
        }));
    }

    let mut warnings = Vec::new();

    for &(id, state) in &states {
        for event in state.events() {
            let Some(target) = state.on_event.get(event) else {
                continue;
            };
            checks.push(require(spec.states.contains_key(target), || {
                ValidationError::UnknownTarget {
                    state: id.to_string(),
                    event: event.to_string(),
                    target: target.clone(),
                }
            }));

            if !is_pascal_case(event) {
                warnings.push(ValidationWarning::EventNotPascalCase {
                    state: id.to_string(),
                    event: event.to_string(),
                });
            }
        }
    }

    for &(id, state) in &states {
        if let Persistence::Unknown(value) = &state.persistence {
            checks.push(Validation::fail(ValidationError::InvalidPersistence {
                state: id.to_string(),
                value: value.clone(),
            }));
        }
    }

    for &(id, state) in &states {
        if let Orchestration::Unknown(value) = &state.orchestration {
            checks.push(Validation::fail(ValidationError::InvalidOrchestration {
                state: id.to_string(),
                value: value.clone(),
            }));
        }
    }

    warnings.extend(cycles::detect_cycles(spec));

    finish(checks, warnings)
}

impl Spec {
    /// Shorthand for [`validate`].
    pub fn validate<C>(&self, prompts: &C) -> ValidationResult
    where
        C: PromptCatalog + ?Sized,
    {
        validate(self, prompts)
    }
}

/// Entry and non-entry states are held to the same prompt rule.
fn has_known_prompt<C>(state: &State, prompts: &C) -> bool
where
    C: PromptCatalog + ?Sized,
{
    prompts.contains_prompt(&state.prompt_task)
}

fn is_pascal_case(event: &str) -> bool {
    EVENT_NAME.is_match(event)
}

fn require<F>(condition: bool, error: F) -> Check
where
    F: FnOnce() -> ValidationError,
{
    if condition {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}

fn finish(checks: Vec<Check>, warnings: Vec<ValidationWarning>) -> ValidationResult {
    let errors = match Validation::all_vec(checks).map(|_| ()) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    };

    tracing::debug!(
        errors = errors.len(),
        warnings = warnings.len(),
        "workflow spec validated"
    );

    ValidationResult { errors, warnings }
}
