//! Flowmind: an event-driven workflow engine for model-driven conversations
//!
//! A workflow is a declarative [`Spec`]: named states, each with a prompt task
//! and a table of events leading to other states. A [`StateMachine`] walks one
//! run of that workflow, recording every transition in a serializable
//! [`Context`] that can be persisted and resumed later.
//!
//! # Core Concepts
//!
//! - **Spec**: Static workflow definition, checked ahead of time by [`validate`]
//! - **StateMachine**: Applies events to a run and rejects illegal ones
//! - **Context**: Current state, ordered history, and caller metadata
//! - **Transition tool**: Descriptor that lets the model pick the next event
//!
//! # Example
//!
//! ```rust
//! use flowmind::core::{Spec, State};
//! use flowmind::tool::TransitionCall;
//! use flowmind::{validate, StateMachine};
//!
//! let spec = Spec::new("draft")
//!     .with_state("draft", State::new("draft_prompt").with_event("Review", "review"))
//!     .with_state(
//!         "review",
//!         State::new("review_prompt")
//!             .with_event("Approve", "done")
//!             .with_event("Revise", "draft"),
//!     )
//!     .with_state("done", State::new("done_prompt"));
//!
//! let report = validate(&spec, &["draft_prompt", "review_prompt", "done_prompt"]);
//! assert!(report.is_valid());
//!
//! let mut machine = StateMachine::new(spec);
//! machine.process_event("Review").unwrap();
//!
//! let call = TransitionCall::from_arguments(r#"{"event":"Approve","context":"lgtm"}"#).unwrap();
//! call.apply(&mut machine).unwrap();
//! assert!(machine.is_terminal());
//! ```

pub mod checkpoint;
pub mod core;
pub mod machine;
pub mod tool;
pub mod validation;

// Re-export commonly used types
pub use checkpoint::{CheckpointError, ContextCheckpoint};
pub use core::{Context, Spec, State, StateTransition, TransitionHistory};
pub use machine::{Clock, ErrorKind, StateMachine, StateMachineBuilder, TransitionError};
pub use validation::{validate, PromptCatalog, ValidationResult};
