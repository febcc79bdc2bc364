//! Core workflow data model.
//!
//! This module contains the plain data the engine operates on:
//! - The declarative [`Spec`] and its [`State`] nodes
//! - The append-only [`TransitionHistory`]
//! - The serializable run [`Context`]
//!
//! Nothing in this module performs I/O.

mod context;
mod history;
mod spec;

pub use context::Context;
pub use history::{StateTransition, TransitionHistory};
pub use spec::{Orchestration, Persistence, Spec, State, SPEC_VERSION};
