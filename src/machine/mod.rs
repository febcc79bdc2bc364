//! The runtime workflow engine.
//!
//! A [`StateMachine`] applies named events to a [`Context`](crate::core::Context)
//! according to a [`Spec`](crate::core::Spec). Machines are built fresh (at the
//! spec's entry state) or resumed from a persisted context, optionally with an
//! injected clock for reproducible timestamps.

mod builder;
mod error;
mod state_machine;

pub use builder::{Clock, StateMachineBuilder};
pub use error::{ErrorKind, TransitionError};
pub use state_machine::StateMachine;
