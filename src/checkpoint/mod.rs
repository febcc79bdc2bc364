//! Checkpoint and resume for workflow runs.
//!
//! A checkpoint wraps a [`Context`] in a versioned envelope so that a
//! persistence layer can store it under a run identifier and hand it back
//! later to resume the run, possibly in another process.
//!
//! # Example
//!
//! ```rust
//! use flowmind::checkpoint::ContextCheckpoint;
//! use flowmind::core::{Spec, State};
//! use flowmind::StateMachine;
//!
//! let spec = Spec::new("a")
//!     .with_state("a", State::new("p").with_event("Next", "b"))
//!     .with_state("b", State::new("p"));
//!
//! let mut machine = StateMachine::new(spec.clone());
//! machine.process_event("Next").unwrap();
//!
//! let json = machine.checkpoint().to_json().unwrap();
//! let restored = ContextCheckpoint::from_json(&json).unwrap();
//! let resumed = StateMachine::restore(spec, restored);
//! assert_eq!(resumed.current_state(), "b");
//! ```

use crate::core::{Context, Spec};
use crate::machine::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of one workflow run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContextCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub context: Context,
}

impl ContextCheckpoint {
    pub fn new(context: Context) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            context,
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        let json = serde_json::to_string(self)?;
        tracing::debug!(id = %self.id, bytes = json.len(), "checkpoint encoded");
        Ok(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode and check a checkpoint.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)?;
        checkpoint.check()?;
        tracing::debug!(
            id = %checkpoint.id,
            state = %checkpoint.context.current_state,
            transitions = checkpoint.context.transition_count(),
            "checkpoint decoded"
        );
        Ok(checkpoint)
    }

    fn check(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let ctx = &self.context;
        if ctx.current_state.is_empty() {
            return Err(CheckpointError::ValidationFailed(
                "current state is empty".to_string(),
            ));
        }

        if let Some(last) = ctx.last_transition() {
            if last.to != ctx.current_state {
                return Err(CheckpointError::ValidationFailed(format!(
                    "last transition ends in {:?} but current state is {:?}",
                    last.to, ctx.current_state
                )));
            }
        }

        Ok(())
    }
}

impl StateMachine {
    pub fn checkpoint(&self) -> ContextCheckpoint {
        ContextCheckpoint::new(self.context())
    }

    pub fn restore(spec: impl Into<Arc<Spec>>, checkpoint: ContextCheckpoint) -> Self {
        Self::from_context(spec, checkpoint.context)
    }
}
