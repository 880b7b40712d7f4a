//! Caller-side simulation support.
//!
//! This module holds what sits around the pure engine:
//! 1. **Session:** Owns program text, assembly output, the current CPU state,
//!    bounded history for undo, and run statistics.
//! 2. **Store:** The injected program storage interface and its in-memory implementation.

/// Run loop, history, and snapshot export.
pub mod session;

/// Program storage interface.
pub mod store;

use thiserror::Error;

use crate::common::PipelineError;

pub use session::{Session, Snapshot, StopReason};
pub use store::{MemoryStore, Program, ProgramId, ProgramPatch, ProgramStore, StoreError};

/// Session-level failures.
#[derive(Debug, Error)]
pub enum SimError {
    /// Stepping was refused because the current program did not assemble cleanly.
    #[error("Program has {count} assembly error(s); fix them before stepping")]
    ProgramHasErrors {
        /// Number of diagnostics.
        count: usize,
    },

    /// The engine failed on the current cycle.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The program store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// History could not be serialized.
    #[error("Failed to serialize history")]
    Serialize(#[from] serde_json::Error),
}
