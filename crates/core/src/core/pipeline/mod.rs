//! Instruction pipeline implementation.
//!
//! This module contains the five-stage pipeline. It includes the following components:
//! 1. **Signals:** Control signals generated during instruction decoding.
//! 2. **Latches:** Per-stage contents and the five-stage pipeline state.
//! 3. **Stages:** The work done as the resident instruction moves between stages.
//! 4. **Engine:** The `advance` function that runs exactly one transition per cycle.
//!
//! Only one instruction is ever in flight. It moves one stage per cycle, and the
//! next instruction is fetched on the cycle after the previous one commits.

/// The single-cycle `advance` function.
pub mod engine;

/// Stage contents and pipeline state.
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

pub use engine::advance;
pub use latches::{DecodedOperands, PipelineState, StageContent, StageName};
pub use signals::{AluOp, AluSrc, ControlSignals};
