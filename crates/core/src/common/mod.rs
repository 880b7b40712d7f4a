//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by the assembler and the pipeline. It includes:
//! 1. **Constants:** Word size, comment and label markers, reset values.
//! 2. **Error Handling:** Assembler diagnostics and pipeline failure types.
//! 3. **Register Management:** Architectural register names and the register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for the assembler and pipeline engine.
pub mod error;

/// Register names and register file implementation.
pub mod reg;

pub use constants::WORD_SIZE;
pub use error::{AsmError, PipelineError};
pub use reg::{Register, RegisterFile};
