//! CPU core.
//!
//! This module contains everything the pipeline engine reads or writes. It includes:
//! 1. **Architectural State:** Flags and the sparse data memory.
//! 2. **CPU State:** The per-cycle snapshot threaded between `advance` calls.
//! 3. **Pipeline:** Control signals, stage latches, stage logic, and the engine.
//! 4. **Execution Units:** The ALU and the branch resolution unit.

/// Architectural state (flags, data memory).
pub mod arch;

/// Per-cycle CPU state snapshot.
pub mod cpu;

/// Five-stage pipeline (signals, latches, stages, engine).
pub mod pipeline;

/// Functional units used by the execute stages (ALU, BRU).
pub mod units;

pub use cpu::CpuState;
