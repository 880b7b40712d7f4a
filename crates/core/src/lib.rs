//! ARM-like five-stage pipeline simulator library.
//!
//! This crate implements a teaching simulator for a small ARM-like instruction subset with the following:
//! 1. **Assembler:** Two-pass parsing of assembly text into instructions plus diagnostics, with label resolution.
//! 2. **Pipeline:** A pure `advance` function that moves one resident instruction through
//!    Fetch, Decode, Execute, Memory, and WriteBack, one stage per clock cycle.
//! 3. **ISA:** Opcodes, register names, operand syntax, and control-signal derivation.
//! 4. **Simulation:** A caller-side session with history, statistics, and an injected program store.
//! 5. **Configuration:** Reset values and assembler/session policies, loadable from JSON.

/// Common types and constants (registers, error types, word size).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (architectural state, pipeline, execution units).
pub mod core;
/// Instruction set (opcodes, operands, instruction record, display encoding).
pub mod isa;
/// Two-pass assembler (lexer, label table, instruction builder).
pub mod asm;
/// Caller-side session and program storage interface.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Assembler entry point; see [`asm::parse`].
pub use crate::asm::{AssemblyResult, parse};
/// Register names and the register file.
pub use crate::common::{Register, RegisterFile};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Architectural and pipeline state threaded between cycles.
pub use crate::core::CpuState;
/// Pipeline engine entry point; see [`core::pipeline::engine::advance`].
pub use crate::core::pipeline::engine::advance;
/// Run-loop owner; holds program text, CPU state, and history.
pub use crate::sim::Session;
