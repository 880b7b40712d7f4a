//! Functional units.
//!
//! This module contains the execution units used by the pipeline stages:
//! 1. **ALU:** Wrapping 32-bit add, subtract, and move.
//! 2. **BRU:** Branch condition evaluation against the flags.

/// Arithmetic logic unit.
pub mod alu;

/// Branch resolution unit.
pub mod bru;

pub use alu::Alu;
pub use bru::Bru;
