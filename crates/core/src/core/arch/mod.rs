//! Architectural state.
//!
//! This module holds the architecturally visible state other than registers:
//! 1. **Flags:** The N, Z, C, V condition flags.
//! 2. **Memory:** The sparse word-addressed data memory.

/// Condition flags.
pub mod flags;

/// Sparse data memory.
pub mod memory;

pub use flags::Flags;
pub use memory::Memory;
