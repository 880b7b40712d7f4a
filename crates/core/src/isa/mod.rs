//! Instruction Set Architecture.
//!
//! This module defines the supported instruction subset. It provides:
//! 1. **Opcodes:** The fixed mnemonic set and its operand families.
//! 2. **Operands:** Register, immediate, and `[Rn]` address syntax.
//! 3. **Instructions:** The immutable record produced by the assembler.
//! 4. **Encoding:** An illustrative bit string for display.

/// Illustrative (non-ARM) display encoding.
pub mod encode;

/// Assembled instruction record.
pub mod instruction;

/// Opcode set and operand families.
pub mod opcode;

/// Operand syntax and parsing.
pub mod operand;

pub use instruction::{Instruction, InstructionId};
pub use opcode::{OpFamily, Opcode};
pub use operand::Operand;
