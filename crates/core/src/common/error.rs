//! Assembler and pipeline error definitions.
//!
//! This module defines the error types of the two core components. It provides:
//! 1. **Assembler Diagnostics:** `AsmError`, reported as data alongside parsed instructions.
//! 2. **Pipeline Failures:** `PipelineError`, returned by a single `advance` call that
//!    met an instruction whose operands cannot be decoded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::isa::Opcode;

/// Reasons a source line fails to assemble.
///
/// Assembler errors never abort parsing; each one is attached to its line in a
/// [`ParseError`](crate::asm::ParseError) and parsing continues with the next line.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AsmError {
    /// The first token of the line is not a supported mnemonic.
    #[error("Unknown opcode: `{mnemonic}`")]
    UnknownOpcode {
        /// Mnemonic as written (uppercased).
        mnemonic: String,
    },

    /// The instruction has the wrong number of operands.
    #[error("{opcode} expects {expected} operand(s), found {found}")]
    OperandCount {
        /// Instruction opcode.
        opcode: Opcode,
        /// Operand count required by the opcode.
        expected: usize,
        /// Operand count present on the line.
        found: usize,
    },

    /// A register was required but the token is not a register name.
    #[error("Invalid register: `{token}`")]
    InvalidRegister {
        /// Offending operand token.
        token: String,
    },

    /// An immediate was required but the token is not a 32-bit integer.
    #[error("Invalid immediate: `{token}`")]
    InvalidImmediate {
        /// Offending operand token.
        token: String,
    },

    /// A `[Rn]` address operand was required.
    #[error("Invalid address operand: `{token}` (expected `[Rn]`)")]
    InvalidAddress {
        /// Offending operand token.
        token: String,
    },

    /// The operand looks like a label reference but no such label exists.
    #[error("Undefined label: `{label}`")]
    UndefinedLabel {
        /// Referenced label name.
        label: String,
    },

    /// The label was already defined on an earlier line.
    #[error("Re-defined label: `{label}` (first defined on line {first_line})")]
    DuplicateLabel {
        /// Label name.
        label: String,
        /// 1-based line of the definition that is kept.
        first_line: usize,
    },

    /// A branch target is negative or not a multiple of the word size.
    #[error("Branch target {target} is not a word-aligned instruction address")]
    MisalignedTarget {
        /// Target byte address as written.
        target: i64,
    },
}

/// Failure of a single pipeline cycle.
///
/// The engine never modifies the state it was given, so on error the caller
/// still holds the last committed state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// An operand of the instruction in Fetch could not be decoded.
    #[error("line {line}: invalid operand `{operand}` for {opcode}: {reason}")]
    InvalidOperand {
        /// 1-based source line of the instruction.
        line: usize,
        /// Instruction opcode.
        opcode: Opcode,
        /// Offending operand token.
        operand: String,
        /// Why the operand was rejected.
        reason: AsmError,
    },

    /// The instruction in Fetch has fewer operands than its opcode requires.
    #[error("line {line}: {opcode} is missing operand {position}")]
    MissingOperand {
        /// 1-based source line of the instruction.
        line: usize,
        /// Instruction opcode.
        opcode: Opcode,
        /// Zero-based position of the missing operand.
        position: usize,
    },
}
