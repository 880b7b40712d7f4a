//! Branch Resolution Unit (BRU).
//!
//! Decides whether a branch is taken. Targets are absolute byte addresses
//! taken from the decoded immediate; no offset arithmetic happens here.

use crate::core::arch::Flags;
use crate::isa::Opcode;

/// Branch condition evaluator.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Returns whether `opcode` transfers control given the current flags.
    ///
    /// `B` is always taken, `BEQ` when Z is set, `BNE` when Z is clear.
    /// Non-branch opcodes are never taken.
    pub const fn taken(opcode: Opcode, flags: &Flags) -> bool {
        match opcode {
            Opcode::B => true,
            Opcode::Beq => flags.z,
            Opcode::Bne => !flags.z,
            _ => false,
        }
    }
}
