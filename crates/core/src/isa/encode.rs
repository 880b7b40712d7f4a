//! Illustrative instruction encoding.
//!
//! Produces a 32-character bit string for the datapath display. The layout
//! borrows the shape of an ARM data-processing word but is not bit-accurate:
//!
//! ```text
//! data / memory:  cond(4) | opcode(4) | I(1) | Rd(4) | Rn(4) | operand2(15)
//! branch:         cond(4) | opcode(4) | target(24)
//! ```
//!
//! Operand fields that cannot be parsed encode as zeros; the assembler reports
//! those lines as errors before they ever reach the display.

use super::opcode::{OpFamily, Opcode};
use super::operand::{self, Operand};

/// Condition field for "always".
const COND_AL: u32 = 0b1110;

fn reg_bits(token: Option<&String>) -> u32 {
    token
        .and_then(|t| operand::parse_register(operand::strip_address(t)).ok())
        .map_or(0, |r| r.index() as u32)
}

fn operand2_bits(token: Option<&String>) -> (u32, u32) {
    match token.map(|t| operand::parse_register_or_immediate(t)) {
        Some(Ok(Operand::Register(r))) => (0, r.index() as u32),
        Some(Ok(Operand::Immediate(v))) => (1, (v as u32) & 0x7FFF),
        _ => (0, 0),
    }
}

/// Renders the display encoding of an instruction.
pub fn display_bits(opcode: Opcode, operands: &[String]) -> String {
    let op = opcode as u32;
    let word = match opcode.family() {
        OpFamily::Branch => {
            let target = operands
                .first()
                .and_then(|t| operand::parse_immediate(t).ok())
                .map_or(0, |v| (v as u32) & 0x00FF_FFFF);
            COND_AL << 28 | op << 24 | target
        }
        OpFamily::Arithmetic => {
            let (imm, op2) = operand2_bits(operands.get(2));
            COND_AL << 28
                | op << 24
                | imm << 23
                | reg_bits(operands.first()) << 19
                | reg_bits(operands.get(1)) << 15
                | op2
        }
        OpFamily::MoveCompare => {
            let (imm, op2) = operand2_bits(operands.get(1));
            COND_AL << 28 | op << 24 | imm << 23 | reg_bits(operands.first()) << 19 | op2
        }
        OpFamily::LoadStore => {
            COND_AL << 28
                | op << 24
                | reg_bits(operands.first()) << 19
                | reg_bits(operands.get(1)) << 15
        }
    };
    format!("{word:032b}")
}
