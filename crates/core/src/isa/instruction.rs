//! Assembled instruction record.
//!
//! An `Instruction` is created once per assembler run and never mutated.
//! Pipeline stages hold clones so that every `CpuState` snapshot is
//! self-contained.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::encode;
use super::opcode::Opcode;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique instruction identifier.
///
/// Two assembler runs over the same text produce different identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionId(pub u64);

impl InstructionId {
    /// Allocates a fresh identifier.
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inst-{}", self.0)
    }
}

/// One assembled instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    /// Unique identifier.
    pub id: InstructionId,
    /// Source text with comment and label prefix removed.
    pub raw: String,
    /// Mnemonic.
    pub opcode: Opcode,
    /// Operand tokens as written; label references are rewritten to `#<offset>`.
    pub operands: Vec<String>,
    /// Illustrative bit string; not an ARM encoding.
    pub binary: String,
    /// 1-based source line.
    pub line: usize,
}

impl Instruction {
    /// Builds an instruction with a fresh identifier and display encoding.
    ///
    /// # Arguments
    ///
    /// * `opcode`   - Mnemonic.
    /// * `operands` - Resolved operand tokens.
    /// * `raw`      - Source text after comment and label stripping.
    /// * `line`     - 1-based source line.
    pub fn new(opcode: Opcode, operands: Vec<String>, raw: impl Into<String>, line: usize) -> Self {
        let binary = encode::display_bits(opcode, &operands);
        Self {
            id: InstructionId::next(),
            raw: raw.into(),
            opcode,
            operands,
            binary,
            line,
        }
    }

    /// Operand token at `position`, if present.
    pub fn operand(&self, position: usize) -> Option<&str> {
        self.operands.get(position).map(String::as_str)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
