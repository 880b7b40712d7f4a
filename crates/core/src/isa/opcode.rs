//! Supported opcodes.
//!
//! Every mnemonic belongs to one operand family, which fixes its operand count
//! and how Decode maps operand positions onto source and destination registers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Instruction mnemonic.
///
/// Parsing is case-sensitive on the uppercase form; the assembler uppercases
/// the mnemonic token before parsing.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Opcode {
    /// `ADD Rd, Rn, Rm|#imm`
    Add,
    /// `SUB Rd, Rn, Rm|#imm`
    Sub,
    /// `MOV Rd, Rm|#imm`
    Mov,
    /// `LDR Rt, [Rn]`
    Ldr,
    /// `STR Rt, [Rn]`
    Str,
    /// `CMP Rn, Rm|#imm`
    Cmp,
    /// `B target`
    B,
    /// `BEQ target`, taken when Z is set.
    Beq,
    /// `BNE target`, taken when Z is clear.
    Bne,
}

/// Operand layout shared by a group of opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpFamily {
    /// `ADD`/`SUB`: destination, first source, register-or-immediate.
    Arithmetic,
    /// `MOV`/`CMP`: register, register-or-immediate.
    MoveCompare,
    /// `LDR`/`STR`: data register, `[address register]`.
    LoadStore,
    /// `B`/`BEQ`/`BNE`: absolute target address.
    Branch,
}

impl OpFamily {
    /// Number of operands an instruction of this family takes.
    pub const fn operand_count(self) -> usize {
        match self {
            Self::Arithmetic => 3,
            Self::MoveCompare | Self::LoadStore => 2,
            Self::Branch => 1,
        }
    }
}

impl Opcode {
    /// Parses an already-uppercased mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        mnemonic.parse().ok()
    }

    /// Operand family of this opcode.
    pub const fn family(self) -> OpFamily {
        match self {
            Self::Add | Self::Sub => OpFamily::Arithmetic,
            Self::Mov | Self::Cmp => OpFamily::MoveCompare,
            Self::Ldr | Self::Str => OpFamily::LoadStore,
            Self::B | Self::Beq | Self::Bne => OpFamily::Branch,
        }
    }

    /// Number of operands this opcode takes.
    pub const fn operand_count(self) -> usize {
        self.family().operand_count()
    }

    /// True for `B`, `BEQ`, and `BNE`.
    pub const fn is_branch(self) -> bool {
        matches!(self.family(), OpFamily::Branch)
    }
}
