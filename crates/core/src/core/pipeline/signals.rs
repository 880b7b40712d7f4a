//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution. It performs:
//! 1. **Operation Classification:** Selects the ALU operation.
//! 2. **Operand Selection:** Names the preferred source for the ALU second operand.
//! 3. **Datapath Control:** Register write, memory read/write, branch, and memory-to-register.
//!
//! Signals are a pure function of the opcode; Decode recomputes them every time
//! an instruction enters the stage.

use serde::{Deserialize, Serialize};

use crate::isa::Opcode;

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AluOp {
    /// Integer addition. Also used as the no-op for memory and branch instructions.
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Pass the second operand through.
    Mov,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AluSrc {
    /// Use the second source register value.
    #[default]
    Reg,

    /// Use the decoded immediate value.
    Imm,
}

/// Control signals for pipeline stage execution.
///
/// Generated in Decode and carried with the instruction through the remaining stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSignals {
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Enable memory read operation (load).
    pub mem_read: bool,
    /// Enable memory write operation (store).
    pub mem_write: bool,
    /// Instruction is a branch.
    pub branch: bool,
    /// ALU operation to perform.
    pub alu_op: AluOp,
    /// Preferred source for ALU operand B.
    pub alu_src: AluSrc,
    /// Register write takes the loaded value rather than the ALU result.
    pub mem_to_reg: bool,
}

impl ControlSignals {
    /// Derives the control signals for an opcode.
    ///
    /// # Examples
    ///
    /// ```
    /// use armpipe_core::core::pipeline::signals::{AluOp, AluSrc, ControlSignals};
    /// use armpipe_core::isa::Opcode;
    ///
    /// let ldr = ControlSignals::for_opcode(Opcode::Ldr);
    /// assert!(ldr.reg_write && ldr.mem_read && ldr.mem_to_reg);
    /// assert_eq!(ldr.alu_op, AluOp::Add);
    ///
    /// let mov = ControlSignals::for_opcode(Opcode::Mov);
    /// assert_eq!(mov.alu_src, AluSrc::Imm);
    /// ```
    pub fn for_opcode(opcode: Opcode) -> Self {
        let mut c = Self::default();
        match opcode {
            Opcode::Add => {
                c.reg_write = true;
                c.alu_op = AluOp::Add;
            }
            Opcode::Sub => {
                c.reg_write = true;
                c.alu_op = AluOp::Sub;
            }
            Opcode::Mov => {
                c.reg_write = true;
                c.alu_op = AluOp::Mov;
                c.alu_src = AluSrc::Imm;
            }
            Opcode::Cmp => {
                c.alu_op = AluOp::Sub;
            }
            Opcode::Ldr => {
                c.reg_write = true;
                c.mem_read = true;
                c.mem_to_reg = true;
            }
            Opcode::Str => {
                c.mem_write = true;
            }
            Opcode::B | Opcode::Beq | Opcode::Bne => {
                c.branch = true;
            }
        }
        c
    }

    /// True when the instruction touches data memory.
    pub const fn accesses_memory(&self) -> bool {
        self.mem_read || self.mem_write
    }
}
