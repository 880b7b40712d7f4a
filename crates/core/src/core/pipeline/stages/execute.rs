//! Execute (EX) Stage.
//!
//! This module covers the two transitions that run in the execute unit:
//! 1. **ALU Execute:** Decode → Execute. Computes the ALU result, sets the
//!    condition flags for `CMP`, and computes the data address for `LDR`/`STR`.
//! 2. **Branch Resolution:** Execute → Memory. Redirects the program counter
//!    when a branch is taken.

use crate::common::RegisterFile;
use crate::core::CpuState;
use crate::core::pipeline::latches::{DecodedOperands, StageContent, StageName};
use crate::core::pipeline::signals::AluSrc;
use crate::core::units::{Alu, Bru};
use crate::isa::Opcode;

/// Executes the ALU half of the execute stage.
///
/// Operand A is the first source register (0 when absent). Operand B is the
/// source named by `alu_src` when decode populated it, otherwise whichever of
/// the second register and the immediate is present, otherwise 0.
///
/// # Arguments
///
/// * `next`  - State being built for the next cycle
/// * `stage` - Contents of the Decode stage
pub fn execute_stage(next: &mut CpuState, stage: StageContent) {
    let decoded = stage.decoded.unwrap_or_default();
    let ctrl = stage.control_signals.unwrap_or_default();
    let opcode = stage.instruction.as_ref().map(|inst| inst.opcode);

    let a = decoded.src1.map_or(0, |r| next.registers.read(r));
    let b = operand_b(&decoded, ctrl.alu_src, &next.registers);
    let result = Alu::execute(ctrl.alu_op, a, b);

    if opcode == Some(Opcode::Cmp) {
        next.flags.set_nz(Alu::compare(a, b));
    }

    let memory_address = decoded
        .src2
        .filter(|_| ctrl.accesses_memory())
        .map(|r| next.registers.read(r) as u32);

    tracing::debug!(?opcode, a, b, result, ?memory_address, flags = %next.flags, "EX");

    next.pipeline.place(
        StageName::Execute,
        StageContent {
            result: Some(result),
            memory_address,
            ..stage
        },
    );
}

/// Resolves a branch at the end of the execute stage.
///
/// A taken branch sets the program counter to its decoded target; the target
/// is an absolute byte address. Non-branch instructions pass through.
///
/// # Arguments
///
/// * `next`  - State being built for the next cycle
/// * `stage` - Contents of the Execute stage
pub fn branch_stage(next: &mut CpuState, stage: StageContent) {
    if let Some(inst) = stage.instruction.as_ref() {
        let is_branch = stage.control_signals.is_some_and(|c| c.branch);
        if is_branch && Bru::taken(inst.opcode, &next.flags) {
            if let Some(target) = stage.decoded.and_then(|d| d.imm) {
                tracing::debug!(line = inst.line, from = next.pc, to = target, "EX  branch taken");
                next.pc = target as u32;
            }
        } else if is_branch {
            tracing::debug!(line = inst.line, flags = %next.flags, "EX  branch not taken");
        }
    }

    next.pipeline.place(StageName::Memory, stage);
}

fn operand_b(decoded: &DecodedOperands, src: AluSrc, regs: &RegisterFile) -> i32 {
    let reg = decoded.src2.map(|r| regs.read(r));
    let imm = decoded.imm;
    match src {
        AluSrc::Imm => imm.or(reg),
        AluSrc::Reg => reg.or(imm),
    }
    .unwrap_or(0)
}
