//! Instruction Decode (ID) Stage.
//!
//! Derives control signals from the opcode and fills in the decoded operand
//! set. Operand positions map onto fields by opcode family:
//!
//! | family | dest | src1 | src2 / imm |
//! |---|---|---|---|
//! | `ADD`/`SUB` | op0 | op1 | op2 (register or immediate) |
//! | `MOV`/`CMP` | op0 | op0 | op1 (register or immediate) |
//! | `LDR`/`STR` | op0 | op0 | op1 with brackets stripped |
//! | `B`/`BEQ`/`BNE` | - | - | imm = op0 |

use crate::common::{AsmError, PipelineError, Register};
use crate::core::CpuState;
use crate::core::pipeline::latches::{DecodedOperands, StageContent, StageName};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::operand::{self, Operand};
use crate::isa::{Instruction, OpFamily};

/// Executes the decode stage of the pipeline.
///
/// # Arguments
///
/// * `next`  - State being built for the next cycle
/// * `stage` - Contents of the Fetch stage
///
/// # Errors
///
/// `PipelineError` when an operand is missing or malformed. The caller drops
/// `next`, so no state changes.
pub fn decode_stage(next: &mut CpuState, stage: StageContent) -> Result<(), PipelineError> {
    let Some(inst) = stage.instruction.as_ref() else {
        return Ok(());
    };

    let signals = ControlSignals::for_opcode(inst.opcode);
    let decoded = decode_operands(inst)?;
    tracing::debug!(line = inst.line, opcode = %inst.opcode, ?decoded, "ID");

    next.pipeline.place(
        StageName::Decode,
        StageContent {
            decoded: Some(decoded),
            control_signals: Some(signals),
            ..stage
        },
    );
    Ok(())
}

/// Maps an instruction's operand tokens onto the decoded operand set.
///
/// # Errors
///
/// `PipelineError::MissingOperand` or `PipelineError::InvalidOperand`.
pub fn decode_operands(inst: &Instruction) -> Result<DecodedOperands, PipelineError> {
    let mut d = DecodedOperands::default();

    match inst.opcode.family() {
        OpFamily::Arithmetic => {
            d.dest = Some(register_at(inst, 0)?);
            d.src1 = Some(register_at(inst, 1)?);
            second_operand_at(inst, 2, &mut d)?;
        }
        OpFamily::MoveCompare => {
            let reg = register_at(inst, 0)?;
            d.dest = Some(reg);
            d.src1 = Some(reg);
            second_operand_at(inst, 1, &mut d)?;
        }
        OpFamily::LoadStore => {
            let reg = register_at(inst, 0)?;
            d.dest = Some(reg);
            d.src1 = Some(reg);
            let token = operand_at(inst, 1)?;
            d.src2 = Some(
                operand::parse_register(operand::strip_address(token))
                    .map_err(|e| invalid(inst, token, e))?,
            );
        }
        OpFamily::Branch => {
            let token = operand_at(inst, 0)?;
            d.imm = Some(operand::parse_branch_target(token).map_err(|e| invalid(inst, token, e))?);
        }
    }
    Ok(d)
}

fn operand_at(inst: &Instruction, position: usize) -> Result<&str, PipelineError> {
    inst.operand(position)
        .ok_or(PipelineError::MissingOperand {
            line: inst.line,
            opcode: inst.opcode,
            position,
        })
}

fn register_at(inst: &Instruction, position: usize) -> Result<Register, PipelineError> {
    let token = operand_at(inst, position)?;
    operand::parse_register(token).map_err(|e| invalid(inst, token, e))
}

fn second_operand_at(
    inst: &Instruction,
    position: usize,
    d: &mut DecodedOperands,
) -> Result<(), PipelineError> {
    let token = operand_at(inst, position)?;
    match operand::parse_register_or_immediate(token).map_err(|e| invalid(inst, token, e))? {
        Operand::Register(reg) => d.src2 = Some(reg),
        Operand::Immediate(val) => d.imm = Some(val),
    }
    Ok(())
}

fn invalid(inst: &Instruction, token: &str, reason: AsmError) -> PipelineError {
    PipelineError::InvalidOperand {
        line: inst.line,
        opcode: inst.opcode,
        operand: token.to_string(),
        reason,
    }
}
