//! Single-cycle pipeline transition.
//!
//! `advance` is a pure function from one CPU state to the next. Exactly one
//! stage does work per call, picked by priority:
//!
//! | resident stage | work | result |
//! |---|---|---|
//! | WriteBack | commit | pipeline idle |
//! | Memory | load / store | WriteBack |
//! | Execute | branch resolve | Memory |
//! | Decode | ALU, flags, address | Execute |
//! | Fetch | control signals, operands | Decode |
//! | none | fetch at `pc / 4` | Fetch |
//!
//! Starting from an idle pipeline, an instruction is fetched on the first
//! call and commits on the sixth. The clock increments on every call,
//! idle ones included.

use crate::common::{PipelineError, Register};
use crate::core::CpuState;
use crate::core::pipeline::latches::StageName;
use crate::core::pipeline::stages::{
    branch_stage, decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::isa::Instruction;

/// Advances the simulation by one cycle.
///
/// The input state is not modified. Stages other than the highest-priority
/// resident one are discarded; states built by this function never hold more
/// than one instruction.
///
/// # Arguments
///
/// * `cpu`          - Current state
/// * `instructions` - The assembled program
///
/// # Errors
///
/// `PipelineError` when decode meets a missing or malformed operand.
///
/// # Examples
///
/// ```
/// use armpipe_core::{advance, parse, CpuState, Register};
///
/// let program = parse("MOV R0, #5");
/// let mut cpu = CpuState::default();
/// for _ in 0..6 {
///     cpu = advance(&cpu, &program.instructions).unwrap();
/// }
/// assert_eq!(cpu.registers.read(Register::R0), 5);
/// assert_eq!(cpu.clock, 6);
/// ```
pub fn advance(cpu: &CpuState, instructions: &[Instruction]) -> Result<CpuState, PipelineError> {
    let mut next = cpu.clone();
    let resident = std::mem::take(&mut next.pipeline).into_resident();

    match resident {
        Some((StageName::WriteBack, stage)) => wb_stage(&mut next, &stage),
        Some((StageName::Memory, stage)) => mem_stage(&mut next, stage),
        Some((StageName::Execute, stage)) => branch_stage(&mut next, stage),
        Some((StageName::Decode, stage)) => execute_stage(&mut next, stage),
        Some((StageName::Fetch, stage)) => decode_stage(&mut next, stage)?,
        None => fetch_stage(&mut next, instructions),
    }

    next.registers.write(Register::Pc, next.pc as i32);
    next.clock += 1;
    Ok(next)
}
