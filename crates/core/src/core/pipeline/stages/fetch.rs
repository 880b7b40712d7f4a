//! Instruction Fetch (IF) Stage.
//!
//! Runs only when the whole pipeline is idle. Reads the instruction at
//! `pc / 4` into the Fetch stage and advances the program counter by one word.

use crate::common::WORD_SIZE;
use crate::core::CpuState;
use crate::core::pipeline::latches::{StageContent, StageName};
use crate::isa::Instruction;

/// Executes the fetch stage of the pipeline.
///
/// When the program counter points past the last instruction the pipeline
/// stays idle and the program counter is left alone.
///
/// # Arguments
///
/// * `next`         - State being built for the next cycle
/// * `instructions` - The assembled program
pub fn fetch_stage(next: &mut CpuState, instructions: &[Instruction]) {
    let Some(inst) = instructions.get(next.fetch_index()) else {
        tracing::trace!(pc = next.pc, "IF  idle (end of program)");
        return;
    };

    tracing::debug!(pc = next.pc, line = inst.line, inst = %inst, "IF");
    next.pipeline
        .place(StageName::Fetch, StageContent::fetched(inst.clone()));
    next.pc = next.pc.wrapping_add(WORD_SIZE);
}
