//! Writeback (WB) Stage.
//!
//! The final stage. Commits the stage result to the destination register
//! when the instruction writes a register, then leaves the pipeline idle.

use crate::common::Register;
use crate::core::CpuState;
use crate::core::pipeline::latches::StageContent;

/// Executes the writeback stage of the pipeline.
///
/// `PC` is never a commit target; the program counter only changes through
/// fetch and taken branches.
///
/// # Arguments
///
/// * `next`  - State being built for the next cycle
/// * `stage` - Contents of the WriteBack stage
pub fn wb_stage(next: &mut CpuState, stage: &StageContent) {
    let reg_write = stage.control_signals.is_some_and(|c| c.reg_write);
    let dest = stage.decoded.and_then(|d| d.dest);

    if let (true, Some(dest), Some(val)) = (reg_write, dest, stage.result) {
        if dest == Register::Pc {
            tracing::trace!("WB  skipped write to PC");
        } else {
            tracing::debug!(reg = %dest, val, "WB");
            next.registers.write(dest, val);
        }
    }
}
