//! Memory Access (MEM) Stage.
//!
//! Loads replace the stage result with the memory word at the computed
//! address (unwritten addresses read as 0). Stores write the first source
//! register to that address. Other instructions pass through.

use crate::core::CpuState;
use crate::core::pipeline::latches::{StageContent, StageName};

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `next`  - State being built for the next cycle
/// * `stage` - Contents of the Memory stage
pub fn mem_stage(next: &mut CpuState, mut stage: StageContent) {
    let ctrl = stage.control_signals.unwrap_or_default();

    if let Some(addr) = stage.memory_address {
        if ctrl.mem_read {
            let val = next.memory.read(addr);
            tracing::debug!(addr, val, "MEM load");
            stage.result = Some(val);
        } else if ctrl.mem_write {
            let val = stage
                .decoded
                .and_then(|d| d.src1)
                .map_or(0, |r| next.registers.read(r));
            tracing::debug!(addr, val, "MEM store");
            next.memory.write(addr, val);
        }
    }

    next.pipeline.place(StageName::WriteBack, stage);
}
