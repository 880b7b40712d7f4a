//! CPU state snapshot.
//!
//! `CpuState` is the only mutable simulation state. The engine never modifies
//! a state in place: each `advance` call returns a new one, so callers can keep
//! old states for undo and replay.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{Register, RegisterFile, WORD_SIZE};
use crate::config::CpuConfig;
use crate::core::arch::{Flags, Memory};
use crate::core::pipeline::latches::PipelineState;
use crate::isa::Instruction;

/// Architectural and pipeline state at a cycle boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuState {
    /// Program counter (byte address of the next fetch).
    pub pc: u32,
    /// Register file. The `PC` entry mirrors `pc`.
    pub registers: RegisterFile,
    /// Sparse data memory.
    pub memory: Memory,
    /// Condition flags.
    pub flags: Flags,
    /// Stage contents.
    pub pipeline: PipelineState,
    /// Cycles elapsed since reset.
    pub clock: u64,
}

impl CpuState {
    /// Creates the reset state.
    ///
    /// # Arguments
    ///
    /// * `config` - Initial program counter and stack pointer.
    pub fn new(config: &CpuConfig) -> Self {
        let mut registers = RegisterFile::with_stack_pointer(config.initial_sp);
        registers.write(Register::Pc, config.start_pc as i32);
        Self {
            pc: config.start_pc,
            registers,
            memory: Memory::new(),
            flags: Flags::default(),
            pipeline: PipelineState::idle(),
            clock: 0,
        }
    }

    /// Instruction index the next fetch would read.
    pub const fn fetch_index(&self) -> usize {
        (self.pc / WORD_SIZE) as usize
    }

    /// True when the pipeline is idle and the program counter is past the
    /// end of the program: no further call can change anything but the clock.
    pub fn is_halted(&self, instructions: &[Instruction]) -> bool {
        self.pipeline.is_idle() && self.fetch_index() >= instructions.len()
    }
}

impl Default for CpuState {
    fn default() -> Self {
        Self::new(&CpuConfig::default())
    }
}

impl fmt::Display for CpuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "clock={} pc={:#06x} flags={}", self.clock, self.pc, self.flags)?;
        writeln!(f, "{}", self.registers)?;
        for (addr, val) in self.memory.iter() {
            writeln!(f, "  [{addr:#06x}] = {val}")?;
        }
        Ok(())
    }
}
