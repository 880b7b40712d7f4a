//! Pipeline stage contents.
//!
//! This module defines what each of the five stages holds between cycles:
//! 1. **Decoded Operands:** Register and immediate fields filled in by Decode.
//! 2. **Stage Content:** The resident instruction plus everything computed for it so far.
//! 3. **Pipeline State:** Exactly five named stages, at most one of them non-idle.
//!
//! Every field that does not apply is `None`. A stage without a resident
//! instruction has no other field populated.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::common::Register;
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::Instruction;

/// Pipeline stage names, in pipeline order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum StageName {
    /// Instruction fetch.
    Fetch,
    /// Control-signal and operand decode.
    Decode,
    /// ALU execution and branch resolution.
    Execute,
    /// Data memory access.
    Memory,
    /// Register commit.
    WriteBack,
}

impl StageName {
    /// Stages in the order the engine checks them: WriteBack first, Fetch last.
    pub const PRIORITY: [Self; 5] = [
        Self::WriteBack,
        Self::Memory,
        Self::Execute,
        Self::Decode,
        Self::Fetch,
    ];

    /// Short label used in traces and occupancy diagrams.
    pub const fn short(self) -> &'static str {
        match self {
            Self::Fetch => "IF",
            Self::Decode => "ID",
            Self::Execute => "EX",
            Self::Memory => "MEM",
            Self::WriteBack => "WB",
        }
    }
}

/// Register and immediate fields populated by Decode.
///
/// Which fields are present depends on the opcode family; absent fields mean
/// "not applicable", never zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedOperands {
    /// First source register.
    #[serde(rename = "src1Reg", default, skip_serializing_if = "Option::is_none")]
    pub src1: Option<Register>,
    /// Second source register (for `LDR`/`STR`, the address register).
    #[serde(rename = "src2Reg", default, skip_serializing_if = "Option::is_none")]
    pub src2: Option<Register>,
    /// Destination register (for `STR`, the value source).
    #[serde(rename = "destReg", default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<Register>,
    /// Immediate value.
    #[serde(rename = "immValue", default, skip_serializing_if = "Option::is_none")]
    pub imm: Option<i32>,
}

/// Contents of one pipeline stage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageContent {
    /// Resident instruction; `None` when the stage is idle.
    pub instruction: Option<Instruction>,
    /// Operand fields, present from Decode onward.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded: Option<DecodedOperands>,
    /// Control signals, present from Decode onward.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_signals: Option<ControlSignals>,
    /// ALU result, replaced by the loaded value for loads.
    #[serde(
        rename = "executionResult",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<i32>,
    /// Effective data address for loads and stores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_address: Option<u32>,
}

impl StageContent {
    /// An idle stage.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A stage holding a freshly fetched, not yet decoded, instruction.
    pub fn fetched(instruction: Instruction) -> Self {
        Self {
            instruction: Some(instruction),
            ..Self::default()
        }
    }

    /// True when no instruction is resident.
    pub const fn is_idle(&self) -> bool {
        self.instruction.is_none()
    }
}

/// The five pipeline stages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PipelineState {
    /// Fetch stage.
    pub fetch: StageContent,
    /// Decode stage.
    pub decode: StageContent,
    /// Execute stage.
    pub execute: StageContent,
    /// Memory stage.
    pub memory: StageContent,
    /// WriteBack stage.
    pub write_back: StageContent,
}

impl PipelineState {
    /// A pipeline with every stage idle.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Contents of a stage.
    pub const fn stage(&self, name: StageName) -> &StageContent {
        match name {
            StageName::Fetch => &self.fetch,
            StageName::Decode => &self.decode,
            StageName::Execute => &self.execute,
            StageName::Memory => &self.memory,
            StageName::WriteBack => &self.write_back,
        }
    }

    /// Mutable contents of a stage.
    pub const fn stage_mut(&mut self, name: StageName) -> &mut StageContent {
        match name {
            StageName::Fetch => &mut self.fetch,
            StageName::Decode => &mut self.decode,
            StageName::Execute => &mut self.execute,
            StageName::Memory => &mut self.memory,
            StageName::WriteBack => &mut self.write_back,
        }
    }

    /// Places content in a stage, replacing what was there.
    pub fn place(&mut self, name: StageName, content: StageContent) {
        *self.stage_mut(name) = content;
    }

    /// The highest-priority non-idle stage, if any.
    pub fn resident(&self) -> Option<(StageName, &StageContent)> {
        StageName::PRIORITY
            .into_iter()
            .map(|name| (name, self.stage(name)))
            .find(|(_, s)| !s.is_idle())
    }

    /// Consumes the pipeline, keeping only the highest-priority resident stage.
    pub fn into_resident(mut self) -> Option<(StageName, StageContent)> {
        let name = self.resident()?.0;
        Some((name, std::mem::take(self.stage_mut(name))))
    }

    /// Number of stages holding an instruction.
    pub fn occupied(&self) -> usize {
        StageName::iter()
            .filter(|name| !self.stage(*name).is_idle())
            .count()
    }

    /// True when every stage is idle.
    pub fn is_idle(&self) -> bool {
        self.occupied() == 0
    }
}
