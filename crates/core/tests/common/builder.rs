use armpipe_core::asm::validate_operands;
use armpipe_core::core::pipeline::{ControlSignals, DecodedOperands, StageContent};
use armpipe_core::isa::{Instruction, Opcode};
use armpipe_core::Register;

/// Builds stage contents directly, bypassing the earlier stages.
pub struct StageBuilder {
    content: StageContent,
}

impl StageBuilder {
    /// Starts from a freshly fetched instruction. Operands must be valid.
    pub fn fetched(opcode: Opcode, operands: &[&str]) -> Self {
        let operands: Vec<String> = operands.iter().map(ToString::to_string).collect();
        assert!(validate_operands(opcode, &operands).is_ok(), "bad operands {operands:?}");
        let raw = format!("{opcode} {}", operands.join(", "));
        Self {
            content: StageContent::fetched(Instruction::new(opcode, operands, raw, 1)),
        }
    }

    /// Adds the control signals decode would derive.
    pub fn decoded(mut self, decoded: DecodedOperands) -> Self {
        let opcode = self
            .content
            .instruction
            .as_ref()
            .map(|i| i.opcode)
            .expect("instruction");
        self.content.control_signals = Some(ControlSignals::for_opcode(opcode));
        self.content.decoded = Some(decoded);
        self
    }

    pub fn result(mut self, val: i32) -> Self {
        self.content.result = Some(val);
        self
    }

    pub fn address(mut self, addr: u32) -> Self {
        self.content.memory_address = Some(addr);
        self
    }

    pub fn build(self) -> StageContent {
        self.content
    }
}

/// Decoded operands for a register destination with an immediate.
pub fn dest_imm(dest: Register, imm: i32) -> DecodedOperands {
    DecodedOperands {
        dest: Some(dest),
        src1: Some(dest),
        imm: Some(imm),
        ..DecodedOperands::default()
    }
}
