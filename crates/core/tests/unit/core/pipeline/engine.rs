//! Engine Tests.
//!
//! Verifies stage priority, clock behaviour, purity, the PC mirror, and
//! cycle conservation for straight-line code.

use crate::common::builder::{StageBuilder, dest_imm};
use crate::common::harness::TestContext;
use armpipe_core::core::pipeline::StageName;
use armpipe_core::isa::Opcode;
use armpipe_core::{CpuState, Register, advance};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn stage_sequence_for_one_instruction() {
    let mut ctx = TestContext::new("MOV R0, #5");
    let mut seen = Vec::new();
    for _ in 0..6 {
        let _ = ctx.step();
        seen.push(ctx.resident_stage());
    }
    assert_eq!(
        seen,
        vec![
            Some(StageName::Fetch),
            Some(StageName::Decode),
            Some(StageName::Execute),
            Some(StageName::Memory),
            Some(StageName::WriteBack),
            None,
        ]
    );
    assert_eq!(ctx.reg(Register::R0), 5);
}

#[test]
fn clock_counts_every_call() {
    let mut ctx = TestContext::new("MOV R0, #1");
    for expected in 1..=10 {
        assert_eq!(ctx.step().clock, expected);
    }
}

#[test]
fn fetch_advances_pc_by_a_word() {
    let mut ctx = TestContext::new("MOV R0, #1\nMOV R1, #1");
    assert_eq!(ctx.step().pc, 4);
    let _ = ctx.run(5);
    assert_eq!(ctx.step().pc, 8);
}

#[test]
fn writeback_takes_priority_over_other_stages() {
    let mut cpu = CpuState::default();
    cpu.pipeline.place(
        StageName::WriteBack,
        StageBuilder::fetched(Opcode::Mov, &["R1", "#3"])
            .decoded(dest_imm(Register::R1, 3))
            .result(3)
            .build(),
    );
    cpu.pipeline.place(
        StageName::Fetch,
        StageBuilder::fetched(Opcode::Mov, &["R2", "#4"]).build(),
    );
    let next = advance(&cpu, &[]).unwrap();
    assert_eq!(next.registers.read(Register::R1), 3);
    // Lower-priority residents are discarded.
    assert!(next.pipeline.is_idle());
    assert_eq!(next.pipeline.occupied(), 0);
}

#[test]
fn advance_does_not_modify_its_input() {
    let ctx = TestContext::new("MOV R0, #5\nSTR R0, [R1]");
    let mut cpu = ctx.cpu.clone();
    for _ in 0..12 {
        let snapshot = cpu.clone();
        let next = advance(&cpu, &ctx.program.instructions).unwrap();
        assert_eq!(cpu, snapshot);
        cpu = next;
    }
}

#[test]
fn reset_state_values() {
    let cpu = CpuState::default();
    assert_eq!(cpu.pc, 0);
    assert_eq!(cpu.clock, 0);
    assert_eq!(cpu.registers.read(Register::Sp), 1024);
    assert_eq!(cpu.registers.read(Register::Lr), 0);
    assert!(cpu.pipeline.is_idle());
    assert!(cpu.memory.is_empty());
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
#[case(9)]
fn straight_line_code_takes_six_cycles_per_instruction(#[case] n: usize) {
    let src: Vec<String> = (0..n).map(|i| format!("ADD R0, R0, #{}", i + 1)).collect();
    let mut ctx = TestContext::new(&src.join("\n"));
    let cycles = ctx.run_to_halt(1000);
    assert_eq!(cycles, 6 * n);
    assert_eq!(ctx.reg(Register::R0), (1..=n as i32).sum::<i32>());
}

#[test]
fn pc_source_operand_reads_mirrored_pc() {
    let mut ctx = TestContext::new("MOV R0, #0\nMOV R1, PC");
    let _ = ctx.run_to_halt(100);
    // PC was 8 when the second MOV executed.
    assert_eq!(ctx.reg(Register::R1), 8);
}

#[test]
fn cpu_state_round_trips_through_json() {
    let mut ctx = TestContext::new("MOV R0, #5\nSTR R0, [SP]");
    let _ = ctx.run(9);
    let json = serde_json::to_string(&ctx.cpu).unwrap();
    let back: CpuState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ctx.cpu);

    let value = serde_json::to_value(&ctx.cpu).unwrap();
    assert_eq!(value["registers"]["R0"], 5);
    assert_eq!(value["registers"]["SP"], 1024);
    assert_eq!(value["flags"]["Z"], false);
    assert!(value["pipeline"]["Execute"]["instruction"].is_object());
}
