//! Session Tests.
//!
//! Verifies the run loop around the engine:
//!   1. Refusing to step while the program has diagnostics
//!   2. History, undo, and the history limit
//!   3. Run-to-halt and the cycle budget
//!   4. Snapshot export
//!   5. Save, open, and delete through a store

use crate::common::mocks::store::{MockStore, program};
use armpipe_core::config::Config;
use armpipe_core::sim::{
    MemoryStore, ProgramId, ProgramStore, Session, SimError, Snapshot, StopReason, StoreError,
};
use armpipe_core::Register;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;

fn session(src: &str) -> Session {
    let mut s = Session::default();
    s.load_source(src);
    s
}

// ══════════════════════════════════════════════════════════
// 1. Precondition
// ══════════════════════════════════════════════════════════

#[test]
fn step_is_refused_while_errors_exist() {
    let mut s = session("MOV R0, #1\nNOPE");
    let err = s.step().unwrap_err();
    assert!(matches!(err, SimError::ProgramHasErrors { count: 1 }));
    assert_eq!(s.state().clock, 0);
    assert_eq!(s.history().count(), 0);
}

#[test]
fn fixing_the_source_allows_stepping() {
    let mut s = session("NOPE");
    assert!(s.step().is_err());
    s.load_source("MOV R0, #1");
    assert_eq!(s.step().unwrap().clock, 1);
}

#[test]
fn load_source_resets_state() {
    let mut s = session("MOV R0, #1");
    let _ = s.run(100).unwrap();
    assert_eq!(s.state().registers.read(Register::R0), 1);
    s.load_source("MOV R1, #2");
    assert_eq!(s.state().clock, 0);
    assert_eq!(s.state().registers.read(Register::R0), 0);
    assert_eq!(s.stats().cycles, 0);
}

// ══════════════════════════════════════════════════════════
// 2. History
// ══════════════════════════════════════════════════════════

#[test]
fn undo_restores_previous_states() {
    let mut s = session("MOV R0, #5");
    let _ = s.run(100).unwrap();
    assert_eq!(s.state().registers.read(Register::R0), 5);
    assert!(s.undo());
    assert_eq!(s.state().clock, 5);
    assert_eq!(s.state().registers.read(Register::R0), 0);
    while s.undo() {}
    assert_eq!(s.state().clock, 0);
    assert!(!s.undo());
}

#[test]
fn history_is_bounded() {
    let mut config = Config::default();
    config.session.history_limit = 3;
    let mut s = Session::new(config);
    s.load_source("MOV R0, #1\nMOV R1, #2");
    for _ in 0..10 {
        let _ = s.step().unwrap();
    }
    let clocks: Vec<u64> = s.history().map(|c| c.clock).collect();
    assert_eq!(clocks, vec![7, 8, 9]);
}

#[test]
fn undo_rolls_back_stats() {
    let mut s = session("MOV R0, #5");
    let _ = s.run(100).unwrap();
    assert_eq!(s.stats().instructions_retired, 1);
    assert!(s.undo());
    assert_eq!(s.stats().cycles, s.state().clock);
    assert_eq!(s.stats().instructions_retired, 0);

    let _ = s.step().unwrap();
    assert_eq!(s.stats().cycles, s.state().clock);
    assert_eq!(s.stats().instructions_retired, 1);
    assert_eq!(s.stats().inst_alu, 1);
}

#[test]
fn undo_rolls_back_branch_counts() {
    let mut s = session("B END\nMOV R0, #1\nEND: MOV R1, #1");
    let _ = s.run(100).unwrap();
    assert_eq!(s.stats().branches_taken, 1);
    while s.undo() {}
    assert_eq!(s.stats().branches_taken, 0);
    assert_eq!(s.stats().cycles, 0);
}

#[test]
fn reset_clears_history_and_stats() {
    let mut s = session("MOV R0, #1");
    let _ = s.run(3).unwrap();
    s.reset();
    assert_eq!(s.history().count(), 0);
    assert_eq!(s.stats().cycles, 0);
    assert_eq!(s.state().clock, 0);
}

// ══════════════════════════════════════════════════════════
// 3. Run loop
// ══════════════════════════════════════════════════════════

#[test]
fn run_stops_when_halted() {
    let mut s = session("MOV R0,#2\nLOOP:\nADD R0,R0,#1\nCMP R0,#5\nBNE LOOP");
    assert_eq!(s.run(10_000).unwrap(), StopReason::Halted);
    assert!(s.is_halted());
    assert_eq!(s.state().clock, 60);
    assert_eq!(s.state().registers.read(Register::R0), 5);
}

#[test]
fn run_reports_cycle_limit_for_infinite_loops() {
    let mut s = session("SPIN: B SPIN");
    assert_eq!(s.run(50).unwrap(), StopReason::CycleLimit);
    assert_eq!(s.state().clock, 50);
}

#[test]
fn run_uses_configured_start_pc() {
    let mut config = Config::default();
    config.cpu.start_pc = 4;
    let mut s = Session::new(config);
    s.load_source("MOV R0, #1\nMOV R1, #1");
    let _ = s.run(100).unwrap();
    assert_eq!(s.state().registers.read(Register::R0), 0);
    assert_eq!(s.state().registers.read(Register::R1), 1);
}

// ══════════════════════════════════════════════════════════
// 4. Export
// ══════════════════════════════════════════════════════════

#[test]
fn export_includes_history_and_current_state() {
    let mut s = session("MOV R0, #3");
    let _ = s.run(100).unwrap();
    let snapshots: Vec<Snapshot> = serde_json::from_str(&s.export_history().unwrap()).unwrap();
    assert_eq!(snapshots.len(), 7);
    assert_eq!(snapshots[0].step, 0);
    assert_eq!(snapshots[6].step, 6);
    assert_eq!(&snapshots[6].state, s.state());
}

// ══════════════════════════════════════════════════════════
// 5. Store
// ══════════════════════════════════════════════════════════

#[test]
fn first_save_creates_then_updates() {
    let mut store = MockStore::new();
    let _ = store
        .expect_save()
        .withf(|title, text| title == "demo" && text == "MOV R0, #1")
        .times(1)
        .returning(|_, _| Ok(ProgramId(7)));
    let _ = store
        .expect_update()
        .withf(|id, patch| {
            *id == ProgramId(7) && patch.assembly_text.as_deref() == Some("MOV R0, #1")
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let mut s = session("MOV R0, #1");
    assert_eq!(s.save(&mut store, "demo").unwrap(), ProgramId(7));
    assert_eq!(s.program_id(), Some(ProgramId(7)));
    assert_eq!(s.save(&mut store, "demo").unwrap(), ProgramId(7));
}

#[test]
fn open_loads_and_assembles() {
    let mut store = MockStore::new();
    let _ = store
        .expect_get()
        .with(eq(ProgramId(3)))
        .times(1)
        .returning(|id| Ok(program(id.0, "MOV R2, #9")));

    let mut s = Session::default();
    s.open(&store, ProgramId(3)).unwrap();
    assert_eq!(s.source(), "MOV R2, #9");
    assert!(s.program().is_ok());
    let _ = s.run(100).unwrap();
    assert_eq!(s.state().registers.read(Register::R2), 9);
}

#[test]
fn store_errors_propagate() {
    let mut store = MockStore::new();
    let _ = store
        .expect_get()
        .returning(|id| Err(StoreError::NotFound(id)));

    let mut s = Session::default();
    let err = s.open(&store, ProgramId(1)).unwrap_err();
    assert!(matches!(err, SimError::Store(StoreError::NotFound(ProgramId(1)))));
    assert_eq!(s.program_id(), None);
}

#[test]
fn save_after_delete_creates_a_new_program() {
    let mut store = MemoryStore::new();
    let mut s = session("MOV R0, #1");
    let first = s.save(&mut store, "demo").unwrap();

    s.delete(&mut store, first).unwrap();
    assert_eq!(s.program_id(), None);
    assert!(store.is_empty());

    let second = s.save(&mut store, "demo").unwrap();
    assert_ne!(first, second);
    assert_eq!(s.program_id(), Some(second));
    assert_eq!(store.get(second).unwrap().assembly_text, "MOV R0, #1");
}

#[test]
fn save_recovers_when_program_was_deleted_elsewhere() {
    let mut store = MemoryStore::new();
    let mut s = session("MOV R0, #1");
    let first = s.save(&mut store, "demo").unwrap();
    store.delete(first).unwrap();

    s.load_source("MOV R0, #2");
    let second = s.save(&mut store, "demo").unwrap();
    assert_ne!(first, second);
    assert_eq!(s.program_id(), Some(second));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(second).unwrap().assembly_text, "MOV R0, #2");
}

#[test]
fn update_not_found_falls_back_to_save() {
    let mut store = MockStore::new();
    let mut next_id = 0;
    let _ = store.expect_save().times(2).returning(move |_, _| {
        next_id += 1;
        Ok(ProgramId(next_id))
    });
    let _ = store
        .expect_update()
        .withf(|id, _| *id == ProgramId(1))
        .times(1)
        .returning(|id, _| Err(StoreError::NotFound(id)));

    let mut s = session("MOV R0, #1");
    assert_eq!(s.save(&mut store, "demo").unwrap(), ProgramId(1));
    assert_eq!(s.save(&mut store, "demo").unwrap(), ProgramId(2));
    assert_eq!(s.program_id(), Some(ProgramId(2)));
}

#[test]
fn update_backend_errors_propagate_and_keep_the_id() {
    let mut store = MockStore::new();
    let _ = store.expect_save().times(1).returning(|_, _| Ok(ProgramId(4)));
    let _ = store
        .expect_update()
        .times(1)
        .returning(|_, _| Err(StoreError::Backend("disk full".into())));

    let mut s = session("MOV R0, #1");
    let _ = s.save(&mut store, "demo").unwrap();
    let err = s.save(&mut store, "demo").unwrap_err();
    assert!(matches!(err, SimError::Store(StoreError::Backend(_))));
    assert_eq!(s.program_id(), Some(ProgramId(4)));
}

#[test]
fn deleting_another_program_keeps_the_id() {
    let mut store = MockStore::new();
    let _ = store.expect_save().times(1).returning(|_, _| Ok(ProgramId(1)));
    let _ = store
        .expect_delete()
        .with(eq(ProgramId(9)))
        .times(1)
        .returning(|_| Ok(()));

    let mut s = session("MOV R0, #1");
    let _ = s.save(&mut store, "demo").unwrap();
    s.delete(&mut store, ProgramId(9)).unwrap();
    assert_eq!(s.program_id(), Some(ProgramId(1)));
}
