//! Statistics Verification.
//!
//! Runs programs through a session and checks the counters it derives.

use armpipe_core::Session;
use armpipe_core::stats::SimStats;

fn run(src: &str) -> Session {
    let mut s = Session::default();
    s.load_source(src);
    let _ = s.run(10_000).unwrap();
    s
}

#[test]
fn default_is_zeroed() {
    let stats = SimStats::default();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.instructions_retired, 0);
    assert_eq!(stats.branches_taken + stats.branches_not_taken, 0);
}

#[test]
fn loop_program_counts() {
    let s = run("MOV R0,#2\nLOOP:\nADD R0,R0,#1\nCMP R0,#5\nBNE LOOP");
    let stats = s.stats();
    assert_eq!(stats.cycles, 60);
    assert_eq!(stats.instructions_retired, 10);
    assert_eq!(stats.inst_alu, 4);
    assert_eq!(stats.inst_compare, 3);
    assert_eq!(stats.inst_branch, 3);
    assert_eq!(stats.branches_taken, 2);
    assert_eq!(stats.branches_not_taken, 1);
    assert!((stats.cpi() - 6.0).abs() < f64::EPSILON);
}

#[test]
fn memory_mix() {
    let s = run("MOV R1, #8\nSTR R1, [R1]\nLDR R2, [R1]");
    let stats = s.stats();
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_alu, 1);
}

#[test]
fn print_does_not_panic_on_empty_run() {
    SimStats::default().print();
    SimStats::default().print_sections(&["branch".to_string()]);
}
