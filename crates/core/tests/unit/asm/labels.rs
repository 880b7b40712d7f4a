//! Label Pass Tests.
//!
//! Verifies label offsets, slot counting for label-only and failing lines,
//! operand rewriting, and the redefinition policy.

use armpipe_core::asm::{Assembler, LabelTable, lexer};
use armpipe_core::common::AsmError;
use armpipe_core::config::AssemblerConfig;
use armpipe_core::parse;
use pretty_assertions::assert_eq;

// ══════════════════════════════════════════════════════════
// 1. Offsets
// ══════════════════════════════════════════════════════════

#[test]
fn label_on_own_line_points_at_next_instruction() {
    let src = "MOV R0, #2\nLOOP:\nADD R0, R0, #1";
    let (table, errors) = LabelTable::build(lexer::lines(src), false);
    assert!(errors.is_empty());
    assert_eq!(table.offset("LOOP"), Some(4));
    assert_eq!(table.get("LOOP").map(|d| d.line), Some(2));
}

#[test]
fn label_sharing_a_line_points_at_that_instruction() {
    let src = "MOV R0, #1\nMOV R1, #2\nEND: B END";
    let (table, _) = LabelTable::build(lexer::lines(src), false);
    assert_eq!(table.offset("END"), Some(8));
}

#[test]
fn comments_and_blank_lines_take_no_slot() {
    let src = "@ header\n\n   \nMOV R0, #1 @ trailing\nNEXT:";
    let (table, _) = LabelTable::build(lexer::lines(src), false);
    assert_eq!(table.offset("NEXT"), Some(4));
}

#[test]
fn failing_lines_still_take_a_slot() {
    let result = parse("BOGUS R1\nHERE: MOV R0, #1\nB HERE");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.instructions.len(), 2);
    assert_eq!(result.instructions[1].operands, vec!["#4".to_string()]);
}

#[test]
fn labels_are_case_sensitive() {
    let (table, _) = LabelTable::build(lexer::lines("loop: MOV R0, #1"), false);
    assert_eq!(table.offset("loop"), Some(0));
    assert_eq!(table.offset("LOOP"), None);
}

#[test]
fn empty_label_name_is_ignored() {
    let (table, errors) = LabelTable::build(lexer::lines(": MOV R0, #1"), false);
    assert!(table.is_empty());
    assert!(errors.is_empty());
}

// ══════════════════════════════════════════════════════════
// 2. Resolution
// ══════════════════════════════════════════════════════════

#[test]
fn forward_reference_resolves() {
    let result = parse("B DONE\nMOV R0, #1\nDONE: MOV R1, #2");
    assert!(result.is_ok());
    assert_eq!(result.instructions[0].operands, vec!["#8".to_string()]);
}

#[test]
fn undefined_label_is_reported() {
    let result = parse("B NOWHERE");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].kind,
        AsmError::UndefinedLabel {
            label: "NOWHERE".into()
        }
    );
    assert!(result.instructions.is_empty());
}

#[test]
fn only_exact_tokens_are_rewritten() {
    let (table, _) = LabelTable::build(lexer::lines("L: MOV R0, #1"), false);
    assert_eq!(table.resolve("L"), "#0");
    assert_eq!(table.resolve("L2"), "L2");
    assert_eq!(table.resolve("R0"), "R0");
}

// ══════════════════════════════════════════════════════════
// 3. Redefinition policy
// ══════════════════════════════════════════════════════════

const REDEFINED: &str = "X: MOV R0, #1\nMOV R1, #2\nX: MOV R2, #3\nB X";

#[test]
fn redefinition_is_rejected_by_default() {
    let result = parse(REDEFINED);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].line, 3);
    assert_eq!(
        result.errors[0].kind,
        AsmError::DuplicateLabel {
            label: "X".into(),
            first_line: 1
        }
    );
    // First definition kept.
    assert_eq!(result.instructions[3].operands, vec!["#0".to_string()]);
}

#[test]
fn redefinition_allowed_keeps_last() {
    let assembler = Assembler::new(&AssemblerConfig {
        allow_label_redefinition: true,
    });
    let result = assembler.parse(REDEFINED);
    assert!(result.is_ok());
    assert_eq!(result.instructions[3].operands, vec!["#8".to_string()]);
}
