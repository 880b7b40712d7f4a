//! Assembler Properties.
//!
//! Generated programs mixing instructions, labels, comments, and blank
//! lines. Checks that a label's offset is four times the number of
//! instruction-bearing lines before it, and that parsing is deterministic
//! apart from instruction identifiers.

use armpipe_core::parse;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Line {
    Inst(String),
    Label,
    Comment,
    Blank,
}

fn instruction() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u8..8, -100i32..100).prop_map(|(r, v)| format!("MOV R{r}, #{v}")),
        (0u8..8, 0u8..8, 0u8..8).prop_map(|(a, b, c)| format!("ADD R{a}, R{b}, R{c}")),
        (0u8..8, 0i32..50).prop_map(|(r, v)| format!("CMP R{r}, #{v}")),
        (0u8..8, 0u8..8).prop_map(|(a, b)| format!("LDR R{a}, [R{b}]")),
        Just("BOGUS R1".to_string()),
    ]
}

fn line() -> impl Strategy<Value = Line> {
    prop_oneof![
        4 => instruction().prop_map(Line::Inst),
        1 => Just(Line::Label),
        1 => Just(Line::Comment),
        1 => Just(Line::Blank),
    ]
}

/// Renders lines, naming each label `L<n>`, and returns the expected offsets.
fn render(lines: &[Line]) -> (String, Vec<(String, u32)>) {
    let mut text = Vec::new();
    let mut expected = Vec::new();
    let mut slot = 0u32;
    for (n, line) in lines.iter().enumerate() {
        match line {
            Line::Inst(s) => {
                text.push(s.clone());
                slot += 1;
            }
            Line::Label => {
                text.push(format!("L{n}:"));
                expected.push((format!("L{n}"), slot * 4));
            }
            Line::Comment => text.push("   @ comment".to_string()),
            Line::Blank => text.push(String::new()),
        }
    }
    (text.join("\n"), expected)
}

proptest! {
    #[test]
    fn label_offset_counts_instruction_lines(lines in prop::collection::vec(line(), 0..40)) {
        let (mut text, expected) = render(&lines);
        for (name, _) in &expected {
            text.push_str(&format!("\nB {name}"));
        }
        let result = parse(&text);
        let branches: Vec<_> = result.instructions.iter().rev().take(expected.len()).rev().collect();
        prop_assert_eq!(branches.len(), expected.len());
        for (inst, (_, offset)) in branches.iter().zip(&expected) {
            prop_assert_eq!(&inst.operands[0], &format!("#{offset}"));
        }
    }

    #[test]
    fn parse_is_deterministic_except_ids(lines in prop::collection::vec(line(), 0..40)) {
        let (text, _) = render(&lines);
        let a = parse(&text);
        let b = parse(&text);
        prop_assert_eq!(&a.errors, &b.errors);
        prop_assert_eq!(a.instructions.len(), b.instructions.len());
        for (x, y) in a.instructions.iter().zip(&b.instructions) {
            prop_assert_ne!(x.id, y.id);
            prop_assert_eq!(&x.raw, &y.raw);
            prop_assert_eq!(x.opcode, y.opcode);
            prop_assert_eq!(&x.operands, &y.operands);
            prop_assert_eq!(&x.binary, &y.binary);
            prop_assert_eq!(x.line, y.line);
        }
    }
}
