//! Two-pass assembler.
//!
//! This module turns assembly text into an instruction list plus diagnostics. It performs:
//! 1. **Lexing:** Comment (`@`) and label (`name:`) stripping, tokenization on whitespace and commas.
//! 2. **Label Pass:** Records each label's byte offset; every instruction-bearing line
//!    consumes a slot, even one that later fails to assemble.
//! 3. **Instruction Pass:** Opcode lookup, label-to-immediate rewriting, and operand validation.
//!
//! Errors are data: a bad line yields a [`ParseError`] and parsing continues, so
//! everything before the bad line still simulates.

/// Line splitting and tokenization.
pub mod lexer;

/// Label table built by the first pass.
pub mod labels;

use serde::{Deserialize, Serialize};

use crate::common::AsmError;
use crate::config::AssemblerConfig;
use crate::isa::operand;
use crate::isa::{Instruction, OpFamily, Opcode};

pub use labels::{LabelDef, LabelTable};
pub use lexer::SourceLine;

/// A diagnostic attached to one source line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// Human-readable message.
    pub message: String,
    /// The offending line as written, comment included.
    pub content: String,
    /// Typed reason.
    pub kind: AsmError,
}

impl ParseError {
    /// Builds a diagnostic for a source line.
    pub fn new(line: &SourceLine<'_>, kind: AsmError) -> Self {
        Self {
            line: line.number,
            message: kind.to_string(),
            content: line.raw.to_string(),
            kind,
        }
    }
}

/// Output of one assembler run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyResult {
    /// Successfully assembled instructions, in source order.
    pub instructions: Vec<Instruction>,
    /// Diagnostics, in source order.
    pub errors: Vec<ParseError>,
}

impl AssemblyResult {
    /// True when the program assembled without diagnostics.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Assembler with a fixed policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Assembler {
    allow_label_redefinition: bool,
}

impl Assembler {
    /// Creates an assembler from its configuration section.
    pub const fn new(config: &AssemblerConfig) -> Self {
        Self {
            allow_label_redefinition: config.allow_label_redefinition,
        }
    }

    /// Assembles a program.
    ///
    /// # Arguments
    ///
    /// * `text` - Newline-separated source.
    ///
    /// # Returns
    ///
    /// Instructions and diagnostics, each in source order.
    pub fn parse(&self, text: &str) -> AssemblyResult {
        let (labels, mut errors) = LabelTable::build(lexer::lines(text), self.allow_label_redefinition);
        let mut instructions = Vec::new();

        for line in lexer::lines(text).filter(SourceLine::has_instruction) {
            match assemble_line(&line, &labels) {
                Ok(inst) => instructions.push(inst),
                Err(kind) => {
                    tracing::debug!(line = line.number, error = %kind, "assembly error");
                    errors.push(ParseError::new(&line, kind));
                }
            }
        }

        // Duplicate-label diagnostics come from the first pass; keep the
        // combined list in line order.
        errors.sort_by_key(|e| e.line);

        tracing::trace!(
            instructions = instructions.len(),
            errors = errors.len(),
            labels = labels.len(),
            "assembled"
        );
        AssemblyResult {
            instructions,
            errors,
        }
    }
}

/// Assembles a program with the default policy.
///
/// See [`Assembler::parse`].
pub fn parse(text: &str) -> AssemblyResult {
    Assembler::default().parse(text)
}

fn assemble_line(line: &SourceLine<'_>, labels: &LabelTable) -> Result<Instruction, AsmError> {
    let tokens = line.tokens();
    // A body made only of commas has no tokens at all.
    let Some((mnemonic, rest)) = tokens.split_first() else {
        return Err(AsmError::UnknownOpcode {
            mnemonic: line.body.to_string(),
        });
    };

    let mnemonic = mnemonic.to_uppercase();
    let opcode = Opcode::from_mnemonic(&mnemonic).ok_or(AsmError::UnknownOpcode { mnemonic })?;
    let operands: Vec<String> = rest.iter().map(|t| labels.resolve(t)).collect();

    validate_operands(opcode, &operands)?;
    Ok(Instruction::new(opcode, operands, line.body, line.number))
}

/// Checks operand count and syntax against the opcode's family.
///
/// # Errors
///
/// The first operand error found, left to right.
pub fn validate_operands(opcode: Opcode, operands: &[String]) -> Result<(), AsmError> {
    let expected = opcode.operand_count();
    if operands.len() != expected {
        return Err(AsmError::OperandCount {
            opcode,
            expected,
            found: operands.len(),
        });
    }

    match opcode.family() {
        OpFamily::Arithmetic => {
            let _ = operand::parse_register(&operands[0])?;
            let _ = operand::parse_register(&operands[1])?;
            let _ = operand::parse_register_or_immediate(&operands[2])?;
        }
        OpFamily::MoveCompare => {
            let _ = operand::parse_register(&operands[0])?;
            let _ = operand::parse_register_or_immediate(&operands[1])?;
        }
        OpFamily::LoadStore => {
            let _ = operand::parse_register(&operands[0])?;
            let _ = operand::parse_address(&operands[1])?;
        }
        OpFamily::Branch => {
            let _ = operand::parse_branch_target(&operands[0])?;
        }
    }
    Ok(())
}
