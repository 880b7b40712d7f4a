//! Label table.
//!
//! Built in the first assembler pass. Each label maps to the byte offset of the
//! next instruction-bearing line at or after its definition.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;

use super::ParseError;
use super::lexer::SourceLine;
use crate::common::constants::{IMMEDIATE_MARKER, WORD_SIZE};
use crate::common::AsmError;

/// A label definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LabelDef {
    /// Byte offset: instruction slot index times the word size.
    pub offset: u32,
    /// 1-based line of the definition.
    pub line: usize,
}

/// Mapping from label name (case-sensitive) to its definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LabelTable {
    labels: HashMap<String, LabelDef>,
}

impl LabelTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the label pass over a program.
    ///
    /// Every line with text left after comment and label stripping consumes
    /// one instruction slot, whether or not it will assemble.
    ///
    /// # Arguments
    ///
    /// * `lines`               - Source lines in order.
    /// * `allow_redefinition`  - When true a later definition silently replaces
    ///   an earlier one; otherwise the later one is reported and the first kept.
    ///
    /// # Returns
    ///
    /// The table and any `DuplicateLabel` diagnostics.
    pub fn build<'a>(
        lines: impl IntoIterator<Item = SourceLine<'a>>,
        allow_redefinition: bool,
    ) -> (Self, Vec<ParseError>) {
        let mut table = Self::new();
        let mut errors = Vec::new();
        let mut slot: u32 = 0;

        for line in lines {
            if let Some(name) = line.label.filter(|n| !n.is_empty()) {
                let def = LabelDef {
                    offset: slot * WORD_SIZE,
                    line: line.number,
                };
                match table.labels.entry(name.to_string()) {
                    Entry::Vacant(v) => {
                        let _ = v.insert(def);
                    }
                    Entry::Occupied(mut o) if allow_redefinition => {
                        let _ = o.insert(def);
                    }
                    Entry::Occupied(o) => {
                        tracing::debug!(label = name, line = line.number, "duplicate label");
                        errors.push(ParseError::new(
                            &line,
                            AsmError::DuplicateLabel {
                                label: name.to_string(),
                                first_line: o.get().line,
                            },
                        ));
                    }
                }
            }
            if line.has_instruction() {
                slot += 1;
            }
        }

        (table, errors)
    }

    /// Looks up a label.
    pub fn get(&self, name: &str) -> Option<LabelDef> {
        self.labels.get(name).copied()
    }

    /// Byte offset of a label.
    pub fn offset(&self, name: &str) -> Option<u32> {
        self.get(name).map(|d| d.offset)
    }

    /// Rewrites an operand that names a label into an immediate holding the
    /// label's offset; any other token is returned unchanged.
    pub fn resolve(&self, token: &str) -> String {
        self.offset(token).map_or_else(
            || token.to_string(),
            |offset| format!("{IMMEDIATE_MARKER}{offset}"),
        )
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when no labels are defined.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates over `(name, definition)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, LabelDef)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
