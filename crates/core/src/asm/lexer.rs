//! Line splitting and tokenization.
//!
//! Both assembler passes see the source through `SourceLine`, so comment and
//! label stripping are identical in each pass.

use crate::common::constants::{COMMENT_MARKER, LABEL_SEPARATOR};

/// One line of source, split into its syntactic parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// The original line, comment included.
    pub raw: &'a str,
    /// Label defined on this line, if any (may be empty: `": ADD ..."`).
    pub label: Option<&'a str>,
    /// Trimmed text after comment and label removal; empty when the line
    /// carries no instruction.
    pub body: &'a str,
}

impl<'a> SourceLine<'a> {
    /// Splits a raw line.
    ///
    /// # Arguments
    ///
    /// * `number` - 1-based line number.
    /// * `raw`    - The line as written.
    pub fn new(number: usize, raw: &'a str) -> Self {
        let code = raw
            .split_once(COMMENT_MARKER)
            .map_or(raw, |(code, _)| code)
            .trim();
        let (label, body) = match code.split_once(LABEL_SEPARATOR) {
            Some((label, rest)) => (Some(label.trim()), rest.trim()),
            None => (None, code),
        };
        Self {
            number,
            raw,
            label,
            body,
        }
    }

    /// True when the line occupies an instruction slot.
    ///
    /// Slot counting depends only on whether text remains after stripping, not
    /// on whether that text assembles.
    pub const fn has_instruction(&self) -> bool {
        !self.body.is_empty()
    }

    /// Splits the body into tokens on whitespace and commas.
    ///
    /// Runs of separators collapse and empty tokens are dropped.
    pub fn tokens(&self) -> Vec<&'a str> {
        self.body
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Splits source text into numbered lines.
pub fn lines(text: &str) -> impl Iterator<Item = SourceLine<'_>> {
    text.lines()
        .enumerate()
        .map(|(idx, raw)| SourceLine::new(idx + 1, raw))
}
