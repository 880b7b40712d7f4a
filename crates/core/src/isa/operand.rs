//! Operand syntax.
//!
//! Both the assembler (when validating a line) and the Decode stage (when
//! populating the decoded operand set) go through these functions, so an
//! instruction that assembles cleanly always decodes.

use serde::{Deserialize, Serialize};

use crate::common::constants::{ADDRESS_CLOSE, ADDRESS_OPEN, IMMEDIATE_MARKER, WORD_SIZE};
use crate::common::{AsmError, Register};

/// A resolved second operand: either a register or a literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operand {
    /// Register source.
    Register(Register),
    /// Literal value.
    Immediate(i32),
}

/// Reports whether a token is written in register position syntax.
///
/// Tokens beginning with `R`, or exactly `LR`, `SP`, or `PC`, are treated as
/// registers; whether the name is valid is checked by [`parse_register`].
pub fn looks_like_register(token: &str) -> bool {
    token.starts_with('R') || matches!(token, "LR" | "SP" | "PC")
}

/// True for tokens shaped like a label name: a letter or `_` followed by
/// letters, digits, or `_`.
pub fn looks_like_label(token: &str) -> bool {
    let mut chars = token.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parses a register operand.
///
/// # Errors
///
/// `AsmError::InvalidRegister` unless the token is exactly one of the
/// architectural register names.
pub fn parse_register(token: &str) -> Result<Register, AsmError> {
    Register::from_name(token).ok_or_else(|| AsmError::InvalidRegister {
        token: token.to_string(),
    })
}

/// Parses an immediate operand.
///
/// Accepts an optional `#` marker, an optional `-` sign, and decimal or
/// `0x`-prefixed hexadecimal digits. Values from `i32::MIN` through
/// `u32::MAX` are accepted; values above `i32::MAX` keep their 32-bit pattern.
///
/// # Errors
///
/// `AsmError::UndefinedLabel` for a bare identifier (an unresolved label
/// reference), otherwise `AsmError::InvalidImmediate`.
pub fn parse_immediate(token: &str) -> Result<i32, AsmError> {
    let invalid = || AsmError::InvalidImmediate {
        token: token.to_string(),
    };

    let body = match token.strip_prefix(IMMEDIATE_MARKER) {
        Some(rest) => rest,
        None if looks_like_label(token) => {
            return Err(AsmError::UndefinedLabel {
                label: token.to_string(),
            });
        }
        None => token,
    };

    let (negative, digits) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    if digits.starts_with(['-', '+']) {
        return Err(invalid());
    }
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => digits.parse::<i64>(),
    }
    .map_err(|_| invalid())?;

    let value = if negative { -magnitude } else { magnitude };
    if value < i64::from(i32::MIN) || value > i64::from(u32::MAX) {
        return Err(invalid());
    }
    Ok(value as i32)
}

/// Parses a register-or-immediate operand.
///
/// # Errors
///
/// Propagates the error of whichever interpretation the token's shape selects.
pub fn parse_register_or_immediate(token: &str) -> Result<Operand, AsmError> {
    if looks_like_register(token) {
        parse_register(token).map(Operand::Register)
    } else {
        parse_immediate(token).map(Operand::Immediate)
    }
}

/// Strips one pair of surrounding address brackets, if present.
pub fn strip_address(token: &str) -> &str {
    let inner = token.strip_prefix(ADDRESS_OPEN).unwrap_or(token);
    inner.strip_suffix(ADDRESS_CLOSE).unwrap_or(inner)
}

/// Parses a `[Rn]` address operand strictly, brackets required.
///
/// # Errors
///
/// `AsmError::InvalidAddress` when the brackets are missing, or
/// `AsmError::InvalidRegister` when the enclosed name is not a register.
pub fn parse_address(token: &str) -> Result<Register, AsmError> {
    let inner = token
        .strip_prefix(ADDRESS_OPEN)
        .and_then(|rest| rest.strip_suffix(ADDRESS_CLOSE))
        .ok_or_else(|| AsmError::InvalidAddress {
            token: token.to_string(),
        })?;
    parse_register(inner)
}

/// Parses an absolute branch target.
///
/// # Errors
///
/// Immediate parse errors, or `AsmError::MisalignedTarget` when the address is
/// negative or not a multiple of the word size.
pub fn parse_branch_target(token: &str) -> Result<i32, AsmError> {
    let target = parse_immediate(token)?;
    if target < 0 || target.unsigned_abs() % WORD_SIZE != 0 {
        return Err(AsmError::MisalignedTarget {
            target: i64::from(target),
        });
    }
    Ok(target)
}
