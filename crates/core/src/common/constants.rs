//! Simulator-wide constants.
//!
//! Syntax markers shared by the lexer and the operand parser, plus the
//! architectural reset values.

/// Size of one instruction slot and one memory word, in bytes.
///
/// The program counter advances by this amount per fetch and label
/// offsets are multiples of it.
pub const WORD_SIZE: u32 = 4;

/// Starts a line comment; everything after it is ignored by the assembler.
pub const COMMENT_MARKER: char = '@';

/// Separates a label definition from the rest of the line.
pub const LABEL_SEPARATOR: char = ':';

/// Prefix marking an immediate operand (`#5`).
pub const IMMEDIATE_MARKER: char = '#';

/// Opening bracket of a register-indirect address operand (`[R1]`).
pub const ADDRESS_OPEN: char = '[';

/// Closing bracket of a register-indirect address operand (`[R1]`).
pub const ADDRESS_CLOSE: char = ']';

/// Stack pointer value after reset.
pub const RESET_STACK_POINTER: i32 = 1024;

/// Program counter value after reset.
pub const RESET_PC: u32 = 0;
