//! Arithmetic Logic Unit (ALU).
//!
//! Implements the integer operations used in the execute stage. All results
//! wrap at 32 bits.

use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand
    ///
    /// # Examples
    ///
    /// ```
    /// use armpipe_core::core::units::alu::Alu;
    /// use armpipe_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 40, 2), 42);
    /// assert_eq!(Alu::execute(AluOp::Sub, 3, 5), -2);
    /// assert_eq!(Alu::execute(AluOp::Mov, 99, 7), 7);
    /// assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), i32::MIN);
    /// ```
    pub const fn execute(op: AluOp, a: i32, b: i32) -> i32 {
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Mov => b,
        }
    }

    /// Computes the value `CMP` sets the flags from.
    pub const fn compare(a: i32, b: i32) -> i32 {
        a.wrapping_sub(b)
    }
}
