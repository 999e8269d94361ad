//! Arithmetic Logic Unit (ALU).
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul
//! - [`logic`]:      And, Or, Xor
//!
//! All arithmetic wraps on overflow, like the 32-bit hardware it models.

/// Integer arithmetic operations (add, subtract, multiply).
pub mod arithmetic;

/// Bitwise logical operations (and, or, xor).
pub mod logic;

use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand (`src1_value`)
    /// * `b`  - Second operand (`src2_value` or the immediate)
    ///
    /// # Examples
    ///
    /// ```
    /// use apex_core::core::units::alu::Alu;
    /// use apex_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 5, 10), 15);
    /// assert_eq!(Alu::execute(AluOp::Sub, 3, 7), -4);
    /// assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), i32::MIN);
    /// assert_eq!(Alu::execute(AluOp::Xor, 0b1100, 0b1010), 0b0110);
    /// ```
    pub const fn execute(op: AluOp, a: i32, b: i32) -> i32 {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul => arithmetic::execute(op, a, b),
            AluOp::And | AluOp::Or | AluOp::Xor => logic::execute(op, a, b),
        }
    }
}
