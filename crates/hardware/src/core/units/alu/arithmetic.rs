//! ALU arithmetic operations.

use crate::core::pipeline::signals::AluOp;

/// Executes an arithmetic operation with 32-bit wrapping semantics.
///
/// Returns `0` for non-arithmetic opcodes.
pub const fn execute(op: AluOp, a: i32, b: i32) -> i32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::And | AluOp::Or | AluOp::Xor => 0,
    }
}
