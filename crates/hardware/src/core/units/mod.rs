//! Execution units used by the execute stage.
//!
//! 1. **ALU:** Integer arithmetic and logic on 32-bit signed values.
//! 2. **BRU:** Branch and jump resolution against the condition flags.

/// Arithmetic logic unit.
pub mod alu;

/// Branch resolution unit.
pub mod bru;
