//! Architectural state of the APEX machine.
//!
//! 1. **Registers:** The general-purpose register file.
//! 2. **Flags:** Zero, positive and negative condition flags.
//! 3. **Memory:** Flat word-addressed data memory.
//! 4. **Code:** The immutable instruction store addressed by program counter.

/// Instruction store.
pub mod code;

/// Condition flags.
pub mod flags;

/// General-purpose register file.
pub mod gpr;

/// Data memory.
pub mod memory;

pub use code::CodeMemory;
pub use flags::Flags;
pub use gpr::Gpr;
pub use memory::DataMemory;
