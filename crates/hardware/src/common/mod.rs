//! Common types and constants shared across the simulator.
//!
//! 1. **Constants:** Architectural constants of the APEX machine (code base, instruction width).
//! 2. **Error Handling:** The simulator-wide error type and `Result` alias.

/// Architectural constants (code segment base, instruction width, reset sizes).
pub mod constants;

/// Error type returned by construction, loading and stepping.
pub mod error;

pub use constants::{CODE_BASE, INSTRUCTION_SIZE, POST_INCREMENT};
pub use error::{Result, SimError};
