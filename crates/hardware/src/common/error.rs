//! Simulator error type.
//!
//! Every failure the simulator can report is a variant of [`SimError`]:
//! 1. **Construction:** empty programs, register indices outside the register file, bad configuration.
//! 2. **Loading:** unreadable files, unknown opcodes, malformed operands.
//! 3. **Execution:** fetches outside the code segment, out-of-range data memory accesses and
//!    scoreboard underflow.

use thiserror::Error;

/// Errors raised while building or running the pipeline.
#[derive(Debug, Error)]
pub enum SimError {
    /// The instruction source contained no instructions.
    #[error("program contains no instructions")]
    EmptyProgram,

    /// An instruction names a register the register file does not have.
    #[error("register R{reg} out of range (register file has {limit} registers)")]
    InvalidRegister {
        /// Offending register index.
        reg: usize,
        /// Number of registers in the register file.
        limit: usize,
    },

    /// Fetch reached a program counter with no instruction behind it.
    #[error("program counter {pc} is outside the code segment")]
    PcOutOfRange {
        /// Offending program counter.
        pc: i32,
    },

    /// A load or store computed an address outside data memory.
    #[error("data memory address {address} out of range (memory has {size} words)")]
    MemoryOutOfRange {
        /// Offending address.
        address: i32,
        /// Number of words in data memory.
        size: usize,
    },

    /// A program line used a mnemonic that is not part of the instruction set.
    #[error("line {line}: unknown opcode `{opcode}`")]
    UnknownOpcode {
        /// 1-based source line.
        line: usize,
        /// Mnemonic as written.
        opcode: String,
    },

    /// A program line had the wrong shape for its opcode.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based source line.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// An instruction released a scoreboard entry it never reserved.
    #[error("scoreboard release of R{reg} without a pending writer")]
    ScoreboardUnderflow {
        /// Register whose count was already zero.
        reg: usize,
    },

    /// `step` was called after `HALT` committed.
    #[error("pipeline has already halted")]
    Halted,

    /// A configuration value is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be deserialized.
    #[error("malformed configuration: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    /// Reading a program or configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;
