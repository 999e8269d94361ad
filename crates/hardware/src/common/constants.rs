//! Architectural constants.
//!
//! These mirror the fixed parameters of the APEX machine. Sizes that a user may
//! want to vary (register count, data memory size, code base) are only the
//! defaults; the live values come from [`Config`](crate::config::Config).

/// Address of the first instruction in the code segment.
pub const CODE_BASE: i32 = 4000;

/// Width of one instruction in the code segment, in address units.
pub const INSTRUCTION_SIZE: i32 = 4;

/// Amount added to the base register by `LOADP` and `STOREP`.
pub const POST_INCREMENT: i32 = 4;

/// Number of architectural registers at reset.
pub const NUM_REGISTERS: usize = 32;

/// Number of data memory words at reset.
pub const DATA_MEMORY_SIZE: usize = 4096;

/// Number of leading data memory words included in a full state dump.
pub const DUMP_MEMORY_WORDS: usize = 100;
