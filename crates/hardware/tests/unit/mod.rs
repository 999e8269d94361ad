//! # Unit Components
//!
//! Organizes the unit tests by the crate module they exercise.



/// Opcode table, text decoder and disassembler.
pub mod isa;


/// Statistics counters and reports.
pub mod stats;
