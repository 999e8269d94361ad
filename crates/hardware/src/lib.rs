//! APEX pipeline simulator library.
//!
//! This crate implements a cycle-accurate simulator for the five-stage in-order APEX pipeline:
//! 1. **Core:** Fetch, decode, execute, memory and writeback stages with a scoreboard,
//!    optional operand forwarding, and decode flush on taken branches.
//! 2. **Architecture:** Register file, condition flags, word-addressed data memory and code store.
//! 3. **ISA:** Opcode set, decoded instruction record, text decoder and disassembler.
//! 4. **Simulation:** Program loader, configuration, and statistics collection.

/// Common types and constants (error type, machine constants).
pub mod common;
/// Simulator configuration (defaults and JSON-loadable structures).
pub mod config;
/// CPU core (architectural state, pipeline, functional units).
pub mod core;
/// Instruction set (opcodes, instruction record, decoder, disassembler).
pub mod isa;
/// Program loader and the top-level simulator.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Main CPU type; holds architectural state, latches, scoreboard and stats.
pub use crate::core::Cpu;
/// Decoded instruction.
pub use crate::isa::Instruction;
/// Error type shared by every fallible operation.
pub use crate::common::error::SimError;
/// Top-level simulator; construct with `Simulator::from_file` or `Simulator::from_source`.
pub use crate::sim::simulator::Simulator;
