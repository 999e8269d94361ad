//! Core processor implementation.
//!
//! This module contains the CPU state, the instruction pipeline, the
//! architectural state it operates on, and the execution units used by the
//! execute stage.

/// Architectural state (registers, flags, data memory, code store).
pub mod arch;

/// CPU state container and cycle stepping.
pub mod cpu;

/// Instruction pipeline implementation (engine, stages, latches, hazards, scoreboard, signals).
pub mod pipeline;

/// Execution units (ALU, branch resolution).
pub mod units;

pub use self::cpu::Cpu;
