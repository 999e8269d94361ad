//! Simulator: owns the CPU and drives it.
//!
//! All mutation goes through [`Simulator::step`] and the run helpers; every
//! other method is a read-only view of the machine.

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::common::error::Result;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::arch::{DataMemory, Flags, Gpr};
use crate::core::pipeline::latches::PipelineLatches;
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::isa::Instruction;
use crate::sim::loader;
use crate::stats::SimStats;

/// Outcome of a bounded or unbounded run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles executed since construction.
    pub cycles: u64,
    /// Instructions committed since construction.
    pub instructions: u64,
    /// Whether `HALT` committed.
    pub halted: bool,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.halted { "Complete" } else { "Stopped" };
        write!(
            f,
            "Simulation {verb}, cycles = {} instructions = {}",
            self.cycles, self.instructions
        )
    }
}

/// Top-level simulator: one APEX CPU running one program.
///
/// # Examples
///
/// ```
/// use apex_core::{Config, Simulator};
///
/// let src = "MOVC,R0,#5\nMOVC,R1,#10\nADD,R2,R0,R1\nHALT\n";
/// let mut sim = Simulator::from_source(src, &Config::default()).unwrap();
/// let summary = sim.run().unwrap();
///
/// assert!(summary.halted);
/// assert_eq!(summary.instructions, 4);
/// assert_eq!(sim.registers().read(2), 15);
/// ```
#[derive(Debug)]
pub struct Simulator {
    cpu: Cpu,
}

impl Simulator {
    /// Creates a simulator for an already decoded program.
    ///
    /// # Errors
    ///
    /// The construction errors of [`Cpu::new`].
    pub fn new(program: Vec<Instruction>, config: &Config) -> Result<Self> {
        Ok(Self {
            cpu: Cpu::new(program, config)?,
        })
    }

    /// Creates a simulator from a program listing.
    ///
    /// # Errors
    ///
    /// Parse errors from [`loader::parse_program`] and the construction
    /// errors of [`Cpu::new`].
    pub fn from_source(text: &str, config: &Config) -> Result<Self> {
        Self::new(loader::parse_program(text)?, config)
    }

    /// Creates a simulator from a program listing on disk.
    ///
    /// # Errors
    ///
    /// I/O and parse errors from [`loader::load_program`] and the construction
    /// errors of [`Cpu::new`].
    pub fn from_file(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        Self::new(loader::load_program(path)?, config)
    }

    /// Advances one cycle; returns `true` once `HALT` has committed.
    ///
    /// # Errors
    ///
    /// See [`Cpu::step`].
    pub fn step(&mut self) -> Result<bool> {
        self.cpu.step()
    }

    /// Steps until `HALT` commits or `max_cycles` total cycles have run.
    ///
    /// A simulator that already halted returns its summary without stepping.
    ///
    /// # Errors
    ///
    /// The first fatal error raised by a cycle.
    pub fn run_until(&mut self, max_cycles: u64) -> Result<RunSummary> {
        while !self.cpu.halted && self.cpu.clock < max_cycles {
            let _ = self.cpu.step()?;
        }
        let summary = self.summary();
        info!(
            cycles = summary.cycles,
            instructions = summary.instructions,
            halted = summary.halted,
            "run finished"
        );
        Ok(summary)
    }

    /// Steps until `HALT` commits.
    ///
    /// # Errors
    ///
    /// The first fatal error raised by a cycle.
    pub fn run(&mut self) -> Result<RunSummary> {
        self.run_until(u64::MAX)
    }

    /// Cycle and completion counts so far.
    pub const fn summary(&self) -> RunSummary {
        RunSummary {
            cycles: self.cpu.clock,
            instructions: self.cpu.stats.instructions_retired,
            halted: self.cpu.halted,
        }
    }

    /// The underlying CPU.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Register file.
    pub const fn registers(&self) -> &Gpr {
        &self.cpu.regs
    }

    /// Condition flags.
    pub const fn flags(&self) -> &Flags {
        &self.cpu.flags
    }

    /// Data memory.
    pub const fn data_memory(&self) -> &DataMemory {
        &self.cpu.data_memory
    }

    /// One data memory word.
    ///
    /// # Errors
    ///
    /// [`SimError::MemoryOutOfRange`](crate::common::error::SimError::MemoryOutOfRange)
    /// if `address` is outside data memory.
    pub fn memory_word(&self, address: i32) -> Result<i32> {
        self.cpu.data_memory.read(address)
    }

    /// Address of the next fetch.
    pub const fn pc(&self) -> i32 {
        self.cpu.pc
    }

    /// Pending-writer counts.
    pub const fn scoreboard(&self) -> &Scoreboard {
        &self.cpu.scoreboard
    }

    /// Stage latches.
    pub const fn latches(&self) -> &PipelineLatches {
        &self.cpu.latches
    }

    /// Cycles executed so far.
    pub const fn cycle(&self) -> u64 {
        self.cpu.clock
    }

    /// Instructions committed so far.
    pub const fn instructions_completed(&self) -> u64 {
        self.cpu.stats.instructions_retired
    }

    /// Whether `HALT` has committed.
    pub const fn is_halted(&self) -> bool {
        self.cpu.halted
    }

    /// Performance counters.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// See [`Cpu::render_state`].
    pub fn render_state(&self) -> String {
        self.cpu.render_state()
    }

    /// See [`Cpu::render_full_state`].
    pub fn render_full_state(&self) -> String {
        self.cpu.render_full_state()
    }

    /// See [`Cpu::render_pipeline`].
    pub fn render_pipeline(&self) -> String {
        self.cpu.render_pipeline()
    }
}
