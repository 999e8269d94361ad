//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Registers, condition flags, data memory and program counter.
//! 2. **Pipeline Control:** Stage latches, the scoreboard, and the stall/redirect signals.
//! 3. **Observability:** Stage tracing and human-readable state reports.

/// Cycle stepping and control-transfer handling.
pub mod execution;

use std::fmt::Write as _;

use tracing::info;

use crate::common::constants::DUMP_MEMORY_WORDS;
use crate::common::error::{Result, SimError};
use crate::config::Config;
use crate::core::arch::{CodeMemory, DataMemory, Flags, Gpr};
use crate::core::pipeline::latches::{Latch, PipelineLatches};
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::isa::Instruction;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state.
///
/// The stage functions in [`stages`](crate::core::pipeline::stages) take
/// `&mut Cpu`; outside code should go through
/// [`Simulator`](crate::sim::simulator::Simulator), which only hands out
/// shared references.
#[derive(Debug)]
pub struct Cpu {
    /// Loaded program.
    pub code: CodeMemory,
    /// General-purpose registers.
    pub regs: Gpr,
    /// Condition flags.
    pub flags: Flags,
    /// Data memory.
    pub data_memory: DataMemory,
    /// Program Counter of the next fetch.
    pub pc: i32,
    /// Stage latches.
    pub latches: PipelineLatches,
    /// Pending-writer counts.
    pub scoreboard: Scoreboard,
    /// Decode failed to issue this cycle.
    pub stalled: bool,
    /// A taken branch fired this cycle; fetch skips one cycle.
    pub redirect_pending: bool,
    /// Operand forwarding is enabled.
    pub forwarding: bool,
    /// Print stage contents to stderr each cycle.
    pub trace: bool,
    /// `HALT` has committed.
    pub halted: bool,
    /// Cycles executed so far.
    pub clock: u64,
    /// Performance counters.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU with `program` loaded at the configured code base.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidConfig`] if `config` fails validation.
    /// - [`SimError::EmptyProgram`] if `program` is empty.
    /// - [`SimError::InvalidRegister`] if an instruction names a register outside the
    ///   register file.
    pub fn new(program: Vec<Instruction>, config: &Config) -> Result<Self> {
        config.validate()?;
        let limit = config.general.num_registers;
        if let Some(reg) = program
            .iter()
            .flat_map(Instruction::registers)
            .find(|&r| r >= limit)
        {
            return Err(SimError::InvalidRegister { reg, limit });
        }

        let base = config.general.code_base;
        let code = CodeMemory::new(program, base)?;
        info!(
            instructions = code.len(),
            pc = base,
            forwarding = config.pipeline.forwarding,
            "initialized APEX CPU"
        );

        Ok(Self {
            code,
            regs: Gpr::new(limit),
            flags: Flags::new(),
            data_memory: DataMemory::new(config.memory.data_memory_size),
            pc: base,
            latches: PipelineLatches::new(),
            scoreboard: Scoreboard::new(limit),
            stalled: false,
            redirect_pending: false,
            forwarding: config.pipeline.forwarding,
            trace: config.general.trace,
            halted: false,
            clock: 0,
            stats: SimStats::default(),
        })
    }

    fn tracing_enabled(&self) -> bool {
        self.trace || cfg!(feature = "always-trace")
    }

    /// Prints one raw trace line when stage tracing is on.
    pub(crate) fn trace_line(&self, line: &str) {
        if self.tracing_enabled() {
            eprintln!("{line}");
        }
    }

    /// Prints a stage's latch when stage tracing is on.
    pub(crate) fn trace_stage(&self, stage: &str, latch: &Latch) {
        if self.tracing_enabled() {
            eprintln!("{}", latch.render(stage));
        }
    }

    /// Register file, flags and every non-zero data memory word.
    pub fn render_state(&self) -> String {
        let mut out = String::from("----------\nRegisters:\n----------\n");
        out.push_str(&self.regs.render());
        let _ = write!(
            out,
            "\nZero flag = {}\nPositive flag = {}\nNegative flag = {}\n",
            u8::from(self.flags.zero),
            u8::from(self.flags.positive),
            u8::from(self.flags.negative)
        );
        out.push_str("\n========== STATE OF DATA MEMORY ==========\n\n");
        out.push_str(&self.data_memory.render(None));
        out
    }

    /// Every register and the leading data memory words.
    pub fn render_full_state(&self) -> String {
        let mut out = String::from("\n== STATE OF UNIFIED REGISTER FILE ==\n\n");
        for (i, v) in self.regs.as_slice().iter().enumerate() {
            let _ = writeln!(out, "|    REG[{i}]\t|\tValue = {v}    |");
        }
        out.push_str("\n========== STATE OF DATA MEMORY ==========\n\n");
        out.push_str(&self.data_memory.render(Some(DUMP_MEMORY_WORDS)));
        out
    }

    /// One line per stage latch, in pipeline order.
    pub fn render_pipeline(&self) -> String {
        let mut out = String::new();
        for (name, latch) in self.latches.stages() {
            out.push_str(&latch.render(name));
            out.push('\n');
        }
        out
    }

    /// Prints [`Cpu::render_state`] to stdout.
    pub fn dump_state(&self) {
        print!("{}", self.render_state());
    }
}
