//! Main Execution Loop.
//!
//! This module implements the execution cycle of the CPU. It performs the following:
//! 1. **Cycle Stepping:** Runs the pipeline driver once and advances the clock.
//! 2. **Control Transfer:** Flushes decode and steers fetch after a taken branch or jump.

use tracing::{debug, info};

use super::Cpu;
use crate::common::error::{Result, SimError};
use crate::core::pipeline::engine;

impl Cpu {
    /// Advances the pipeline by one cycle.
    ///
    /// # Returns
    ///
    /// `true` if `HALT` committed during this cycle.
    ///
    /// # Errors
    ///
    /// [`SimError::Halted`] if the pipeline already halted, otherwise any fatal
    /// error raised by a stage.
    pub fn step(&mut self) -> Result<bool> {
        if self.halted {
            return Err(SimError::Halted);
        }
        if self.tracing_enabled() {
            eprintln!("--------------------------------------------");
            eprintln!("Clock Cycle #: {}", self.clock + 1);
            eprintln!("--------------------------------------------");
        }

        let halted = engine::tick(self)?;
        self.clock += 1;
        self.stats.cycles += 1;

        if halted {
            self.halted = true;
            info!(
                cycles = self.clock,
                instructions = self.stats.instructions_retired,
                "simulation complete"
            );
        }
        Ok(halted)
    }

    /// Applies a taken control transfer to `target`.
    ///
    /// Discards the instruction waiting in decode, releasing any scoreboard
    /// reservation it holds, re-arms fetch at `target`, and makes fetch skip
    /// the rest of this cycle.
    ///
    /// # Errors
    ///
    /// [`SimError::ScoreboardUnderflow`] if the discarded instruction's
    /// reservations were already released.
    pub fn redirect(&mut self, target: i32) -> Result<()> {
        let discarded = std::mem::take(&mut self.latches.decode);
        if discarded.has_insn {
            if discarded.reserved {
                self.scoreboard.release_for(&discarded.insn)?;
            }
            self.stats.flushes += 1;
            debug!(pc = discarded.pc, insn = %discarded.insn, "flushed from decode");
        }

        debug!(from = self.pc, to = target, "redirect");
        self.pc = target;
        self.stalled = false;
        self.redirect_pending = true;
        self.latches.fetch.has_insn = true;
        Ok(())
    }
}
