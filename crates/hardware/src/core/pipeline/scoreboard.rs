//! Busy-count scoreboard for register dependency tracking.
//!
//! Each register has a count of issued, uncommitted instructions that will
//! write it. A count is raised when an instruction issues from decode and
//! lowered when it commits, so `count(r) > 0` exactly when some in-flight
//! instruction targets `r`. Counts rather than a single tag let two writers of
//! the same register be in flight at once.

use crate::common::error::{Result, SimError};
use crate::isa::Instruction;

/// Per-register outstanding-writer counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    busy: Vec<u32>,
}

impl Scoreboard {
    /// Create a scoreboard for `num_registers` registers with nothing pending.
    pub fn new(num_registers: usize) -> Self {
        Self {
            busy: vec![0; num_registers],
        }
    }

    /// Record one more pending writer of `reg`.
    pub fn reserve(&mut self, reg: usize) {
        self.busy[reg] += 1;
    }

    /// Record that one pending writer of `reg` has committed.
    ///
    /// Returns `false`, leaving the count at zero, if `reg` had no pending
    /// writer.
    pub fn release(&mut self, reg: usize) -> bool {
        let slot = &mut self.busy[reg];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Reserve every register `insn` writes.
    pub fn reserve_for(&mut self, insn: &Instruction) {
        for reg in insn.written_registers() {
            self.reserve(reg);
        }
    }

    /// Release every register `insn` writes.
    ///
    /// # Errors
    ///
    /// [`SimError::ScoreboardUnderflow`] for the first written register with
    /// no pending writer.
    pub fn release_for(&mut self, insn: &Instruction) -> Result<()> {
        for reg in insn.written_registers() {
            if !self.release(reg) {
                return Err(SimError::ScoreboardUnderflow { reg });
            }
        }
        Ok(())
    }

    /// Number of pending writers of `reg`.
    pub fn count(&self, reg: usize) -> u32 {
        self.busy[reg]
    }

    /// Whether `reg` has a pending writer.
    pub fn is_busy(&self, reg: usize) -> bool {
        self.busy[reg] > 0
    }

    /// Whether no register has a pending writer.
    pub fn is_clear(&self) -> bool {
        self.busy.iter().all(|&c| c == 0)
    }

    /// All counts in register order.
    pub fn counts(&self) -> &[u32] {
        &self.busy
    }
}
