//! Writeback (WB) Stage.
//!
//! Commits the instruction's register writes, releases its scoreboard
//! reservations and counts it as completed. When the post-increment base and
//! `rd` of a `LOADP` are the same register, the loaded value wins.

use tracing::{debug, trace};

use crate::common::error::Result;
use crate::core::Cpu;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Returns
///
/// `true` if the committed instruction was `HALT`.
///
/// # Errors
///
/// [`SimError::ScoreboardUnderflow`](crate::common::error::SimError::ScoreboardUnderflow)
/// if the instruction's reservations were already released.
pub fn wb_stage(cpu: &mut Cpu) -> Result<bool> {
    if !cpu.latches.writeback.has_insn {
        cpu.trace_line("Writeback      : EMPTY");
        return Ok(false);
    }

    let latch = std::mem::take(&mut cpu.latches.writeback);
    let insn = latch.insn;
    let ctrl = latch.ctrl();

    if let Some(base) = insn.post_increment_base() {
        cpu.regs.write(base, latch.post_increment);
    }
    if let Some(rd) = insn.destination() {
        cpu.regs.write(rd, latch.result);
    }
    if latch.reserved {
        cpu.scoreboard.release_for(&insn)?;
    }

    cpu.stats.record_retire(ctrl.class);
    cpu.trace_stage("Writeback", &latch);
    trace!(pc = latch.pc, insn = %insn, result = latch.result, "committed");

    if ctrl.halt {
        debug!(pc = latch.pc, "HALT committed");
    }
    Ok(ctrl.halt)
}
