//! Instruction Fetch (IF) Stage.
//!
//! Reads the instruction at `pc` from the code store and hands it straight to
//! decode; fetch and decode share the same cycle boundary. Fetch sits idle
//! while decode is stalled, for one cycle after a redirect, and for good once
//! `HALT` has been fetched (until a taken branch re-arms it).

use tracing::trace;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::Result;
use crate::core::Cpu;
use crate::core::pipeline::latches::Latch;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Errors
///
/// Returns [`SimError::PcOutOfRange`](crate::common::error::SimError::PcOutOfRange)
/// when `pc` has no instruction behind it and nothing older is left in the
/// pipeline that could still redirect it. While an older instruction is in
/// flight an out-of-range fetch only idles, since a branch may yet replace
/// that path.
pub fn fetch_stage(cpu: &mut Cpu) -> Result<()> {
    if !cpu.latches.fetch.has_insn {
        cpu.trace_line("Fetch          : EMPTY");
        return Ok(());
    }
    if cpu.stalled {
        return Ok(());
    }
    if cpu.redirect_pending {
        cpu.redirect_pending = false;
        cpu.stats.fetch_bubbles += 1;
        trace!(pc = cpu.pc, "fetch skipped after redirect");
        return Ok(());
    }

    let pc = cpu.pc;
    let insn = match cpu.code.fetch(pc) {
        Ok(insn) => insn,
        Err(err) => {
            if cpu.latches.is_drained() {
                return Err(err);
            }
            trace!(pc, "fetch idle past end of code");
            return Ok(());
        }
    };

    let latch = Latch::fetched(insn, pc);
    cpu.trace_stage("Fetch", &latch);
    trace!(pc, insn = %insn, "fetched");

    cpu.pc = pc.wrapping_add(INSTRUCTION_SIZE);
    cpu.latches.decode = latch.clone();
    cpu.latches.fetch = latch;

    if insn.is_halt() {
        cpu.latches.fetch.has_insn = false;
    }
    Ok(())
}
