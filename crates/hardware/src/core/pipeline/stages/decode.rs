//! Instruction Decode / Register Read (ID) Stage.
//!
//! Reads the source operands of the waiting instruction and either issues it
//! to execute or stalls. A busy source is usable only when forwarding supplies
//! it (see [`hazards`](crate::core::pipeline::hazards)). On issue the
//! instruction's written registers are reserved in the scoreboard. On a stall
//! the decode latch is left untouched and execute receives a bubble.

use tracing::trace;

use crate::core::Cpu;
use crate::core::pipeline::hazards::{self, ForwardSource, Operand};

/// Executes the instruction decode stage of the pipeline.
///
/// Sets `cpu.stalled` for the fetch stage that runs after it.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
pub fn decode_stage(cpu: &mut Cpu) {
    cpu.stalled = false;
    if !cpu.latches.decode.has_insn {
        cpu.trace_line("Decode/RF      : EMPTY");
        return;
    }

    let insn = cpu.latches.decode.insn;
    let mut values = [0; 2];
    let mut forwarded = [None; 2];

    for (slot, src) in insn.sources().into_iter().enumerate() {
        let Some(reg) = src else { continue };
        let operand = hazards::read_operand(
            reg,
            &cpu.regs,
            &cpu.scoreboard,
            &cpu.latches,
            cpu.forwarding,
        );
        match operand {
            Operand::Ready(v) => values[slot] = v,
            Operand::Forwarded(v, from) => {
                values[slot] = v;
                forwarded[slot] = Some(from);
            }
            Operand::Pending => {
                cpu.stalled = true;
                cpu.stats.stalls_data += 1;
                trace!(pc = cpu.latches.decode.pc, reg, "decode stalled");
                let line = cpu.latches.decode.render("Decode/RF");
                cpu.trace_line(&format!("{line} (stalled)"));
                return;
            }
        }
    }

    for (slot, from) in forwarded.iter().enumerate() {
        match from {
            Some(ForwardSource::Execute) => cpu.stats.forwards_execute += 1,
            Some(ForwardSource::Writeback) => cpu.stats.forwards_writeback += 1,
            None => continue,
        }
        trace!(slot, source = ?from, value = values[slot], "operand forwarded");
    }

    let mut latch = std::mem::take(&mut cpu.latches.decode);
    latch.src1_value = values[0];
    latch.src2_value = values[1];
    cpu.scoreboard.reserve_for(&insn);
    latch.reserved = true;

    cpu.trace_stage("Decode/RF", &latch);
    trace!(pc = latch.pc, insn = %insn, "issued");
    cpu.latches.execute = latch;
}
