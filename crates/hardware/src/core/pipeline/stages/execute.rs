//! Instruction Execute (EX) Stage.
//!
//! Computes ALU results, updates the condition flags, generates memory
//! addresses and post-increment values, and resolves branches and jumps. A
//! taken control transfer is handed to [`Cpu::redirect`] after the latch moves
//! on, which flushes decode and steers fetch.

use tracing::trace;

use crate::common::constants::POST_INCREMENT;
use crate::common::error::Result;
use crate::core::Cpu;
use crate::core::pipeline::signals::{AddressBase, ExecOp, OpBSrc};
use crate::core::units::alu::Alu;
use crate::core::units::bru::Bru;

/// Executes the instruction execute stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Errors
///
/// Propagates scoreboard errors from flushing decode on a taken transfer.
pub fn execute_stage(cpu: &mut Cpu) -> Result<()> {
    if !cpu.latches.execute.has_insn {
        cpu.trace_line("Execute        : EMPTY");
        return Ok(());
    }

    let mut latch = std::mem::take(&mut cpu.latches.execute);
    let ctrl = latch.ctrl();
    let imm = latch.insn.imm;
    let b = match ctrl.b_src {
        OpBSrc::Reg2 => latch.src2_value,
        OpBSrc::Imm => imm,
    };
    let mut redirect = None;

    match ctrl.exec {
        ExecOp::None => {}
        ExecOp::Alu(op) => {
            latch.result = Alu::execute(op, latch.src1_value, b);
            if ctrl.sets_flags {
                cpu.flags.set_from_result(latch.result);
            }
        }
        ExecOp::MoveImm => latch.result = imm,
        ExecOp::Compare => cpu.flags.set_from_compare(latch.src1_value, b),
        ExecOp::Address(base) => {
            let base = match base {
                AddressBase::Src1 => latch.src1_value,
                AddressBase::Src2 => latch.src2_value,
            };
            latch.memory_address = base.wrapping_add(imm);
            if ctrl.post_increment {
                latch.post_increment = base.wrapping_add(POST_INCREMENT);
            }
        }
        ExecOp::Control(kind) => {
            let res = Bru::resolve(kind, &cpu.flags, latch.pc, latch.src1_value, imm);
            if let Some(link) = res.link {
                latch.result = link;
            }
            if res.target.is_some() {
                cpu.stats.branches_taken += 1;
            } else {
                cpu.stats.branches_not_taken += 1;
            }
            redirect = res.target;
        }
    }

    cpu.trace_stage("Execute", &latch);
    trace!(pc = latch.pc, result = latch.result, flags = ?cpu.flags, "executed");
    cpu.latches.memory = latch;

    if let Some(target) = redirect {
        cpu.redirect(target)?;
    }
    Ok(())
}
