//! Data Hazard Detection and Forwarding.
//!
//! Decode runs after writeback, memory and execute in the same cycle, so by
//! the time it reads operands every issued, uncommitted instruction sits in
//! one of two latches:
//!
//! 1. **Memory latch:** the producer that executed this cycle. Its `result` is
//!    ready unless it is a load, whose data arrives in the memory stage.
//! 2. **Writeback latch:** the producer that finished memory this cycle. Its
//!    value is always ready.
//!
//! A busy source is taken from the youngest producer that writes it. Without
//! forwarding any busy source stalls decode until writeback commits it.

use crate::core::arch::Gpr;
use crate::core::pipeline::latches::{Latch, PipelineLatches};
use crate::core::pipeline::scoreboard::Scoreboard;

/// Latch a forwarded value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSource {
    /// Producer that executed in this cycle.
    Execute,
    /// Producer waiting in the writeback latch.
    Writeback,
}

/// Result of reading one source register in decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// No pending writer; value read from the register file.
    Ready(i32),
    /// Value bypassed from an in-flight producer.
    Forwarded(i32, ForwardSource),
    /// No usable value this cycle; decode must stall.
    Pending,
}

impl Operand {
    /// The operand value, if decode may issue with it.
    pub const fn value(self) -> Option<i32> {
        match self {
            Self::Ready(v) | Self::Forwarded(v, _) => Some(v),
            Self::Pending => None,
        }
    }
}

/// What `latch` can supply for `reg`.
///
/// Returns `None` if the latch does not write `reg`, `Some(None)` if it writes
/// `reg` but the value is not available yet, and `Some(Some(v))` otherwise.
/// The destination is checked before the post-increment base, matching the
/// commit order in writeback where `rd` is written last.
fn offer(latch: &Latch, reg: usize, result_ready: bool) -> Option<Option<i32>> {
    if !latch.has_insn {
        return None;
    }
    if latch.insn.destination() == Some(reg) {
        return Some(result_ready.then_some(latch.result));
    }
    if latch.insn.post_increment_base() == Some(reg) {
        return Some(Some(latch.post_increment));
    }
    None
}

/// Finds a forwarded value for `reg` among the in-flight producers.
///
/// # Arguments
///
/// * `reg` - Source register needed by the instruction in decode.
/// * `latches` - Pipeline latches after writeback, memory and execute have run.
///
/// # Returns
///
/// [`Operand::Forwarded`] from the youngest producer of `reg`, or
/// [`Operand::Pending`] when that producer is a load still waiting for memory
/// or no producer is found.
pub fn forward_operand(reg: usize, latches: &PipelineLatches) -> Operand {
    let executed = &latches.memory;
    let result_ready = !executed.ctrl().mem_read;
    if let Some(value) = offer(executed, reg, result_ready) {
        return value.map_or(Operand::Pending, |v| {
            Operand::Forwarded(v, ForwardSource::Execute)
        });
    }
    match offer(&latches.writeback, reg, true) {
        Some(Some(v)) => Operand::Forwarded(v, ForwardSource::Writeback),
        _ => Operand::Pending,
    }
}

/// Reads a source register for decode, applying the stall/forward policy.
///
/// # Arguments
///
/// * `reg` - Source register index.
/// * `regs` - Architectural register file.
/// * `scoreboard` - Pending-writer counts.
/// * `latches` - Pipeline latches after writeback, memory and execute have run.
/// * `forwarding` - Whether bypassing is enabled.
pub fn read_operand(
    reg: usize,
    regs: &Gpr,
    scoreboard: &Scoreboard,
    latches: &PipelineLatches,
    forwarding: bool,
) -> Operand {
    if !scoreboard.is_busy(reg) {
        Operand::Ready(regs.read(reg))
    } else if forwarding {
        forward_operand(reg, latches)
    } else {
        Operand::Pending
    }
}
