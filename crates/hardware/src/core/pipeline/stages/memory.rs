//! Memory Access (MEM) Stage.
//!
//! Loads read `memory_address` into `result`; stores write `src1_value` to
//! it. Every other instruction passes through unchanged.

use tracing::trace;

use crate::common::error::Result;
use crate::core::Cpu;

/// Executes the memory access stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Errors
///
/// [`SimError::MemoryOutOfRange`](crate::common::error::SimError::MemoryOutOfRange)
/// if a load or store address lies outside data memory.
pub fn mem_stage(cpu: &mut Cpu) -> Result<()> {
    if !cpu.latches.memory.has_insn {
        cpu.trace_line("Memory         : EMPTY");
        return Ok(());
    }

    let mut latch = std::mem::take(&mut cpu.latches.memory);
    let ctrl = latch.ctrl();
    if ctrl.mem_read {
        latch.result = cpu.data_memory.read(latch.memory_address)?;
        trace!(address = latch.memory_address, value = latch.result, "load");
    } else if ctrl.mem_write {
        cpu.data_memory
            .write(latch.memory_address, latch.src1_value)?;
        trace!(address = latch.memory_address, value = latch.src1_value, "store");
    }

    cpu.trace_stage("Memory", &latch);
    cpu.latches.writeback = latch;
    Ok(())
}
