//! Per-cycle pipeline driver.
//!
//! Stages run in reverse pipeline order, Writeback → Memory → Execute →
//! Decode → Fetch, so each stage consumes the latch its predecessor filled in
//! the previous cycle before that predecessor overwrites it. This gives
//! clocked-latch behavior without double buffering.

use crate::common::error::Result;
use crate::core::Cpu;
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};

/// Advances every stage by one cycle.
///
/// # Returns
///
/// `true` if `HALT` committed in writeback. No other stage runs in that cycle.
///
/// # Errors
///
/// Propagates fatal errors raised by any stage.
pub fn tick(cpu: &mut Cpu) -> Result<bool> {
    if wb_stage(cpu)? {
        return Ok(true);
    }
    mem_stage(cpu)?;
    execute_stage(cpu)?;
    decode_stage(cpu);
    fetch_stage(cpu)?;
    Ok(false)
}
