//! Instruction pipeline implementation.
//!
//! This module contains the five-stage in-order pipeline. It includes:
//! 1. **Engine:** The per-cycle driver that runs the stages in reverse order.
//! 2. **Hazards:** Stall and forwarding decisions for source operands.
//! 3. **Latches:** Per-stage instruction records.
//! 4. **Scoreboard:** Pending-writer counts per register.
//! 5. **Signals:** The per-opcode control table.
//! 6. **Stages:** Fetch, Decode, Execute, Memory, and Writeback.

/// Per-cycle driver.
pub mod engine;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Per-stage pipeline latches.
pub mod latches;

/// Register busy-count scoreboard.
pub mod scoreboard;

/// Control signals derived from the opcode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;
