//! Branch Resolution Unit (BRU).
//!
//! Decides whether a control-transfer instruction is taken and where it goes.
//! The pipeline has no predictor: every instruction after a branch is fetched
//! sequentially, and a taken transfer is repaired by a flush.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::arch::Flags;
use crate::core::pipeline::signals::ControlTransfer;

/// Outcome of resolving a control transfer in execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// New program counter, or `None` when the branch falls through.
    pub target: Option<i32>,
    /// Link value written to `rd` (`JALR` only).
    pub link: Option<i32>,
}

/// Branch resolution unit.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Resolves a control transfer.
    ///
    /// # Arguments
    ///
    /// * `kind` - Transfer kind from the control signals.
    /// * `flags` - Current condition flags.
    /// * `pc` - Fetch address of the transfer instruction.
    /// * `src1` - Value of `Rs1` (jumps only).
    /// * `imm` - Immediate or branch offset.
    pub const fn resolve(
        kind: ControlTransfer,
        flags: &Flags,
        pc: i32,
        src1: i32,
        imm: i32,
    ) -> Resolution {
        match kind {
            ControlTransfer::Jump => Resolution {
                target: Some(src1.wrapping_add(imm)),
                link: None,
            },
            ControlTransfer::JumpAndLink => Resolution {
                target: Some(src1.wrapping_add(imm)),
                link: Some(pc.wrapping_add(INSTRUCTION_SIZE)),
            },
            ControlTransfer::Branch(cond) => Resolution {
                target: if cond.holds(flags) {
                    Some(pc.wrapping_add(imm))
                } else {
                    None
                },
                link: None,
            },
        }
    }
}
