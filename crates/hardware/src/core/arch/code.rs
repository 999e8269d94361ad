//! Instruction store.
//!
//! The loaded program, addressed by program counter:
//! `index = (pc - base) / INSTRUCTION_SIZE`.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::{Result, SimError};
use crate::isa::Instruction;

/// Immutable array of decoded instructions starting at `base`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeMemory {
    base: i32,
    insns: Vec<Instruction>,
}

impl CodeMemory {
    /// Wraps a program placed at `base`.
    ///
    /// # Errors
    ///
    /// [`SimError::EmptyProgram`] if `insns` is empty.
    pub fn new(insns: Vec<Instruction>, base: i32) -> Result<Self> {
        if insns.is_empty() {
            return Err(SimError::EmptyProgram);
        }
        Ok(Self { base, insns })
    }

    /// Returns the instruction at `pc`.
    ///
    /// # Errors
    ///
    /// [`SimError::PcOutOfRange`] if `pc` is below the base, misaligned, or past the last
    /// instruction.
    pub fn fetch(&self, pc: i32) -> Result<Instruction> {
        let offset = pc
            .checked_sub(self.base)
            .filter(|off| *off >= 0 && off % INSTRUCTION_SIZE == 0)
            .ok_or(SimError::PcOutOfRange { pc })?;
        self.insns
            .get((offset / INSTRUCTION_SIZE) as usize)
            .copied()
            .ok_or(SimError::PcOutOfRange { pc })
    }

    /// Address of the first instruction.
    pub const fn base(&self) -> i32 {
        self.base
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.insns.len()
    }

    /// Always false; construction rejects empty programs.
    pub fn is_empty(&self) -> bool {
        self.insns.is_empty()
    }

    /// `(pc, instruction)` pairs in program order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &Instruction)> + '_ {
        (self.base..)
            .step_by(INSTRUCTION_SIZE as usize)
            .zip(self.insns.iter())
    }
}
