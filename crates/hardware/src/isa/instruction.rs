//! Decoded APEX instruction.
//!
//! An [`Instruction`] is created once by the loader and never changes. Fields an
//! opcode does not use are left at zero; [`Instruction::sources`],
//! [`Instruction::destination`] and [`Instruction::post_increment_base`] say
//! which ones are meaningful.

use crate::isa::opcode::{Opcode, OperandFormat};

/// A single decoded instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Destination register index.
    pub rd: usize,
    /// First source register index (stored value for `STORE`/`STOREP`).
    pub rs1: usize,
    /// Second source register index (base for `STORE`/`STOREP`).
    pub rs2: usize,
    /// Signed immediate or branch offset.
    pub imm: i32,
}

impl Instruction {
    /// Builds an instruction from raw fields.
    pub const fn new(opcode: Opcode, rd: usize, rs1: usize, rs2: usize, imm: i32) -> Self {
        Self {
            opcode,
            rd,
            rs1,
            rs2,
            imm,
        }
    }

    /// `OP,Rd,Rs1,Rs2` for the register-register ALU group.
    pub const fn reg3(opcode: Opcode, rd: usize, rs1: usize, rs2: usize) -> Self {
        Self::new(opcode, rd, rs1, rs2, 0)
    }

    /// `OP,Rd,Rs1,#imm` for `ADDL`, `SUBL`, `LOAD`, `LOADP` and `JALR`.
    pub const fn reg_imm(opcode: Opcode, rd: usize, rs1: usize, imm: i32) -> Self {
        Self::new(opcode, rd, rs1, 0, imm)
    }

    /// `MOVC,Rd,#imm`
    pub const fn movc(rd: usize, imm: i32) -> Self {
        Self::new(Opcode::Movc, rd, 0, 0, imm)
    }

    /// `STORE,Rs1,Rs2,#imm` or `STOREP,...`: stores `value` at `base + imm`.
    pub const fn store(opcode: Opcode, value: usize, base: usize, imm: i32) -> Self {
        Self::new(opcode, 0, value, base, imm)
    }

    /// `CMP,Rs1,Rs2`
    pub const fn cmp(rs1: usize, rs2: usize) -> Self {
        Self::new(Opcode::Cmp, 0, rs1, rs2, 0)
    }

    /// `CML,Rs1,#imm`
    pub const fn cml(rs1: usize, imm: i32) -> Self {
        Self::new(Opcode::Cml, 0, rs1, 0, imm)
    }

    /// `JUMP,Rs1,#imm`
    pub const fn jump(rs1: usize, imm: i32) -> Self {
        Self::new(Opcode::Jump, 0, rs1, 0, imm)
    }

    /// `OP,#imm` for the six conditional branches.
    pub const fn branch(opcode: Opcode, offset: i32) -> Self {
        Self::new(opcode, 0, 0, 0, offset)
    }

    /// `NOP`
    pub const fn nop() -> Self {
        Self::new(Opcode::Nop, 0, 0, 0, 0)
    }

    /// `HALT`
    pub const fn halt() -> Self {
        Self::new(Opcode::Halt, 0, 0, 0, 0)
    }

    /// Mnemonic text, for debug output only.
    pub const fn mnemonic(&self) -> &'static str {
        self.opcode.mnemonic()
    }

    /// Source registers read in decode, as `[src1, src2]`.
    pub const fn sources(&self) -> [Option<usize>; 2] {
        match self.opcode.format() {
            OperandFormat::RegRegReg | OperandFormat::Store | OperandFormat::Compare => {
                [Some(self.rs1), Some(self.rs2)]
            }
            OperandFormat::RegRegImm | OperandFormat::SourceImm => [Some(self.rs1), None],
            OperandFormat::RegImm | OperandFormat::Imm | OperandFormat::None => [None, None],
        }
    }

    /// Register receiving `result` at writeback, if any.
    pub const fn destination(&self) -> Option<usize> {
        match self.opcode.format() {
            OperandFormat::RegRegReg | OperandFormat::RegRegImm | OperandFormat::RegImm => {
                Some(self.rd)
            }
            _ => None,
        }
    }

    /// Base register that receives `base + 4` for post-increment opcodes.
    pub const fn post_increment_base(&self) -> Option<usize> {
        match self.opcode {
            Opcode::Loadp => Some(self.rs1),
            Opcode::Storep => Some(self.rs2),
            _ => None,
        }
    }

    /// Every register this instruction reserves in the scoreboard.
    ///
    /// A `LOADP` whose destination is also its base appears twice and holds
    /// two reservations.
    pub fn written_registers(&self) -> impl Iterator<Item = usize> {
        self.destination()
            .into_iter()
            .chain(self.post_increment_base())
    }

    /// Every register the instruction names, read or written.
    pub fn registers(&self) -> impl Iterator<Item = usize> {
        let [src1, src2] = self.sources();
        src1.into_iter().chain(src2).chain(self.destination())
    }

    /// Whether the instruction is `HALT`.
    pub const fn is_halt(&self) -> bool {
        matches!(self.opcode, Opcode::Halt)
    }
}
