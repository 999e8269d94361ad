//! APEX opcodes and their textual operand layouts.

use std::fmt;

/// Every operation in the APEX instruction set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `Rd = Rs1 + Rs2`
    Add,
    /// `Rd = Rs1 - Rs2`
    Sub,
    /// `Rd = Rs1 * Rs2`
    Mul,
    /// `Rd = Rs1 & Rs2`
    And,
    /// `Rd = Rs1 | Rs2`
    Or,
    /// `Rd = Rs1 ^ Rs2`
    Xor,
    /// `Rd = Rs1 + imm`
    Addl,
    /// `Rd = Rs1 - imm`
    Subl,
    /// `Rd = imm`
    Movc,
    /// Sets flags from `Rs1` compared with `Rs2`.
    Cmp,
    /// Sets flags from `Rs1` compared with `imm`.
    Cml,
    /// `Rd = M[Rs1 + imm]`
    Load,
    /// `Rd = M[Rs1 + imm]`, then `Rs1 += 4`.
    Loadp,
    /// `M[Rs2 + imm] = Rs1`
    Store,
    /// `M[Rs2 + imm] = Rs1`, then `Rs2 += 4`.
    Storep,
    /// `pc = Rs1 + imm`
    Jump,
    /// `Rd = pc + 4`, `pc = Rs1 + imm`
    Jalr,
    /// Branch if the zero flag is set.
    Bz,
    /// Branch if the zero flag is clear.
    Bnz,
    /// Branch if the positive flag is set.
    Bp,
    /// Branch if the positive flag is clear.
    Bnp,
    /// Branch if the negative flag is set.
    Bn,
    /// Branch if the negative flag is clear.
    Bnn,
    /// No operation.
    #[default]
    Nop,
    /// Stops fetch; ends the run when it commits.
    Halt,
}

/// Operand layout of an opcode in program text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandFormat {
    /// `Rd,Rs1,Rs2`
    RegRegReg,
    /// `Rd,Rs1,#imm`
    RegRegImm,
    /// `Rd,#imm`
    RegImm,
    /// `Rs1,Rs2,#imm` where `Rs1` is the stored value and `Rs2` the base.
    Store,
    /// `Rs1,Rs2`
    Compare,
    /// `Rs1,#imm`
    SourceImm,
    /// `#imm`
    Imm,
    /// No operands.
    None,
}

impl Opcode {
    /// All opcodes, in encoding order.
    pub const ALL: [Self; 25] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Addl,
        Self::Subl,
        Self::Movc,
        Self::Cmp,
        Self::Cml,
        Self::Load,
        Self::Loadp,
        Self::Store,
        Self::Storep,
        Self::Jump,
        Self::Jalr,
        Self::Bz,
        Self::Bnz,
        Self::Bp,
        Self::Bnp,
        Self::Bn,
        Self::Bnn,
        Self::Nop,
        Self::Halt,
    ];

    /// Upper-case mnemonic as written in program text.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Addl => "ADDL",
            Self::Subl => "SUBL",
            Self::Movc => "MOVC",
            Self::Cmp => "CMP",
            Self::Cml => "CML",
            Self::Load => "LOAD",
            Self::Loadp => "LOADP",
            Self::Store => "STORE",
            Self::Storep => "STOREP",
            Self::Jump => "JUMP",
            Self::Jalr => "JALR",
            Self::Bz => "BZ",
            Self::Bnz => "BNZ",
            Self::Bp => "BP",
            Self::Bnp => "BNP",
            Self::Bn => "BN",
            Self::Bnn => "BNN",
            Self::Nop => "NOP",
            Self::Halt => "HALT",
        }
    }

    /// Looks up an opcode by mnemonic, ignoring ASCII case.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(text))
    }

    /// Operand layout used by the loader and the disassembler.
    pub const fn format(self) -> OperandFormat {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::And | Self::Or | Self::Xor => {
                OperandFormat::RegRegReg
            }
            Self::Addl | Self::Subl | Self::Load | Self::Loadp | Self::Jalr => {
                OperandFormat::RegRegImm
            }
            Self::Movc => OperandFormat::RegImm,
            Self::Store | Self::Storep => OperandFormat::Store,
            Self::Cmp => OperandFormat::Compare,
            Self::Cml | Self::Jump => OperandFormat::SourceImm,
            Self::Bz | Self::Bnz | Self::Bp | Self::Bnp | Self::Bn | Self::Bnn => {
                OperandFormat::Imm
            }
            Self::Nop | Self::Halt => OperandFormat::None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
