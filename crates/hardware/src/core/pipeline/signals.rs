//! Pipeline control signals.
//!
//! One table, [`ControlSignals::for_opcode`], describes what every stage does
//! with each opcode. The stages dispatch on these signals rather than on the
//! opcode itself, so no stage can disagree with another about an opcode.
//!
//! 1. **Operation Classification:** ALU operation, compare, address generation, control transfer.
//! 2. **Operand Selection:** Whether the second ALU input is `src2` or the immediate.
//! 3. **Memory Control:** Load, store and post-increment behavior.
//! 4. **Statistics:** The retire class counted at writeback.

use crate::core::arch::Flags;
use crate::isa::Opcode;

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition.
    #[default]
    Add,
    /// Integer subtraction.
    Sub,
    /// Integer multiply (low 32 bits).
    Mul,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
}

/// Source of the second ALU operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// `src2_value` read in decode.
    #[default]
    Reg2,
    /// The instruction's immediate.
    Imm,
}

/// Which source value is the base of a memory address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressBase {
    /// `src1_value` (loads).
    Src1,
    /// `src2_value` (stores).
    Src2,
}

/// Flag test of a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    /// `BZ`
    Zero,
    /// `BNZ`
    NotZero,
    /// `BP`
    Positive,
    /// `BNP`
    NotPositive,
    /// `BN`
    Negative,
    /// `BNN`
    NotNegative,
}

impl Condition {
    /// Evaluates the test against the current flags.
    pub const fn holds(self, flags: &Flags) -> bool {
        match self {
            Self::Zero => flags.zero,
            Self::NotZero => !flags.zero,
            Self::Positive => flags.positive,
            Self::NotPositive => !flags.positive,
            Self::Negative => flags.negative,
            Self::NotNegative => !flags.negative,
        }
    }
}

/// Kind of control transfer an instruction may perform in execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlTransfer {
    /// `pc = src1 + imm`
    Jump,
    /// `result = pc + 4`, `pc = src1 + imm`
    JumpAndLink,
    /// `pc = pc + imm` when the condition holds.
    Branch(Condition),
}

/// Execute-stage operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecOp {
    /// Nothing to compute (`NOP`, `HALT`).
    #[default]
    None,
    /// `result = alu(src1, b)`.
    Alu(AluOp),
    /// `result = imm`.
    MoveImm,
    /// Flags from `src1` compared with `b`.
    Compare,
    /// `memory_address = base + imm`.
    Address(AddressBase),
    /// Branch or jump resolution.
    Control(ControlTransfer),
}

/// Retire class, used for the instruction mix statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstClass {
    /// Arithmetic, logic, move and compare.
    #[default]
    Alu,
    /// `LOAD`, `LOADP`.
    Load,
    /// `STORE`, `STOREP`.
    Store,
    /// Branches and jumps.
    Branch,
    /// `NOP`, `HALT`.
    System,
}

/// Per-opcode behavior consumed by the execute, memory and writeback stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Execute-stage operation.
    pub exec: ExecOp,
    /// Second operand for [`ExecOp::Alu`] and [`ExecOp::Compare`].
    pub b_src: OpBSrc,
    /// Arithmetic results update the flags.
    pub sets_flags: bool,
    /// Memory stage reads `memory_address` into `result`.
    pub mem_read: bool,
    /// Memory stage writes `src1_value` to `memory_address`.
    pub mem_write: bool,
    /// The address base register also receives `base + 4`.
    pub post_increment: bool,
    /// Committing this instruction ends the run.
    pub halt: bool,
    /// Retire class.
    pub class: InstClass,
}

impl ControlSignals {
    /// Control signals for `op`.
    pub const fn for_opcode(op: Opcode) -> Self {
        const fn alu(op: AluOp, b_src: OpBSrc) -> ControlSignals {
            ControlSignals {
                exec: ExecOp::Alu(op),
                b_src,
                sets_flags: true,
                mem_read: false,
                mem_write: false,
                post_increment: false,
                halt: false,
                class: InstClass::Alu,
            }
        }
        const fn plain(exec: ExecOp, class: InstClass) -> ControlSignals {
            ControlSignals {
                exec,
                b_src: OpBSrc::Reg2,
                sets_flags: false,
                mem_read: false,
                mem_write: false,
                post_increment: false,
                halt: false,
                class,
            }
        }
        const fn memory(base: AddressBase, post_increment: bool) -> ControlSignals {
            let load = matches!(base, AddressBase::Src1);
            ControlSignals {
                mem_read: load,
                mem_write: !load,
                post_increment,
                ..plain(
                    ExecOp::Address(base),
                    if load { InstClass::Load } else { InstClass::Store },
                )
            }
        }
        const fn branch(cond: Condition) -> ControlSignals {
            plain(
                ExecOp::Control(ControlTransfer::Branch(cond)),
                InstClass::Branch,
            )
        }

        match op {
            Opcode::Add => alu(AluOp::Add, OpBSrc::Reg2),
            Opcode::Sub => alu(AluOp::Sub, OpBSrc::Reg2),
            Opcode::Mul => alu(AluOp::Mul, OpBSrc::Reg2),
            Opcode::And => alu(AluOp::And, OpBSrc::Reg2),
            Opcode::Or => alu(AluOp::Or, OpBSrc::Reg2),
            Opcode::Xor => alu(AluOp::Xor, OpBSrc::Reg2),
            Opcode::Addl => alu(AluOp::Add, OpBSrc::Imm),
            Opcode::Subl => alu(AluOp::Sub, OpBSrc::Imm),
            Opcode::Movc => plain(ExecOp::MoveImm, InstClass::Alu),
            Opcode::Cmp => ControlSignals {
                sets_flags: true,
                ..plain(ExecOp::Compare, InstClass::Alu)
            },
            Opcode::Cml => ControlSignals {
                sets_flags: true,
                b_src: OpBSrc::Imm,
                ..plain(ExecOp::Compare, InstClass::Alu)
            },
            Opcode::Load => memory(AddressBase::Src1, false),
            Opcode::Loadp => memory(AddressBase::Src1, true),
            Opcode::Store => memory(AddressBase::Src2, false),
            Opcode::Storep => memory(AddressBase::Src2, true),
            Opcode::Jump => plain(
                ExecOp::Control(ControlTransfer::Jump),
                InstClass::Branch,
            ),
            Opcode::Jalr => plain(
                ExecOp::Control(ControlTransfer::JumpAndLink),
                InstClass::Branch,
            ),
            Opcode::Bz => branch(Condition::Zero),
            Opcode::Bnz => branch(Condition::NotZero),
            Opcode::Bp => branch(Condition::Positive),
            Opcode::Bnp => branch(Condition::NotPositive),
            Opcode::Bn => branch(Condition::Negative),
            Opcode::Bnn => branch(Condition::NotNegative),
            Opcode::Nop => plain(ExecOp::None, InstClass::System),
            Opcode::Halt => ControlSignals {
                halt: true,
                ..plain(ExecOp::None, InstClass::System)
            },
        }
    }
}
