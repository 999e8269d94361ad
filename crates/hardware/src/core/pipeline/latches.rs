//! Pipeline latch structures for inter-stage communication.
//!
//! Every stage owns one [`Latch`]. A latch is a copy of the instruction's static
//! fields plus the values the stages compute for it as it moves
//! Fetch → Decode → Execute → Memory → Writeback. A latch with
//! `has_insn == false` is a bubble and has no side effects.
//!
//! The fetch latch doubles as the fetch enable: fetching `HALT` clears its
//! `has_insn`, and a taken branch sets it again.

use crate::core::pipeline::signals::ControlSignals;
use crate::isa::Instruction;

/// One stage's in-flight instruction.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Latch {
    /// Whether the latch holds a valid instruction.
    pub has_insn: bool,
    /// Address the instruction was fetched from.
    pub pc: i32,
    /// Static instruction fields.
    pub insn: Instruction,
    /// Value of the first source operand, set at issue.
    pub src1_value: i32,
    /// Value of the second source operand, set at issue.
    pub src2_value: i32,
    /// Value written to `rd` at writeback.
    pub result: i32,
    /// Data memory address for loads and stores.
    pub memory_address: i32,
    /// `base + 4` for `LOADP`/`STOREP`.
    pub post_increment: i32,
    /// Whether the instruction holds scoreboard reservations.
    pub reserved: bool,
}

impl Latch {
    /// A freshly fetched instruction.
    pub fn fetched(insn: Instruction, pc: i32) -> Self {
        Self {
            has_insn: true,
            pc,
            insn,
            ..Self::default()
        }
    }

    /// Control signals for the held instruction.
    pub const fn ctrl(&self) -> ControlSignals {
        ControlSignals::for_opcode(self.insn.opcode)
    }

    /// One trace line in the form `Execute        : pc(4008) ADD,R2,R0,R1`.
    pub fn render(&self, stage: &str) -> String {
        if self.has_insn {
            format!("{stage:<15}: pc({}) {}", self.pc, self.insn)
        } else {
            format!("{stage:<15}: EMPTY")
        }
    }
}

/// The five stage latches.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct PipelineLatches {
    /// Last fetched instruction; `has_insn` is the fetch enable.
    pub fetch: Latch,
    /// Instruction waiting to issue.
    pub decode: Latch,
    /// Instruction issued this cycle.
    pub execute: Latch,
    /// Instruction executed this cycle.
    pub memory: Latch,
    /// Instruction that finished memory this cycle.
    pub writeback: Latch,
}

impl PipelineLatches {
    /// Latches armed for the first fetch.
    pub fn new() -> Self {
        Self {
            fetch: Latch {
                has_insn: true,
                ..Latch::default()
            },
            ..Self::default()
        }
    }

    /// Issued, uncommitted instructions, youngest first.
    pub fn in_flight(&self) -> impl Iterator<Item = &Latch> + '_ {
        [&self.execute, &self.memory, &self.writeback]
            .into_iter()
            .filter(|l| l.has_insn)
    }

    /// True when no instruction sits in decode or later.
    pub fn is_drained(&self) -> bool {
        !self.decode.has_insn && self.in_flight().next().is_none()
    }

    /// `(stage name, latch)` in pipeline order.
    pub fn stages(&self) -> [(&'static str, &Latch); 5] {
        [
            ("Fetch", &self.fetch),
            ("Decode/RF", &self.decode),
            ("Execute", &self.execute),
            ("Memory", &self.memory),
            ("Writeback", &self.writeback),
        ]
    }
}
