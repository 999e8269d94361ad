//! Instruction disassembler.
//!
//! Renders an [`Instruction`] back into the canonical listing form accepted by
//! [`decode_line`](crate::isa::decode::decode_line), for stage traces and
//! diagnostics.
//!
//! ```
//! use apex_core::isa::Instruction;
//!
//! assert_eq!(Instruction::movc(1, 10).to_string(), "MOVC,R1,#10");
//! ```

use std::fmt;

use crate::isa::instruction::Instruction;
use crate::isa::opcode::OperandFormat;

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.mnemonic();
        match self.opcode.format() {
            OperandFormat::RegRegReg => write!(f, "{op},R{},R{},R{}", self.rd, self.rs1, self.rs2),
            OperandFormat::RegRegImm => write!(f, "{op},R{},R{},#{}", self.rd, self.rs1, self.imm),
            OperandFormat::RegImm => write!(f, "{op},R{},#{}", self.rd, self.imm),
            OperandFormat::Store => write!(f, "{op},R{},R{},#{}", self.rs1, self.rs2, self.imm),
            OperandFormat::Compare => write!(f, "{op},R{},R{}", self.rs1, self.rs2),
            OperandFormat::SourceImm => write!(f, "{op},R{},#{}", self.rs1, self.imm),
            OperandFormat::Imm => write!(f, "{op},#{}", self.imm),
            OperandFormat::None => f.write_str(op),
        }
    }
}
