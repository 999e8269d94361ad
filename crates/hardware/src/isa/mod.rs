//! APEX Instruction Set Architecture.
//!
//! Contains the opcode set, the decoded instruction record, the text decoder used
//! by the loader, and the disassembler used by traces.

/// Text decoding of program listings.
pub mod decode;

/// `Display` rendering of instructions in listing form.
pub mod disasm;

/// Decoded instruction record and register-usage queries.
pub mod instruction;

/// Opcode enumeration and operand layouts.
pub mod opcode;

pub use instruction::Instruction;
pub use opcode::{Opcode, OperandFormat};
