//! ISA tests.

/// Listing decoder.
pub mod decode;

/// Disassembler output.
pub mod disasm;
