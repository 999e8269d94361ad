//! Program Loader.
//!
//! This module turns APEX program listings into instruction sequences. It performs:
//! 1. **File loading:** Reads a listing from disk.
//! 2. **Decoding:** Parses every line with the text decoder, skipping blanks and comments.
//! 3. **Validation:** Rejects listings that contain no instructions.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::common::error::{Result, SimError};
use crate::isa::Instruction;
use crate::isa::decode::decode_program;

/// Parses a program listing held in memory.
///
/// # Errors
///
/// Returns the decoder's [`SimError::Parse`] or [`SimError::UnknownOpcode`]
/// for the first bad line, or [`SimError::EmptyProgram`] when the listing
/// holds no instructions.
///
/// # Examples
///
/// ```
/// use apex_core::sim::loader::parse_program;
///
/// let program = parse_program("MOVC,R0,#5\n; done\nHALT\n").unwrap();
/// assert_eq!(program.len(), 2);
/// ```
pub fn parse_program(text: &str) -> Result<Vec<Instruction>> {
    let program = decode_program(text)?;
    if program.is_empty() {
        return Err(SimError::EmptyProgram);
    }
    Ok(program)
}

/// Reads and parses a program listing from disk.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read, otherwise the errors
/// of [`parse_program`].
pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<Instruction>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let program = parse_program(&text)?;
    info!(path = %path.display(), instructions = program.len(), "loaded program");
    Ok(program)
}
