//! Text decoder for APEX program listings.
//!
//! One instruction per line, fields separated by commas and/or whitespace:
//!
//! ```text
//! MOVC,R0,#5
//! ADD,R2,R0,R1      ; trailing comments start with ';' or '//'
//! BZ,#-8
//! ```
//!
//! Opcodes are case-insensitive. Registers are written `R<n>`, immediates `#<n>`.

use crate::common::error::{Result, SimError};
use crate::isa::instruction::Instruction;
use crate::isa::opcode::{Opcode, OperandFormat};

/// Decodes a single line.
///
/// # Arguments
///
/// * `line_no` - 1-based line number used in error messages.
/// * `text` - Raw line contents.
///
/// # Returns
///
/// `Ok(None)` for blank and comment-only lines, otherwise the decoded instruction.
///
/// # Errors
///
/// [`SimError::UnknownOpcode`] for an unrecognized mnemonic and
/// [`SimError::Parse`] for a wrong operand count or malformed operand.
pub fn decode_line(line_no: usize, text: &str) -> Result<Option<Instruction>> {
    let code = strip_comment(text);
    let mut fields = code
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty());

    let Some(mnemonic) = fields.next() else {
        return Ok(None);
    };
    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| SimError::UnknownOpcode {
        line: line_no,
        opcode: mnemonic.to_string(),
    })?;
    let operands: Vec<&str> = fields.collect();

    let expected = match opcode.format() {
        OperandFormat::RegRegReg | OperandFormat::RegRegImm | OperandFormat::Store => 3,
        OperandFormat::RegImm | OperandFormat::Compare | OperandFormat::SourceImm => 2,
        OperandFormat::Imm => 1,
        OperandFormat::None => 0,
    };
    if operands.len() != expected {
        return Err(SimError::Parse {
            line: line_no,
            message: format!(
                "{} takes {expected} operand(s), found {}",
                opcode.mnemonic(),
                operands.len()
            ),
        });
    }

    let reg = |i: usize| parse_register(line_no, operands[i]);
    let imm = |i: usize| parse_immediate(line_no, operands[i]);

    let insn = match opcode.format() {
        OperandFormat::RegRegReg => Instruction::reg3(opcode, reg(0)?, reg(1)?, reg(2)?),
        OperandFormat::RegRegImm => Instruction::reg_imm(opcode, reg(0)?, reg(1)?, imm(2)?),
        OperandFormat::RegImm => Instruction::movc(reg(0)?, imm(1)?),
        OperandFormat::Store => Instruction::store(opcode, reg(0)?, reg(1)?, imm(2)?),
        OperandFormat::Compare => Instruction::cmp(reg(0)?, reg(1)?),
        OperandFormat::SourceImm => Instruction::new(opcode, 0, reg(0)?, 0, imm(1)?),
        OperandFormat::Imm => Instruction::branch(opcode, imm(0)?),
        OperandFormat::None => Instruction::new(opcode, 0, 0, 0, 0),
    };
    Ok(Some(insn))
}

/// Decodes a whole listing, skipping blank and comment lines.
///
/// # Errors
///
/// The first error reported by [`decode_line`].
pub fn decode_program(text: &str) -> Result<Vec<Instruction>> {
    let mut program = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(insn) = decode_line(idx + 1, line)? {
            program.push(insn);
        }
    }
    Ok(program)
}

fn strip_comment(text: &str) -> &str {
    let end = [text.find(';'), text.find("//")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(text.len());
    &text[..end]
}

fn parse_register(line: usize, field: &str) -> Result<usize> {
    field
        .strip_prefix(['R', 'r'])
        .and_then(|n| n.parse::<usize>().ok())
        .ok_or_else(|| SimError::Parse {
            line,
            message: format!("expected a register like R3, found `{field}`"),
        })
}

fn parse_immediate(line: usize, field: &str) -> Result<i32> {
    field
        .strip_prefix('#')
        .and_then(|n| n.parse::<i32>().ok())
        .ok_or_else(|| SimError::Parse {
            line,
            message: format!("expected an immediate like #-4, found `{field}`"),
        })
}
