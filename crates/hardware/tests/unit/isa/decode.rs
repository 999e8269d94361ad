//! Listing Decoder Tests.

use apex_core::common::error::SimError;
use apex_core::isa::decode::{decode_line, decode_program};
use apex_core::isa::{Instruction, Opcode};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("ADD,R2,R0,R1", Instruction::reg3(Opcode::Add, 2, 0, 1))]
#[case("addl R3, R4, #-12", Instruction::reg_imm(Opcode::Addl, 3, 4, -12))]
#[case("MOVC,R1,#10", Instruction::movc(1, 10))]
#[case("STOREP,R1,R6,#4", Instruction::store(Opcode::Storep, 1, 6, 4))]
#[case("CMP,R1,R2", Instruction::cmp(1, 2))]
#[case("CML,R1,#0", Instruction::cml(1, 0))]
#[case("JUMP,R3,#8", Instruction::jump(3, 8))]
#[case("JALR,R5,R3,#0", Instruction::reg_imm(Opcode::Jalr, 5, 3, 0))]
#[case("BNZ,#-8", Instruction::branch(Opcode::Bnz, -8))]
#[case("halt", Instruction::halt())]
#[case("NOP ; idle", Instruction::nop())]
fn test_decode_forms(#[case] text: &str, #[case] expected: Instruction) {
    assert_eq!(decode_line(1, text).unwrap(), Some(expected));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("; comment")]
#[case("// comment")]
fn test_blank_lines_skipped(#[case] text: &str) {
    assert_eq!(decode_line(1, text).unwrap(), None);
}

#[test]
fn test_unknown_opcode_reports_line() {
    let err = decode_program("MOVC,R0,#1\nFROB,R1\n").unwrap_err();
    match err {
        SimError::UnknownOpcode { line, opcode } => {
            assert_eq!(line, 2);
            assert_eq!(opcode, "FROB");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
#[case("ADD,R1,R2")]
#[case("MOVC,R1,5")]
#[case("MOVC,X1,#5")]
#[case("BZ,#eight")]
#[case("HALT,R0")]
fn test_malformed_operands(#[case] text: &str) {
    assert!(matches!(
        decode_line(7, text),
        Err(SimError::Parse { line: 7, .. })
    ));
}

#[test]
fn test_program_skips_comments() {
    let program = decode_program("; header\nMOVC,R0,#5\n\n// tail\nHALT\n").unwrap();
    assert_eq!(program, vec![Instruction::movc(0, 5), Instruction::halt()]);
}
