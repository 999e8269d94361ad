//! Disassembler Tests.

use apex_core::isa::decode::decode_line;
use apex_core::isa::{Instruction, Opcode};

#[test]
fn test_every_opcode_reads_back() {
    for op in Opcode::ALL {
        let insn = Instruction::new(op, 1, 2, 3, -4);
        let canonical = decode_line(1, &insn.to_string()).unwrap().unwrap();
        // Fields the opcode does not use are dropped by the text form.
        assert_eq!(canonical.to_string(), insn.to_string(), "{op}");
        assert_eq!(canonical.opcode, op);
    }
}

#[test]
fn test_examples() {
    assert_eq!(Instruction::movc(1, 10).to_string(), "MOVC,R1,#10");
    assert_eq!(Instruction::branch(Opcode::Bz, 8).to_string(), "BZ,#8");
    assert_eq!(Instruction::halt().to_string(), "HALT");
    assert_eq!(Instruction::jump(2, -4).to_string(), "JUMP,R2,#-4");
}
