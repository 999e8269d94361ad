use apex_core::core::pipeline::signals::AluOp;
use apex_core::core::units::alu::Alu;
use rstest::rstest;

#[rstest]
#[case(AluOp::Add, 5, 10, 15)]
#[case(AluOp::Sub, 5, 10, -5)]
#[case(AluOp::Mul, -3, 7, -21)]
#[case(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case(AluOp::Xor, 0b1100, 0b1010, 0b0110)]
#[case(AluOp::Add, i32::MAX, 1, i32::MIN)]
#[case(AluOp::Mul, i32::MAX, 2, -2)]
fn test_alu_ops(#[case] op: AluOp, #[case] a: i32, #[case] b: i32, #[case] expected: i32) {
    assert_eq!(Alu::execute(op, a, b), expected);
}
