use apex_core::core::arch::Flags;
use apex_core::core::pipeline::signals::{Condition, ControlTransfer};
use apex_core::core::units::bru::Bru;

#[test]
fn test_jump_target_from_register() {
    let res = Bru::resolve(ControlTransfer::Jump, &Flags::new(), 4000, 4100, 8);
    assert_eq!(res.target, Some(4108));
    assert_eq!(res.link, None);
}

#[test]
fn test_jalr_links_past_itself() {
    let res = Bru::resolve(ControlTransfer::JumpAndLink, &Flags::new(), 4020, 4000, 0);
    assert_eq!(res.target, Some(4000));
    assert_eq!(res.link, Some(4024));
}

#[test]
fn test_branch_relative_to_own_pc() {
    let mut flags = Flags::new();
    let taken = Bru::resolve(
        ControlTransfer::Branch(Condition::Zero),
        &flags,
        4016,
        0,
        -8,
    );
    assert_eq!(taken.target, Some(4008));

    flags.set_from_result(1);
    let not_taken = Bru::resolve(
        ControlTransfer::Branch(Condition::Zero),
        &flags,
        4016,
        0,
        -8,
    );
    assert_eq!(not_taken.target, None);
}
