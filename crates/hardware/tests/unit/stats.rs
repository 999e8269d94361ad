//! Statistics Tests.
//!
//! Checks that the counters agree with what a program actually does and that
//! the text and JSON reports carry them.

use apex_core::stats::{STATS_SECTIONS, SimStats};
use pretty_assertions::assert_eq;

use crate::common::{ProgramBuilder, TestContext};

fn mixed_run() -> SimStats {
    let program = ProgramBuilder::new()
        .movc(6, 40)
        .movc(0, 2)
        .store(0, 6, 0)
        .load(1, 6, 0)
        .add(2, 1, 0)
        .cml(2, 4)
        .branch(apex_core::isa::Opcode::Bz, 8)
        .movc(3, 1)
        .nop()
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    let _ = ctx.run_to_halt();
    ctx.sim.stats().clone()
}

#[test]
fn test_instruction_mix() {
    let stats = mixed_run();
    // MOVC R3 sits in the branch shadow and is flushed.
    assert_eq!(stats.instructions_retired, 9);
    assert_eq!(stats.inst_alu, 4);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_branch, 1);
    assert_eq!(stats.inst_system, 2);
    assert_eq!(
        stats.instructions_retired,
        stats.inst_alu + stats.inst_load + stats.inst_store + stats.inst_branch + stats.inst_system
    );
}

#[test]
fn test_hazard_counters() {
    let stats = mixed_run();
    assert_eq!(stats.stalls_data, 1);
    assert_eq!(stats.flushes, 1);
    assert_eq!(stats.fetch_bubbles, 1);
    assert_eq!(stats.branches_taken, 1);
    assert!(stats.ipc() > 0.0 && stats.ipc() < 1.0);
}

#[test]
fn test_report_has_every_section() {
    let text = mixed_run().render_sections(&[]);
    for header in ["sim_cycles", "PIPELINE", "INSTRUCTION MIX", "CONTROL TRANSFER"] {
        assert!(text.contains(header), "missing {header}");
    }
    assert_eq!(STATS_SECTIONS.len(), 4);
}

#[test]
fn test_report_selects_sections() {
    let text = mixed_run().render_sections(&["branch".to_string()]);
    assert!(text.contains("branch.taken           1"));
    assert!(!text.contains("sim_cycles"));
}

#[test]
fn test_json_field_names() {
    let json = serde_json::to_value(mixed_run()).unwrap();
    assert_eq!(json["flushes"], 1);
    assert_eq!(json["inst_load"], 1);
}
