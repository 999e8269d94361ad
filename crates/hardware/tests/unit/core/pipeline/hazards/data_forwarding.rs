//! Data Forwarding Tests.
//!
//! Verifies that `forward_operand` and `read_operand` supply in-flight values
//! to decode from the just-executed and writeback positions, and that whole
//! programs resolve read-after-write hazards without stalls when forwarding
//! is enabled.

use apex_core::core::arch::Gpr;
use apex_core::core::pipeline::hazards::{ForwardSource, Operand, forward_operand, read_operand};
use apex_core::core::pipeline::latches::{Latch, PipelineLatches};
use apex_core::core::pipeline::scoreboard::Scoreboard;
use apex_core::isa::{Instruction, Opcode};
use pretty_assertions::assert_eq;

use crate::common::{ProgramBuilder, TestContext};

/// Helper: an issued producer carrying `result`.
fn producer(insn: Instruction, result: i32) -> Latch {
    Latch {
        result,
        reserved: true,
        ..Latch::fetched(insn, 4000)
    }
}

#[test]
fn test_forward_from_execute_position() {
    let latches = PipelineLatches {
        memory: producer(Instruction::reg3(Opcode::Add, 2, 0, 1), 15),
        ..PipelineLatches::default()
    };
    assert_eq!(
        forward_operand(2, &latches),
        Operand::Forwarded(15, ForwardSource::Execute)
    );
}

#[test]
fn test_forward_from_writeback_position() {
    let latches = PipelineLatches {
        writeback: producer(Instruction::movc(3, -7), -7),
        ..PipelineLatches::default()
    };
    assert_eq!(
        forward_operand(3, &latches),
        Operand::Forwarded(-7, ForwardSource::Writeback)
    );
}

#[test]
fn test_unrelated_producers_do_not_forward() {
    let latches = PipelineLatches {
        memory: producer(Instruction::movc(1, 1), 1),
        writeback: producer(Instruction::movc(2, 2), 2),
        ..PipelineLatches::default()
    };
    assert_eq!(forward_operand(4, &latches), Operand::Pending);
}

#[test]
fn test_post_increment_base_forwards_incremented_value() {
    let mut storep = producer(Instruction::store(Opcode::Storep, 0, 6, 0), 0);
    storep.post_increment = 104;
    let latches = PipelineLatches {
        memory: storep,
        ..PipelineLatches::default()
    };
    assert_eq!(
        forward_operand(6, &latches),
        Operand::Forwarded(104, ForwardSource::Execute)
    );
}

#[test]
fn test_read_operand_ignores_latches_when_not_busy() {
    let mut regs = Gpr::new(8);
    regs.write(2, 11);
    let latches = PipelineLatches {
        memory: producer(Instruction::movc(2, 99), 99),
        ..PipelineLatches::default()
    };
    let scoreboard = Scoreboard::new(8);
    assert_eq!(
        read_operand(2, &regs, &scoreboard, &latches, true),
        Operand::Ready(11)
    );
}

#[test]
fn test_read_operand_without_forwarding_is_pending() {
    let regs = Gpr::new(8);
    let mut scoreboard = Scoreboard::new(8);
    scoreboard.reserve(2);
    let latches = PipelineLatches {
        memory: producer(Instruction::movc(2, 99), 99),
        ..PipelineLatches::default()
    };
    assert_eq!(
        read_operand(2, &regs, &scoreboard, &latches, false),
        Operand::Pending
    );
    assert_eq!(
        read_operand(2, &regs, &scoreboard, &latches, true).value(),
        Some(99)
    );
}

#[test]
fn test_back_to_back_dependencies_never_stall() {
    let program = ProgramBuilder::new()
        .movc(0, 5)
        .movc(1, 10)
        .add(2, 0, 1)
        .sub(3, 2, 0)
        .add(4, 3, 2)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    let _ = ctx.run_to_halt();

    assert_eq!(ctx.reg(2), 15);
    assert_eq!(ctx.reg(3), 10);
    assert_eq!(ctx.reg(4), 25);
    assert_eq!(ctx.sim.stats().stalls_data, 0);
    assert!(ctx.sim.stats().forwards_execute >= 3);
}

#[test]
fn test_forwarding_disabled_stalls_until_commit() {
    let program = ProgramBuilder::new()
        .movc(0, 5)
        .movc(1, 10)
        .add(2, 0, 1)
        .halt()
        .build();
    let mut ctx = TestContext::with_forwarding(program, false);
    let summary = ctx.run_to_halt();

    assert_eq!(ctx.reg(2), 15);
    assert_eq!(summary.cycles, 10);
    assert_eq!(ctx.sim.stats().stalls_data, 2);
    assert_eq!(ctx.sim.stats().forwards_execute, 0);
    assert_eq!(ctx.sim.stats().forwards_writeback, 0);
}

#[test]
fn test_younger_writer_wins() {
    let program = ProgramBuilder::new()
        .movc(1, 1)
        .movc(1, 2)
        .add(2, 1, 1)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    let _ = ctx.run_to_halt();
    assert_eq!(ctx.reg(1), 2);
    assert_eq!(ctx.reg(2), 4);
}
