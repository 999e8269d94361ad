//! Pipeline Stage Tests.
//!
//! Drives individual stage functions on a bare `Cpu` and checks the latch
//! hand-off between stages cycle by cycle.

use apex_core::common::error::SimError;
use apex_core::config::Config;
use apex_core::core::Cpu;
use apex_core::core::pipeline::latches::Latch;
use apex_core::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use apex_core::isa::{Instruction, Opcode};
use pretty_assertions::assert_eq;

use crate::common::{ProgramBuilder, TestContext};

fn cpu(program: Vec<Instruction>) -> Cpu {
    Cpu::new(program, &Config::default()).unwrap()
}

/// Helper: an issued instruction with its operands already read.
fn issued(insn: Instruction, src1: i32, src2: i32) -> Latch {
    Latch {
        src1_value: src1,
        src2_value: src2,
        reserved: true,
        ..Latch::fetched(insn, 4000)
    }
}

#[test]
fn test_fetch_hands_instruction_to_decode() {
    let mut cpu = cpu(ProgramBuilder::new().movc(0, 5).halt().build());
    fetch_stage(&mut cpu).unwrap();

    assert_eq!(cpu.latches.decode, Latch::fetched(Instruction::movc(0, 5), 4000));
    assert_eq!(cpu.pc, 4004);
}

#[test]
fn test_fetch_disables_itself_after_halt() {
    let mut cpu = cpu(ProgramBuilder::new().halt().build());
    fetch_stage(&mut cpu).unwrap();
    assert!(!cpu.latches.fetch.has_insn);
    assert!(cpu.latches.decode.insn.is_halt());

    cpu.latches.decode = Latch::default();
    fetch_stage(&mut cpu).unwrap();
    assert!(!cpu.latches.decode.has_insn);
    assert_eq!(cpu.pc, 4004);
}

#[test]
fn test_fetch_waits_while_decode_stalled() {
    let mut cpu = cpu(ProgramBuilder::new().movc(0, 5).halt().build());
    cpu.stalled = true;
    fetch_stage(&mut cpu).unwrap();
    assert!(!cpu.latches.decode.has_insn);
    assert_eq!(cpu.pc, 4000);
}

#[test]
fn test_fetch_past_end_when_drained_is_error() {
    let mut cpu = cpu(ProgramBuilder::new().movc(0, 5).build());
    cpu.pc = 4004;
    let err = fetch_stage(&mut cpu).unwrap_err();
    assert!(matches!(err, SimError::PcOutOfRange { pc: 4004 }));
}

#[test]
fn test_fetch_past_end_idles_behind_inflight_work() {
    let mut cpu = cpu(ProgramBuilder::new().movc(0, 5).build());
    cpu.pc = 4004;
    cpu.latches.memory = issued(Instruction::movc(0, 5), 0, 0);
    fetch_stage(&mut cpu).unwrap();
    assert!(!cpu.latches.decode.has_insn);
}

#[test]
fn test_decode_reserves_destination() {
    let mut cpu = cpu(ProgramBuilder::new().add(2, 0, 1).halt().build());
    cpu.regs.write(0, 4);
    cpu.regs.write(1, 6);
    cpu.latches.decode = Latch::fetched(Instruction::reg3(Opcode::Add, 2, 0, 1), 4000);
    decode_stage(&mut cpu);

    assert!(!cpu.stalled);
    assert!(!cpu.latches.decode.has_insn);
    assert!(cpu.latches.execute.reserved);
    assert_eq!(cpu.latches.execute.src1_value, 4);
    assert_eq!(cpu.latches.execute.src2_value, 6);
    assert_eq!(cpu.scoreboard.count(2), 1);
}

#[test]
fn test_decode_stall_keeps_latch() {
    let mut cpu = cpu(ProgramBuilder::new().add(2, 0, 1).halt().build());
    cpu.forwarding = false;
    cpu.scoreboard.reserve(1);
    let waiting = Latch::fetched(Instruction::reg3(Opcode::Add, 2, 0, 1), 4000);
    cpu.latches.decode = waiting.clone();
    decode_stage(&mut cpu);

    assert!(cpu.stalled);
    assert_eq!(cpu.latches.decode, waiting);
    assert!(!cpu.latches.execute.has_insn);
    assert_eq!(cpu.stats.stalls_data, 1);
}

#[test]
fn test_execute_computes_and_sets_flags() {
    let mut cpu = cpu(ProgramBuilder::new().halt().build());
    cpu.latches.execute = issued(Instruction::reg3(Opcode::Sub, 2, 0, 1), 3, 5);
    execute_stage(&mut cpu).unwrap();

    assert_eq!(cpu.latches.memory.result, -2);
    assert!(cpu.flags.negative);
    assert!(!cpu.flags.zero);
}

#[test]
fn test_execute_movc_leaves_flags() {
    let mut cpu = cpu(ProgramBuilder::new().halt().build());
    let before = cpu.flags;
    cpu.latches.execute = issued(Instruction::movc(1, -9), 0, 0);
    execute_stage(&mut cpu).unwrap();

    assert_eq!(cpu.latches.memory.result, -9);
    assert_eq!(cpu.flags, before);
}

#[test]
fn test_execute_storep_address_and_increment() {
    let mut cpu = cpu(ProgramBuilder::new().halt().build());
    cpu.latches.execute = issued(Instruction::store(Opcode::Storep, 0, 6, 8), 42, 100);
    execute_stage(&mut cpu).unwrap();

    assert_eq!(cpu.latches.memory.memory_address, 108);
    assert_eq!(cpu.latches.memory.post_increment, 104);
}

#[test]
fn test_execute_taken_branch_flushes_decode() {
    let mut cpu = cpu(ProgramBuilder::new().halt().build());
    cpu.latches.execute = issued(Instruction::branch(Opcode::Bz, 12), 0, 0);
    cpu.latches.decode = Latch::fetched(Instruction::movc(1, 99), 4004);
    execute_stage(&mut cpu).unwrap();

    assert!(!cpu.latches.decode.has_insn);
    assert_eq!(cpu.pc, 4012);
    assert!(cpu.redirect_pending);
    assert!(cpu.latches.fetch.has_insn);
    assert_eq!(cpu.stats.flushes, 1);
}

#[test]
fn test_memory_store_then_load() {
    let mut cpu = cpu(ProgramBuilder::new().halt().build());
    let mut store = issued(Instruction::store(Opcode::Store, 0, 6, 0), 77, 20);
    store.memory_address = 20;
    cpu.latches.memory = store;
    mem_stage(&mut cpu).unwrap();
    assert_eq!(cpu.data_memory.read(20).unwrap(), 77);

    let mut load = issued(Instruction::reg_imm(Opcode::Load, 1, 6, 0), 20, 0);
    load.memory_address = 20;
    cpu.latches.memory = load;
    mem_stage(&mut cpu).unwrap();
    assert_eq!(cpu.latches.writeback.result, 77);
}

#[test]
fn test_memory_out_of_range_is_error() {
    let mut cpu = cpu(ProgramBuilder::new().halt().build());
    let mut load = issued(Instruction::reg_imm(Opcode::Load, 1, 6, 0), 0, 0);
    load.memory_address = -1;
    cpu.latches.memory = load;
    let err = mem_stage(&mut cpu).unwrap_err();
    assert!(matches!(err, SimError::MemoryOutOfRange { address: -1, .. }));
}

#[test]
fn test_writeback_loadp_destination_wins_over_base() {
    let mut cpu = cpu(ProgramBuilder::new().halt().build());
    let insn = Instruction::reg_imm(Opcode::Loadp, 6, 6, 0);
    cpu.scoreboard.reserve_for(&insn);
    cpu.latches.writeback = Latch {
        result: 9,
        post_increment: 104,
        ..issued(insn, 100, 0)
    };

    assert!(!wb_stage(&mut cpu).unwrap());
    assert_eq!(cpu.regs.read(6), 9);
    assert!(cpu.scoreboard.is_clear());
    assert_eq!(cpu.stats.inst_load, 1);
}

#[test]
fn test_writeback_reports_halt() {
    let mut cpu = cpu(ProgramBuilder::new().halt().build());
    cpu.latches.writeback = issued(Instruction::halt(), 0, 0);
    assert!(wb_stage(&mut cpu).unwrap());
    assert_eq!(cpu.stats.instructions_retired, 1);
}

#[test]
fn test_writeback_without_reservation_is_error() {
    let mut cpu = cpu(ProgramBuilder::new().halt().build());
    cpu.latches.writeback = Latch {
        result: 3,
        ..issued(Instruction::movc(2, 3), 0, 0)
    };

    let err = wb_stage(&mut cpu).unwrap_err();
    assert!(matches!(err, SimError::ScoreboardUnderflow { reg: 2 }));
}

#[test]
fn test_stalled_instruction_reappears_unchanged() {
    let program = ProgramBuilder::new()
        .movc(0, 5)
        .movc(1, 10)
        .add(2, 0, 1)
        .halt()
        .build();
    let mut ctx = TestContext::with_forwarding(program, false);
    let _ = ctx.run(4);
    assert!(ctx.sim.cpu().stalled);
    let waiting = ctx.sim.latches().decode.clone();
    let pc = ctx.sim.pc();

    let _ = ctx.step();
    assert!(ctx.sim.cpu().stalled);
    assert_eq!(ctx.sim.latches().decode, waiting);
    assert_eq!(ctx.sim.pc(), pc);

    let _ = ctx.step();
    assert!(!ctx.sim.cpu().stalled);
    assert_eq!(ctx.sim.latches().execute.insn, waiting.insn);
}

#[test]
fn test_latches_advance_one_stage_per_cycle() {
    let program = ProgramBuilder::new().movc(0, 5).movc(1, 10).halt().build();
    let mut ctx = TestContext::new(program);
    let first = Instruction::movc(0, 5);

    let _ = ctx.step();
    assert_eq!(ctx.sim.latches().decode.insn, first);
    let _ = ctx.step();
    assert_eq!(ctx.sim.latches().execute.insn, first);
    let _ = ctx.step();
    assert_eq!(ctx.sim.latches().memory.insn, first);
    let _ = ctx.step();
    assert_eq!(ctx.sim.latches().writeback.insn, first);
    assert_eq!(ctx.reg(0), 0);
    let _ = ctx.step();
    assert_eq!(ctx.reg(0), 5);
}

#[test]
fn test_render_pipeline_lists_every_stage() {
    let mut ctx = TestContext::new(ProgramBuilder::new().movc(0, 5).halt().build());
    let _ = ctx.step();
    let text = ctx.sim.render_pipeline();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Fetch          : pc(4000) MOVC,R0,#5",
            "Decode/RF      : pc(4000) MOVC,R0,#5",
            "Execute        : EMPTY",
            "Memory         : EMPTY",
            "Writeback      : EMPTY",
        ]
    );
}
