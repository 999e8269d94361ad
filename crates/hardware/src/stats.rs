//! Simulation Statistics.
//!
//! This module tracks performance metrics for the pipeline. It provides:
//! 1. **Counters:** Cycles, retired instructions and the retire class mix.
//! 2. **Hazards:** Data stall cycles, operand forwards by source, flushes and fetch bubbles.
//! 3. **Branches:** Taken and not-taken control transfers.
//! 4. **Reporting:** Sectioned text reports and JSON serialization.

use std::fmt::Write as _;

use serde::Serialize;

use crate::core::pipeline::signals::InstClass;

/// Simulation statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total cycles executed, including the cycle `HALT` committed in.
    pub cycles: u64,
    /// Instructions committed in writeback.
    pub instructions_retired: u64,

    /// Retired arithmetic, logic, move and compare instructions.
    pub inst_alu: u64,
    /// Retired loads.
    pub inst_load: u64,
    /// Retired stores.
    pub inst_store: u64,
    /// Retired branches and jumps.
    pub inst_branch: u64,
    /// Retired `NOP` and `HALT`.
    pub inst_system: u64,

    /// Cycles decode spent stalled on a source operand.
    pub stalls_data: u64,
    /// Operands bypassed from the producer that executed the same cycle.
    pub forwards_execute: u64,
    /// Operands bypassed from the writeback latch.
    pub forwards_writeback: u64,
    /// Instructions discarded from decode by a taken transfer.
    pub flushes: u64,
    /// Fetch slots skipped after a redirect.
    pub fetch_bubbles: u64,

    /// Control transfers that changed the PC.
    pub branches_taken: u64,
    /// Conditional branches that fell through.
    pub branches_not_taken: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"pipeline"`, `"instruction_mix"`, `"branch"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "pipeline", "instruction_mix", "branch"];

impl SimStats {
    /// Counts one committed instruction of class `class`.
    pub const fn record_retire(&mut self, class: InstClass) {
        self.instructions_retired += 1;
        match class {
            InstClass::Alu => self.inst_alu += 1,
            InstClass::Load => self.inst_load += 1,
            InstClass::Store => self.inst_store += 1,
            InstClass::Branch => self.inst_branch += 1,
            InstClass::System => self.inst_system += 1,
        }
    }

    /// Instructions per cycle, or `0.0` before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Formats the requested sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to include every section.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;
        let mut out = String::new();

        let _ = writeln!(out, "\n==========================================================");
        let _ = writeln!(out, "APEX PIPELINE SIMULATION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let cpi = if self.instructions_retired == 0 {
                0.0
            } else {
                self.cycles as f64 / instr
            };
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_ipc                  {:.4}", self.ipc());
            let _ = writeln!(out, "sim_cpi                  {cpi:.4}");
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("pipeline") {
            let _ = writeln!(out, "PIPELINE");
            let _ = writeln!(
                out,
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                pct(self.stalls_data, cyc)
            );
            let _ = writeln!(out, "  forward.execute        {}", self.forwards_execute);
            let _ = writeln!(out, "  forward.writeback      {}", self.forwards_writeback);
            let _ = writeln!(out, "  flush.decode           {}", self.flushes);
            let _ = writeln!(out, "  fetch.bubbles          {}", self.fetch_bubbles);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, n) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.system", self.inst_system),
            ] {
                let _ = writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n, instr));
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("branch") {
            let total = self.branches_taken + self.branches_not_taken;
            let rate = if total > 0 {
                pct(self.branches_taken, total as f64)
            } else {
                0.0
            };
            let _ = writeln!(out, "CONTROL TRANSFER");
            let _ = writeln!(out, "  branch.resolved        {total}");
            let _ = writeln!(out, "  branch.taken           {}", self.branches_taken);
            let _ = writeln!(out, "  branch.taken_rate      {rate:.2}%");
        }
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
