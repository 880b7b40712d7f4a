//! Simulation statistics collection and reporting.
//!
//! This module tracks run metrics for the pipeline simulator. It provides:
//! 1. **Cycles and CPI:** Total cycles, retired instructions, and cycles per instruction.
//! 2. **Instruction mix:** Retired counts by category (ALU, compare, load, store, branch).
//! 3. **Branches:** Taken and not-taken counts.
//!
//! The engine never touches these counters; the session updates them by
//! comparing consecutive CPU states.

use std::time::Instant;

use crate::isa::Opcode;

/// Simulation statistics structure.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions that left WriteBack.
    pub instructions_retired: u64,

    /// Count of `ADD`/`SUB`/`MOV` instructions retired.
    pub inst_alu: u64,
    /// Count of `CMP` instructions retired.
    pub inst_compare: u64,
    /// Count of `LDR` instructions retired.
    pub inst_load: u64,
    /// Count of `STR` instructions retired.
    pub inst_store: u64,
    /// Count of `B`/`BEQ`/`BNE` instructions retired.
    pub inst_branch: u64,

    /// Branches that redirected the program counter.
    pub branches_taken: u64,
    /// Conditional branches that fell through.
    pub branches_not_taken: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_compare: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            branches_taken: 0,
            branches_not_taken: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "branch"];

impl SimStats {
    /// Counts a retired instruction under its category.
    pub const fn record_retire(&mut self, opcode: Opcode) {
        self.instructions_retired += 1;
        match opcode {
            Opcode::Add | Opcode::Sub | Opcode::Mov => self.inst_alu += 1,
            Opcode::Cmp => self.inst_compare += 1,
            Opcode::Ldr => self.inst_load += 1,
            Opcode::Str => self.inst_store += 1,
            Opcode::B | Opcode::Beq | Opcode::Bne => self.inst_branch += 1,
        }
    }

    /// Counts a resolved branch.
    pub const fn record_branch(&mut self, taken: bool) {
        if taken {
            self.branches_taken += 1;
        } else {
            self.branches_not_taken += 1;
        }
    }

    /// Cycles per retired instruction, or 0.0 before anything retires.
    #[allow(clippy::cast_precision_loss)]
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections (same as `print()`).
    #[allow(clippy::cast_precision_loss)]
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64| (n as f64 / instr) * 100.0;

        if want("summary") {
            println!("\n==========================================================");
            println!("PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            println!("  op.alu                 {} ({:.2}%)", self.inst_alu, pct(self.inst_alu));
            println!("  op.compare             {} ({:.2}%)", self.inst_compare, pct(self.inst_compare));
            println!("  op.load                {} ({:.2}%)", self.inst_load, pct(self.inst_load));
            println!("  op.store               {} ({:.2}%)", self.inst_store, pct(self.inst_store));
            println!("  op.branch              {} ({:.2}%)", self.inst_branch, pct(self.inst_branch));
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            let total = self.branches_taken + self.branches_not_taken;
            let rate = if total > 0 {
                100.0 * (self.branches_taken as f64 / total as f64)
            } else {
                0.0
            };
            println!("BRANCHES");
            println!("  br.resolved            {total}");
            println!("  br.taken               {}", self.branches_taken);
            println!("  br.not_taken           {}", self.branches_not_taken);
            println!("  br.taken_rate          {rate:.2}%");
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
