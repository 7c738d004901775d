//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the strand simulator. It provides:
//! 1. **Issue:** Cycles, instructions issued and fetched, and issue slot utilization.
//! 2. **Wait reasons:** Per-strand RAW, cache-fill and fetch wait cycles from the controller's
//!    wait-reason taps, plus cycles lost to arbitration.
//! 3. **Hazards:** Rollbacks, suspends, retries, resumes, and ignored contract violations.

use std::time::Instant;

use serde::Serialize;

use crate::core::strand::{Evaluation, StrandInputs, WaitReason};

/// Counters for one strand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StrandStats {
    /// Cycles the strand was granted issue.
    pub issued: u64,
    /// Instructions fetched past (`next_instr_request` raised).
    pub instructions: u64,
    /// Multi-cycle transfers whose final lane issued.
    pub transfers_completed: u64,
    /// Rollbacks of any kind.
    pub rollbacks: u64,
    /// Rollbacks that suspended the strand.
    pub suspends: u64,
    /// Rollbacks that replayed without suspending.
    pub retries: u64,
    /// Cache fills that resumed the strand.
    pub resumes: u64,
    /// Cycles in `RawWait`.
    pub wait_raw: u64,
    /// Cycles in `CacheWait`.
    pub wait_cache: u64,
    /// Cycles without a valid instruction.
    pub wait_fetch: u64,
    /// Cycles the strand was ready but another strand was granted.
    pub lost_arbitration: u64,
    /// Contract violations logged and ignored.
    pub violations_ignored: u64,
}

impl StrandStats {
    /// Adds another strand's counters into this one.
    pub const fn accumulate(&mut self, other: &Self) {
        self.issued += other.issued;
        self.instructions += other.instructions;
        self.transfers_completed += other.transfers_completed;
        self.rollbacks += other.rollbacks;
        self.suspends += other.suspends;
        self.retries += other.retries;
        self.resumes += other.resumes;
        self.wait_raw += other.wait_raw;
        self.wait_cache += other.wait_cache;
        self.wait_fetch += other.wait_fetch;
        self.lost_arbitration += other.lost_arbitration;
        self.violations_ignored += other.violations_ignored;
    }
}

/// Simulation statistics for every strand.
#[derive(Debug, Clone, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Per-strand counters, indexed by strand.
    pub strands: Vec<StrandStats>,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"strands"`, `"hazards"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "strands", "hazards"];

impl SimStats {
    /// Creates zeroed statistics for `strands` strands.
    pub fn new(strands: usize) -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            strands: vec![StrandStats::default(); strands],
        }
    }

    /// Records one strand's evaluation for the current cycle.
    pub fn record(&mut self, strand: usize, inputs: &StrandInputs, evaluation: &Evaluation) {
        let Some(s) = self.strands.get_mut(strand) else {
            return;
        };
        let outputs = &evaluation.outputs;
        let hazards = &inputs.hazards;

        if outputs.ready {
            if inputs.issue_granted {
                s.issued += 1;
            } else {
                s.lost_arbitration += 1;
            }
        }
        if outputs.next_instr_request {
            s.instructions += 1;
            if evaluation.classification.is_multi_cycle_transfer {
                s.transfers_completed += 1;
            }
        }
        match outputs.wait {
            Some(WaitReason::Raw) => s.wait_raw += 1,
            Some(WaitReason::CacheFill) => s.wait_cache += 1,
            Some(WaitReason::Fetch) => s.wait_fetch += 1,
            None => {}
        }
        if hazards.rollback {
            s.rollbacks += 1;
            if hazards.suspend {
                s.suspends += 1;
            } else if hazards.retry {
                s.retries += 1;
            }
        }
        if hazards.resume {
            s.resumes += 1;
        }
        if evaluation.ignored_violation.is_some() {
            s.violations_ignored += 1;
        }
    }

    /// Sum of every strand's counters.
    pub fn totals(&self) -> StrandStats {
        let mut total = StrandStats::default();
        for s in &self.strands {
            total.accumulate(s);
        }
        total
    }

    /// Fraction of cycles in which some strand issued.
    pub fn issue_utilization(&self) -> f64 {
        if self.cycles == 0 {
            return 0.0;
        }
        self.totals().issued as f64 / self.cycles as f64
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"strands"` or `"hazards"`.
    /// Pass an empty slice to print all sections.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let total = self.totals();

        if want("summary") {
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            println!("\n==========================================================");
            println!("STRAND ISSUE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_freq                 {khz:.2} kHz");
            println!("sim_strands              {}", self.strands.len());
            println!("sim_issued               {}", total.issued);
            println!("sim_insts                {}", total.instructions);
            println!("sim_issue_util           {:.4}", self.issue_utilization());
            println!("----------------------------------------------------------");
        }
        if want("strands") {
            println!("STRAND BREAKDOWN");
            for (i, s) in self.strands.iter().enumerate() {
                println!(
                    "  strand{i}.issued         {} ({:.2}%)",
                    s.issued,
                    (s.issued as f64 / cyc) * 100.0
                );
                println!(
                    "  strand{i}.wait.raw       {} ({:.2}%)",
                    s.wait_raw,
                    (s.wait_raw as f64 / cyc) * 100.0
                );
                println!(
                    "  strand{i}.wait.cache     {} ({:.2}%)",
                    s.wait_cache,
                    (s.wait_cache as f64 / cyc) * 100.0
                );
                println!(
                    "  strand{i}.wait.fetch     {} ({:.2}%)",
                    s.wait_fetch,
                    (s.wait_fetch as f64 / cyc) * 100.0
                );
                println!("  strand{i}.lost_arb       {}", s.lost_arbitration);
            }
            println!("----------------------------------------------------------");
        }
        if want("hazards") {
            println!("HAZARDS");
            println!("  transfers.completed    {}", total.transfers_completed);
            println!("  rollback.total         {}", total.rollbacks);
            println!("  rollback.suspend       {}", total.suspends);
            println!("  rollback.retry         {}", total.retries);
            println!("  resume                 {}", total.resumes);
            println!("  violations.ignored     {}", total.violations_ignored);
            println!("----------------------------------------------------------");
        }
    }
}
