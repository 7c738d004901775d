//! Simulator: owns every strand controller, its fetch stream, and the arbiter.
//!
//! One call to [`Simulator::step`] is one clock cycle:
//! 1. Gather each strand's inputs from fetch and the scenario's hazard events.
//! 2. Arbitrate among ready strands.
//! 3. Evaluate every controller against the state committed last cycle.
//! 4. Commit all staged states, advance or rewind fetch, and rotate the arbiter.
//!
//! A contract violation under the `Abort` policy fails the step before anything is
//! committed, so the simulator still holds the state of the offending cycle.

use serde::Serialize;
use tracing::{debug, error, warn};

use super::fetch::FetchUnit;
use super::scenario::{Scenario, StrandScript};
use crate::common::SimError;
use crate::config::Config;
use crate::core::Arbiter;
use crate::core::strand::{
    ControlState, Evaluation, StrandController, StrandInputs, StrandOutputs, StrandState,
};
use crate::stats::SimStats;

/// One strand's view of a traced cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrandSnapshot {
    /// State at the start of the cycle.
    pub state: StrandState,
    /// Outputs driven during the cycle.
    pub outputs: StrandOutputs,
}

/// Snapshot of every strand for one cycle, recorded when `general.trace` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleTrace {
    /// Cycle number.
    pub cycle: u64,
    /// Strand granted issue, if any.
    pub granted: Option<usize>,
    /// Per-strand snapshots, indexed by strand.
    pub strands: Vec<StrandSnapshot>,
}

/// What happened in one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Cycle that was simulated.
    pub cycle: u64,
    /// Strand granted issue, if any.
    pub granted: Option<usize>,
    /// Per-strand outputs, indexed by strand.
    pub outputs: Vec<StrandOutputs>,
}

/// Top-level multi-strand simulator.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    cycle: u64,
    strands: Vec<StrandController>,
    fetch: Vec<FetchUnit>,
    scripts: Vec<StrandScript>,
    arbiter: Arbiter,
    stats: SimStats,
    trace: Vec<CycleTrace>,
}

impl Simulator {
    /// Creates a simulator running `scenario` under `config`.
    ///
    /// Strands the scenario does not script run an empty program.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] or [`SimError::Scenario`] when either input is
    /// out of range.
    pub fn new(config: &Config, scenario: Scenario) -> Result<Self, SimError> {
        config.validate()?;
        scenario.validate(config.strand.count)?;

        let count = config.strand.count;
        let mut scripts = scenario.strands;
        scripts.resize_with(count, StrandScript::default);

        let strands = (0..count)
            .map(|id| StrandController::new(id, &config.strand, config.general.contract_policy))
            .collect();
        let fetch = scripts
            .iter()
            .map(|script| FetchUnit::new(script.program.clone()))
            .collect();

        debug!(
            strands = count,
            lanes = config.strand.lanes,
            raw_delay = config.strand.raw_delay,
            "simulator initialized"
        );

        Ok(Self {
            config: config.clone(),
            cycle: 0,
            strands,
            fetch,
            scripts,
            arbiter: Arbiter::new(config.arbiter.policy),
            stats: SimStats::new(count),
            trace: Vec::new(),
        })
    }

    /// Number of cycles simulated so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Configuration the simulator was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Every strand controller, indexed by strand.
    pub fn strands(&self) -> &[StrandController] {
        &self.strands
    }

    /// A single strand controller.
    pub fn strand(&self, id: usize) -> Option<&StrandController> {
        self.strands.get(id)
    }

    /// A single strand's fetch stream.
    pub fn fetch(&self, id: usize) -> Option<&FetchUnit> {
        self.fetch.get(id)
    }

    /// Statistics collected so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Per-cycle snapshots; empty unless `general.trace` is set.
    pub fn trace(&self) -> &[CycleTrace] {
        &self.trace
    }

    fn inputs(&self, strand: usize) -> (StrandInputs, Option<usize>) {
        let (hazards, restart) = self.scripts[strand].hazards_at(self.cycle);
        let inputs = match self.fetch[strand].pending() {
            Some(word) => StrandInputs::fetched(word.word).long_latency(word.long_latency),
            None => StrandInputs::default(),
        };
        (inputs.with_hazards(hazards), restart)
    }

    /// Simulates one clock cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Contract`] when a strand observes an illegal hazard-signal
    /// combination under the `Abort` policy. Nothing is committed for that cycle.
    pub fn step(&mut self) -> Result<StepReport, SimError> {
        let cycle = self.cycle;
        let mut gathered: Vec<(StrandInputs, Option<usize>)> =
            (0..self.strands.len()).map(|strand| self.inputs(strand)).collect();

        let ready: Vec<bool> = self
            .strands
            .iter()
            .zip(&gathered)
            .map(|(controller, (inputs, _))| controller.ready(inputs))
            .collect();
        let granted = self.arbiter.pick(&ready);

        let mut evaluations: Vec<Evaluation> = Vec::with_capacity(self.strands.len());
        for (strand, (controller, (inputs, _))) in
            self.strands.iter().zip(gathered.iter_mut()).enumerate()
        {
            inputs.issue_granted = granted == Some(strand);
            if inputs.hazards.any() {
                debug!(
                    cycle,
                    strand,
                    rollback = inputs.hazards.rollback,
                    suspend = inputs.hazards.suspend,
                    retry = inputs.hazards.retry,
                    resume = inputs.hazards.resume,
                    "hazard signals"
                );
            }
            let evaluation = controller.evaluate(inputs).map_err(|violation| {
                error!(cycle, strand, %violation, "contract violation, aborting run");
                SimError::Contract {
                    cycle,
                    strand,
                    violation,
                }
            })?;
            evaluations.push(evaluation);
        }

        if self.config.general.trace {
            let strands = self
                .strands
                .iter()
                .zip(&evaluations)
                .map(|(controller, evaluation)| StrandSnapshot {
                    state: *controller.state(),
                    outputs: evaluation.outputs,
                })
                .collect();
            self.trace.push(CycleTrace {
                cycle,
                granted,
                strands,
            });
        }

        for (strand, ((inputs, restart), evaluation)) in
            gathered.iter().zip(&evaluations).enumerate()
        {
            self.stats.record(strand, inputs, evaluation);
            self.strands[strand].commit(evaluation);

            let fetch = &mut self.fetch[strand];
            if inputs.hazards.rollback {
                if let Some(pc) = *restart {
                    fetch.restart(pc);
                }
            } else if evaluation.outputs.next_instr_request {
                fetch.advance();
            }
        }
        self.arbiter.commit(granted);
        self.stats.cycles += 1;
        self.cycle += 1;

        Ok(StepReport {
            cycle,
            granted,
            outputs: evaluations.iter().map(|e| e.outputs).collect(),
        })
    }

    /// Whether every strand has drained its program, returned to `Ready`, and has no
    /// hazard events left.
    pub fn is_quiescent(&self) -> bool {
        self.strands
            .iter()
            .zip(&self.fetch)
            .zip(&self.scripts)
            .all(|((controller, fetch), script)| {
                controller.state().control_state() == ControlState::Ready
                    && fetch.is_drained()
                    && script.last_event_cycle().is_none_or(|last| last < self.cycle)
            })
    }

    /// Steps until the simulator is quiescent or `general.max_cycles` is reached.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by [`Simulator::step`].
    pub fn run(&mut self) -> Result<&SimStats, SimError> {
        let max_cycles = self.config.general.max_cycles;
        while self.cycle < max_cycles && !self.is_quiescent() {
            let _ = self.step()?;
        }
        if !self.is_quiescent() {
            warn!(max_cycles, "cycle limit reached before all strands drained");
        }
        Ok(&self.stats)
    }

    /// Returns every strand, fetch stream, and the arbiter to their reset state and clears
    /// statistics and trace.
    pub fn reset(&mut self) {
        for controller in &mut self.strands {
            controller.reset();
        }
        for fetch in &mut self.fetch {
            fetch.reset();
        }
        self.arbiter.reset();
        self.stats = SimStats::new(self.strands.len());
        self.trace.clear();
        self.cycle = 0;
    }
}
