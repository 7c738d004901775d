//! Per-strand issue controller.
//!
//! Each strand owns one controller. A cycle is split into two phases so that every strand
//! and the arbiter observe the same committed state:
//! 1. **Evaluate:** Classify the pending word, check the hazard-signal contract, and compute
//!    the outputs and the staged next state. Borrows the controller immutably.
//! 2. **Commit:** Replace the state with the staged value at the step boundary.

use tracing::{debug, trace, warn};

use crate::common::ContractViolation;
use crate::config::{ContractPolicy, StrandConfig};
use crate::isa::{Classification, classify};

/// Hazard-signal contract checks.
pub mod checks;
/// Issue gate (ready, fetch request, wait reasons).
pub mod issue;
/// Next-state function.
pub mod next_state;
/// Input and output signal bundles.
pub mod signals;
/// Persistent strand state.
pub mod state;

pub use self::signals::{HazardSignals, StrandInputs, StrandOutputs, WaitReason};
pub use self::state::{ControlState, StrandParams, StrandState};

/// Result of evaluating one cycle, staged until commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Outputs driven this cycle.
    pub outputs: StrandOutputs,
    /// Classification of the pending instruction.
    pub classification: Classification,
    /// State to commit at the end of the cycle.
    pub next: StrandState,
    /// Contract violation that was logged and ignored under [`ContractPolicy::Log`].
    pub ignored_violation: Option<ContractViolation>,
}

/// Issue controller for one strand.
#[derive(Debug, Clone)]
pub struct StrandController {
    id: usize,
    params: StrandParams,
    policy: ContractPolicy,
    state: StrandState,
}

impl StrandController {
    /// Creates a controller in its reset state.
    pub fn new(id: usize, config: &StrandConfig, policy: ContractPolicy) -> Self {
        let params = StrandParams::from(config);
        Self {
            id,
            params,
            policy,
            state: StrandState::reset(params),
        }
    }

    /// Strand index of this controller.
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Fixed parameters of this controller.
    pub const fn params(&self) -> StrandParams {
        self.params
    }

    /// Committed state.
    pub const fn state(&self) -> &StrandState {
        &self.state
    }

    /// Issue eligibility for the given inputs; independent of the grant.
    pub const fn ready(&self, inputs: &StrandInputs) -> bool {
        issue::ready(&self.state, inputs)
    }

    /// Evaluates one cycle without changing the committed state.
    ///
    /// # Errors
    ///
    /// Under [`ContractPolicy::Abort`], returns the violated hazard-signal rule. Under
    /// [`ContractPolicy::Log`], the violation is reported through `tracing` and carried in
    /// [`Evaluation::ignored_violation`].
    pub fn evaluate(&self, inputs: &StrandInputs) -> Result<Evaluation, ContractViolation> {
        let ignored_violation = match checks::check(&self.state, &inputs.hazards, self.params.lanes)
        {
            Ok(()) => None,
            Err(violation) => match self.policy {
                ContractPolicy::Abort => return Err(violation),
                ContractPolicy::Log => {
                    warn!(strand = self.id, %violation, "hazard signal contract violated");
                    Some(violation)
                }
            },
        };

        let classification = classify(inputs.instruction, inputs.long_latency);
        let outputs = issue::outputs(&self.state, &classification, inputs);
        let next = next_state::next_state(&self.state, &classification, inputs, self.params);

        Ok(Evaluation {
            outputs,
            classification,
            next,
            ignored_violation,
        })
    }

    /// Commits a staged evaluation.
    pub fn commit(&mut self, evaluation: &Evaluation) {
        let next = evaluation.next;
        if next.control_state != self.state.control_state {
            trace!(
                strand = self.id,
                from = %self.state.control_state,
                to = %next.control_state,
                lane = next.lane_index,
                offset = next.strided_offset,
                "strand transition"
            );
            match next.control_state {
                ControlState::CacheWait => debug!(strand = self.id, "strand suspended"),
                ControlState::Ready if self.state.control_state == ControlState::CacheWait => {
                    debug!(strand = self.id, "strand resumed");
                }
                _ => {}
            }
        }
        self.state = next;
    }

    /// Evaluates and commits one cycle.
    ///
    /// # Errors
    ///
    /// See [`StrandController::evaluate`]; on error the committed state is unchanged.
    pub fn step(&mut self, inputs: &StrandInputs) -> Result<StrandOutputs, ContractViolation> {
        let evaluation = self.evaluate(inputs)?;
        self.commit(&evaluation);
        Ok(evaluation.outputs)
    }

    /// Returns the strand to its reset state.
    pub fn reset(&mut self) {
        self.state = StrandState::reset(self.params);
    }
}
