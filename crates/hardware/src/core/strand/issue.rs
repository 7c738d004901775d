//! Issue Gate.
//!
//! Combinational predicates the strand exposes to the strand-select stage and to fetch,
//! plus the wait-reason taps read by performance counters.

use super::signals::{StrandInputs, StrandOutputs, WaitReason};
use super::state::{ControlState, StrandState};
use crate::isa::Classification;

/// Whether the strand may be selected to issue this cycle.
///
/// Not waiting, holding a valid instruction, and not being rolled back.
#[inline(always)]
pub const fn ready(state: &StrandState, inputs: &StrandInputs) -> bool {
    !state.control_state.is_waiting() && inputs.instruction_valid && !inputs.hazards.rollback
}

/// Drives every output of the strand for this cycle.
pub fn outputs(
    state: &StrandState,
    class: &Classification,
    inputs: &StrandInputs,
) -> StrandOutputs {
    let ready = ready(state, inputs);

    // A transfer keeps the same instruction word until its last lane issues.
    let fetch_after_issue = (state.control_state == ControlState::Ready
        && !class.is_multi_cycle_transfer)
        || ((state.control_state.is_vector_transfer() || class.is_multi_cycle_transfer)
            && state.at_last_lane());

    StrandOutputs {
        next_instr_request: ready && inputs.issue_granted && fetch_after_issue,
        ready,
        lane_index: state.lane_index,
        strided_offset: state.strided_offset,
        wait: wait_reason(state, inputs),
    }
}

fn wait_reason(state: &StrandState, inputs: &StrandInputs) -> Option<WaitReason> {
    match state.control_state {
        ControlState::RawWait => Some(WaitReason::Raw),
        ControlState::CacheWait => Some(WaitReason::CacheFill),
        _ if !inputs.instruction_valid => Some(WaitReason::Fetch),
        _ => None,
    }
}
