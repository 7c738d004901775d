//! Next-State Function.
//!
//! Combinational logic computing a strand's next [`StrandState`] from its current state,
//! the classification of the pending instruction, the issue grant, and the hazard signals.
//! Three fields are co-computed:
//! 1. **Control State:** Rollback first, then a per-state transition.
//! 2. **Lane / Offset:** Replay restore, reset, per-lane advance, or hold.
//! 3. **RAW Countdown:** Cleared on rollback, decremented in `RawWait`, armed on entry.
//!
//! Read-after-write protection is conservative: every load, synchronized store and
//! long-latency instruction holds the strand for the full delay whether or not a later
//! instruction reads its result.

use super::signals::StrandInputs;
use super::state::{ControlState, StrandParams, StrandState};
use crate::isa::{Access, Classification};

/// Computes the state a strand commits at the end of this cycle.
///
/// # Arguments
///
/// * `current` - State committed at the end of the previous cycle.
/// * `class` - Classification of the pending instruction word.
/// * `inputs` - Signals sampled this cycle.
/// * `params` - Lane count and RAW delay of the strand.
pub fn next_state(
    current: &StrandState,
    class: &Classification,
    inputs: &StrandInputs,
    params: StrandParams,
) -> StrandState {
    let control_state = next_control_state(current, class, inputs);
    let (lane_index, strided_offset) = next_lane_and_offset(current, class, inputs, params);
    let raw_delay_countdown = next_countdown(current, control_state, inputs, params);

    StrandState {
        control_state,
        raw_delay_countdown,
        lane_index,
        strided_offset,
    }
}

fn next_control_state(
    current: &StrandState,
    class: &Classification,
    inputs: &StrandInputs,
) -> ControlState {
    let hazards = &inputs.hazards;
    if hazards.rollback {
        return if hazards.suspend {
            ControlState::CacheWait
        } else {
            ControlState::Ready
        };
    }

    let will_issue = inputs.will_issue();
    let transfer_end = current.at_last_lane();
    // A transfer only ends when its final lane actually issues.
    let last_lane_issues = transfer_end && will_issue;

    match current.control_state {
        ControlState::Ready => {
            if !will_issue {
                ControlState::Ready
            } else if class.is_multi_cycle_transfer && !transfer_end {
                match class.access() {
                    Some(Access::Load) => ControlState::VectorLoad,
                    _ => ControlState::VectorStore,
                }
            } else if class.has_raw_hazard() {
                ControlState::RawWait
            } else {
                ControlState::Ready
            }
        }
        // The final lane of a vector load still has a pending result.
        ControlState::VectorLoad if last_lane_issues => ControlState::RawWait,
        ControlState::VectorStore if last_lane_issues => ControlState::Ready,
        ControlState::VectorLoad | ControlState::VectorStore => current.control_state,
        ControlState::RawWait if current.raw_delay_countdown == 1 => ControlState::Ready,
        ControlState::RawWait => ControlState::RawWait,
        ControlState::CacheWait if hazards.resume => ControlState::Ready,
        ControlState::CacheWait => ControlState::CacheWait,
    }
}

fn next_lane_and_offset(
    current: &StrandState,
    class: &Classification,
    inputs: &StrandInputs,
    params: StrandParams,
) -> (u8, u32) {
    let hazards = &inputs.hazards;
    let will_issue = inputs.will_issue();

    if hazards.is_replay() {
        return (hazards.rollback_lane_index, hazards.rollback_strided_offset);
    }
    if hazards.rollback || (current.at_last_lane() && will_issue) {
        return (params.idle_lane(), 0);
    }

    let in_transfer =
        current.control_state.is_vector_transfer() || class.is_multi_cycle_transfer;
    if in_transfer && !current.control_state.is_waiting() && will_issue {
        return (
            current.lane_index.saturating_sub(1),
            current.strided_offset.wrapping_add(class.stride),
        );
    }

    (current.lane_index, current.strided_offset)
}

fn next_countdown(
    current: &StrandState,
    next: ControlState,
    inputs: &StrandInputs,
    params: StrandParams,
) -> u8 {
    if inputs.hazards.rollback {
        return 0;
    }
    match (current.control_state, next) {
        (ControlState::RawWait, _) => current.raw_delay_countdown.saturating_sub(1),
        (_, ControlState::RawWait) => params.raw_delay,
        _ => 0,
    }
}
