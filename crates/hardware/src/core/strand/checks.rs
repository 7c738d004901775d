//! Hazard signal contract checks.
//!
//! The execution and cache units assert rollback, suspend, retry and resume under
//! mutual-exclusion rules. A combination outside those rules means the producing unit is
//! broken; the controller reports it instead of guessing a recovery.

use super::signals::HazardSignals;
use super::state::{ControlState, StrandState};
use crate::common::ContractViolation;

/// Verifies the hazard signals presented to a strand in its current state.
///
/// Rules, checked in order:
/// 1. `rollback` and `resume` are never asserted together.
/// 2. `suspend` and `retry` are never asserted together with `rollback`.
/// 3. `suspend` and `retry` are never asserted without `rollback`.
/// 4. `resume` is only asserted while the strand is in `CacheWait`.
/// 5. A replay payload names a lane that exists.
///
/// # Errors
///
/// Returns the first rule the signals break.
pub fn check(
    state: &StrandState,
    hazards: &HazardSignals,
    lanes: u8,
) -> Result<(), ContractViolation> {
    if hazards.rollback && hazards.resume {
        return Err(ContractViolation::RollbackWithResume);
    }
    if hazards.rollback && hazards.suspend && hazards.retry {
        return Err(ContractViolation::SuspendWithRetry);
    }
    if !hazards.rollback {
        if hazards.suspend {
            return Err(ContractViolation::ReplayWithoutRollback { signal: "suspend" });
        }
        if hazards.retry {
            return Err(ContractViolation::ReplayWithoutRollback { signal: "retry" });
        }
    }
    if hazards.resume && state.control_state() != ControlState::CacheWait {
        return Err(ContractViolation::ResumeOutsideCacheWait {
            state: state.control_state(),
        });
    }
    if hazards.is_replay() && hazards.rollback_lane_index >= lanes {
        return Err(ContractViolation::LaneOutOfRange {
            lane: hazards.rollback_lane_index,
            lanes,
        });
    }
    Ok(())
}
