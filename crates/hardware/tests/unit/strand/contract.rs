//! Hazard Signal Contract Tests.
//!
//! Illegal combinations of rollback, suspend, retry and resume are design
//! contract breaches. Under `Abort` the controller rejects the cycle and keeps
//! its committed state; under `Log` it warns and carries on.

#![allow(unused_results)] // rstest case expansions

use pretty_assertions::assert_eq;
use rstest::rstest;
use strand_core::common::{ContractViolation, SimError};
use strand_core::config::ContractPolicy;
use strand_core::core::strand::{ControlState, HazardSignals, StrandInputs};

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::TestContext;

// ══════════════════════════════════════════════════════════
// 1. Each rule
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::rollback_with_resume(
    HazardSignals { resume: true, ..HazardSignals::rollback() },
    ContractViolation::RollbackWithResume
)]
#[case::suspend_with_retry(
    HazardSignals { retry: true, ..HazardSignals::suspend(0, 0) },
    ContractViolation::SuspendWithRetry
)]
#[case::suspend_alone(
    HazardSignals { suspend: true, ..HazardSignals::NONE },
    ContractViolation::ReplayWithoutRollback { signal: "suspend" }
)]
#[case::retry_alone(
    HazardSignals { retry: true, ..HazardSignals::NONE },
    ContractViolation::ReplayWithoutRollback { signal: "retry" }
)]
#[case::resume_while_ready(
    HazardSignals::resume(),
    ContractViolation::ResumeOutsideCacheWait { state: ControlState::Ready }
)]
#[case::lane_out_of_range(
    HazardSignals::suspend(4, 0),
    ContractViolation::LaneOutOfRange { lane: 4, lanes: 4 }
)]
fn violation_detected(#[case] hazards: HazardSignals, #[case] expected: ContractViolation) {
    let mut ctx = TestContext::with_geometry(4, 3);
    let result = ctx.try_step(StrandInputs::default().with_hazards(hazards));
    assert_eq!(result, Err(expected));
}

#[test]
fn resume_during_raw_wait_names_the_state() {
    let mut ctx = TestContext::new();
    let _ = ctx.issue(InstructionBuilder::scalar_load());
    let result = ctx.try_step(StrandInputs::default().with_hazards(HazardSignals::resume()));
    assert_eq!(
        result,
        Err(ContractViolation::ResumeOutsideCacheWait {
            state: ControlState::RawWait
        })
    );
}

#[test]
fn resume_in_cache_wait_is_legal() {
    let mut ctx = TestContext::new();
    let _ = ctx.signal(HazardSignals::suspend(0, 0));
    assert!(
        ctx.try_step(StrandInputs::default().with_hazards(HazardSignals::resume()))
            .is_ok()
    );
}

// ══════════════════════════════════════════════════════════
// 2. Policies
// ══════════════════════════════════════════════════════════

#[test]
fn abort_keeps_committed_state() {
    let mut ctx = TestContext::with_geometry(4, 3);
    let _ = ctx.issue(InstructionBuilder::strided_load(4));
    let before = *ctx.state();

    let bad = StrandInputs::fetched(InstructionBuilder::strided_load(4))
        .granted(true)
        .with_hazards(HazardSignals::resume());
    assert!(ctx.try_step(bad).is_err());
    assert_eq!(*ctx.state(), before);
}

#[test]
fn log_policy_records_and_continues() {
    let ctx = TestContext::with_policy(4, 3, ContractPolicy::Log);
    let inputs = StrandInputs::fetched(InstructionBuilder::arithmetic())
        .granted(true)
        .with_hazards(HazardSignals::resume());

    let evaluation = ctx.strand.evaluate(&inputs).unwrap();
    assert_eq!(
        evaluation.ignored_violation,
        Some(ContractViolation::ResumeOutsideCacheWait {
            state: ControlState::Ready
        })
    );
    assert!(evaluation.outputs.next_instr_request);
    assert_eq!(evaluation.next.control_state(), ControlState::Ready);
}

#[test]
fn legal_signals_carry_no_violation() {
    let ctx = TestContext::with_policy(4, 3, ContractPolicy::Log);
    let evaluation = ctx
        .strand
        .evaluate(&StrandInputs::default().with_hazards(HazardSignals::retry(3, 0)))
        .unwrap();
    assert_eq!(evaluation.ignored_violation, None);
}

#[test]
fn sim_error_pins_cycle_and_strand() {
    let err = SimError::Contract {
        cycle: 7,
        strand: 2,
        violation: ContractViolation::ResumeOutsideCacheWait {
            state: ControlState::Ready,
        },
    };
    assert_eq!(
        err.to_string(),
        "cycle 7: strand 2: resume asserted while strand is READY"
    );
    assert_eq!(
        err.violation(),
        Some(ContractViolation::ResumeOutsideCacheWait {
            state: ControlState::Ready
        })
    );
}
