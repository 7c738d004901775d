//! Contract violation and simulation error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Contract Violations:** Illegal combinations of the hazard signals driven into a strand
//!    controller. These indicate a bug in the unit producing the signals, never a condition the
//!    controller recovers from.
//! 2. **Simulation Errors:** The run-level error type, which pins a violation to the cycle and
//!    strand where it was observed and covers configuration and scenario loading failures.

use thiserror::Error;

use crate::core::strand::ControlState;

/// An illegal hazard-signal combination presented to a strand controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// `rollback` and `resume` were asserted in the same cycle.
    #[error("rollback and resume asserted in the same cycle")]
    RollbackWithResume,

    /// `suspend` and `retry` were both asserted alongside `rollback`.
    #[error("suspend and retry asserted together with rollback")]
    SuspendWithRetry,

    /// `suspend` or `retry` was asserted without `rollback`.
    ///
    /// Both are sub-classifications of a rollback, never independent events.
    #[error("{signal} asserted without rollback")]
    ReplayWithoutRollback {
        /// Name of the offending signal (`"suspend"` or `"retry"`).
        signal: &'static str,
    },

    /// `resume` was asserted while the strand was not waiting on a cache fill.
    #[error("resume asserted while strand is {state}")]
    ResumeOutsideCacheWait {
        /// Control state the strand was in when `resume` arrived.
        state: ControlState,
    },

    /// A replay payload named a lane that does not exist.
    #[error("rollback lane {lane} is outside a {lanes}-lane vector")]
    LaneOutOfRange {
        /// Lane index carried by the rollback payload.
        lane: u8,
        /// Configured lanes per vector.
        lanes: u8,
    },
}

/// Top-level simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    /// A strand controller observed an illegal signal combination; the run is aborted.
    #[error("cycle {cycle}: strand {strand}: {violation}")]
    Contract {
        /// Cycle in which the violation was observed.
        cycle: u64,
        /// Index of the strand that observed it.
        strand: usize,
        /// The violated invariant.
        #[source]
        violation: ContractViolation,
    },

    /// Configuration values outside their legal ranges.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A scenario that cannot be driven against the configured strands.
    #[error("invalid scenario: {0}")]
    Scenario(String),

    /// Failure reading a configuration or scenario file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a configuration or scenario document.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Returns the contract violation carried by this error, if any.
    pub const fn violation(&self) -> Option<ContractViolation> {
        match self {
            Self::Contract { violation, .. } => Some(*violation),
            _ => None,
        }
    }
}
