//! Strand controller input and output signals.
//!
//! This module defines the per-cycle wires between a strand controller and its collaborators:
//! 1. **Hazard Signals:** Rollback and its suspend/retry sub-classifications, resume, and the
//!    replay payload driven by the execution and cache units.
//! 2. **Inputs:** Fetch result, decode's long-latency flag, and the arbiter's grant.
//! 3. **Outputs:** Issue eligibility, fetch request, lane/offset taps, and the wait reason
//!    exposed to performance counters.

use serde::Serialize;

/// Hazard signals from downstream units for one strand and one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HazardSignals {
    /// Pipeline flush for this strand.
    pub rollback: bool,
    /// The rollback parks the strand until a cache fill completes.
    pub suspend: bool,
    /// The rollback raced a fill for the same line; refetch without suspending.
    pub retry: bool,
    /// The fill the suspended strand was waiting for has completed.
    pub resume: bool,
    /// Strided offset to restore on suspend or retry.
    pub rollback_strided_offset: u32,
    /// Lane index to restore on suspend or retry.
    pub rollback_lane_index: u8,
}

impl HazardSignals {
    /// No hazard this cycle.
    pub const NONE: Self = Self {
        rollback: false,
        suspend: false,
        retry: false,
        resume: false,
        rollback_strided_offset: 0,
        rollback_lane_index: 0,
    };

    /// Ordinary rollback (misprediction or flush).
    pub const fn rollback() -> Self {
        Self {
            rollback: true,
            ..Self::NONE
        }
    }

    /// Rollback that suspends the strand, replaying the transfer from `lane`/`offset`.
    pub const fn suspend(lane: u8, offset: u32) -> Self {
        Self {
            rollback: true,
            suspend: true,
            rollback_lane_index: lane,
            rollback_strided_offset: offset,
            ..Self::NONE
        }
    }

    /// Rollback that refetches immediately, replaying the transfer from `lane`/`offset`.
    pub const fn retry(lane: u8, offset: u32) -> Self {
        Self {
            rollback: true,
            retry: true,
            rollback_lane_index: lane,
            rollback_strided_offset: offset,
            ..Self::NONE
        }
    }

    /// Cache fill completion for a suspended strand.
    pub const fn resume() -> Self {
        Self {
            resume: true,
            ..Self::NONE
        }
    }

    /// Whether the replay payload must be restored this cycle.
    #[inline(always)]
    pub const fn is_replay(&self) -> bool {
        self.suspend || self.retry
    }

    /// Whether any hazard signal is asserted.
    pub const fn any(&self) -> bool {
        self.rollback || self.suspend || self.retry || self.resume
    }

    /// Combines two signal bundles as wired-OR.
    ///
    /// The replay payload comes from whichever bundle carries a suspend or retry.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let payload = if other.is_replay() { other } else { self };
        Self {
            rollback: self.rollback || other.rollback,
            suspend: self.suspend || other.suspend,
            retry: self.retry || other.retry,
            resume: self.resume || other.resume,
            rollback_strided_offset: payload.rollback_strided_offset,
            rollback_lane_index: payload.rollback_lane_index,
        }
    }
}

/// Everything a strand controller samples in one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrandInputs {
    /// Fetch has an instruction for this strand.
    pub instruction_valid: bool,
    /// The pending instruction word.
    pub instruction: u32,
    /// Decode flags the pending (non-memory) instruction as long-latency.
    pub long_latency: bool,
    /// The strand-select stage grants this strand issue.
    pub issue_granted: bool,
    /// Hazard signals from downstream units.
    pub hazards: HazardSignals,
}

impl StrandInputs {
    /// Inputs with a valid instruction and nothing else asserted.
    pub const fn fetched(instruction: u32) -> Self {
        Self {
            instruction_valid: true,
            instruction,
            long_latency: false,
            issue_granted: false,
            hazards: HazardSignals::NONE,
        }
    }

    /// Sets the issue grant.
    #[must_use]
    pub const fn granted(mut self, granted: bool) -> Self {
        self.issue_granted = granted;
        self
    }

    /// Sets decode's long-latency flag.
    #[must_use]
    pub const fn long_latency(mut self, long_latency: bool) -> Self {
        self.long_latency = long_latency;
        self
    }

    /// Sets the hazard signals.
    #[must_use]
    pub const fn with_hazards(mut self, hazards: HazardSignals) -> Self {
        self.hazards = hazards;
        self
    }

    /// A valid instruction is present and the arbiter granted issue.
    #[inline(always)]
    pub const fn will_issue(&self) -> bool {
        self.instruction_valid && self.issue_granted
    }
}

/// Why a strand is not issuing, for performance counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WaitReason {
    /// Held in `RawWait`.
    Raw,
    /// Suspended in `CacheWait`.
    CacheFill,
    /// No valid instruction from fetch.
    Fetch,
}

/// Everything a strand controller drives in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrandOutputs {
    /// Request the next instruction word for this strand.
    pub next_instr_request: bool,
    /// Eligible for strand-select arbitration.
    pub ready: bool,
    /// Lane index for per-lane register selection.
    pub lane_index: u8,
    /// Byte offset for per-lane address computation.
    pub strided_offset: u32,
    /// Wait reason tap; at most one reason holds by construction.
    pub wait: Option<WaitReason>,
}

impl StrandOutputs {
    /// Performance tap: waiting on a RAW hazard.
    pub fn waiting_on_raw(&self) -> bool {
        self.wait == Some(WaitReason::Raw)
    }

    /// Performance tap: waiting on a cache fill.
    pub fn waiting_on_cache(&self) -> bool {
        self.wait == Some(WaitReason::CacheFill)
    }

    /// Performance tap: waiting on fetch.
    pub fn waiting_on_fetch(&self) -> bool {
        self.wait == Some(WaitReason::Fetch)
    }
}
