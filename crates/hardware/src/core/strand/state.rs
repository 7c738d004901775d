//! Strand State.
//!
//! The persistent per-strand record: control state, vector lane progress, strided address
//! accumulator, and the RAW delay countdown. It is created at reset and only replaced by
//! the value the next-state function computes.

use std::fmt;

use serde::Serialize;

use crate::config::StrandConfig;

/// Control state of a strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ControlState {
    /// Eligible to issue; no transfer in progress.
    #[default]
    Ready,
    /// Issuing the lanes of a multi-cycle vector load.
    VectorLoad,
    /// Issuing the lanes of a multi-cycle vector store.
    VectorStore,
    /// Held for a fixed delay after a load, synchronized store, or long-latency op.
    RawWait,
    /// Suspended until the cache signals that the missing line has been filled.
    CacheWait,
}

impl ControlState {
    /// Every control state.
    pub const ALL: [Self; 5] = [
        Self::Ready,
        Self::VectorLoad,
        Self::VectorStore,
        Self::RawWait,
        Self::CacheWait,
    ];

    /// Whether the strand is blocked from issuing regardless of its inputs.
    #[inline(always)]
    pub const fn is_waiting(self) -> bool {
        matches!(self, Self::RawWait | Self::CacheWait)
    }

    /// Whether the strand is partway through a multi-cycle transfer.
    #[inline(always)]
    pub const fn is_vector_transfer(self) -> bool {
        matches!(self, Self::VectorLoad | Self::VectorStore)
    }

    /// Name used in traces and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::VectorLoad => "VECTOR_LOAD",
            Self::VectorStore => "VECTOR_STORE",
            Self::RawWait => "RAW_WAIT",
            Self::CacheWait => "CACHE_WAIT",
        }
    }
}

impl fmt::Display for ControlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed parameters of a strand controller, taken from [`StrandConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrandParams {
    /// Lanes per vector register (1..=16).
    pub lanes: u8,
    /// Cycles spent in `RawWait` per entry.
    pub raw_delay: u8,
}

impl StrandParams {
    /// Lane index value meaning "no transfer in progress".
    #[inline(always)]
    pub const fn idle_lane(self) -> u8 {
        self.lanes.saturating_sub(1)
    }
}

impl From<&StrandConfig> for StrandParams {
    fn from(config: &StrandConfig) -> Self {
        Self {
            lanes: config.lanes,
            raw_delay: config.raw_delay,
        }
    }
}

/// Persistent state of one strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrandState {
    pub(crate) control_state: ControlState,
    pub(crate) raw_delay_countdown: u8,
    pub(crate) lane_index: u8,
    pub(crate) strided_offset: u32,
}

impl StrandState {
    /// State of a strand coming out of reset.
    pub const fn reset(params: StrandParams) -> Self {
        Self {
            control_state: ControlState::Ready,
            raw_delay_countdown: 0,
            lane_index: params.idle_lane(),
            strided_offset: 0,
        }
    }

    /// Current control state.
    #[inline(always)]
    pub const fn control_state(&self) -> ControlState {
        self.control_state
    }

    /// Remaining RAW wait cycles. Nonzero only in `RawWait`.
    #[inline(always)]
    pub const fn raw_delay_countdown(&self) -> u8 {
        self.raw_delay_countdown
    }

    /// Remaining lanes of the current transfer, minus one.
    #[inline(always)]
    pub const fn lane_index(&self) -> u8 {
        self.lane_index
    }

    /// Byte offset of the current lane from the transfer's base address.
    #[inline(always)]
    pub const fn strided_offset(&self) -> u32 {
        self.strided_offset
    }

    /// Whether the lane about to issue is the final lane of a transfer.
    ///
    /// A suspended strand is never at the end of a transfer: its lane index is the replay
    /// point, not progress.
    #[inline(always)]
    pub fn at_last_lane(&self) -> bool {
        self.lane_index == 0 && self.control_state != ControlState::CacheWait
    }
}
