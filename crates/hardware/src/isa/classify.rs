//! Hazard Classifier.
//!
//! Pure decode of the pending instruction word into the categories the strand state
//! machine reacts to. It performs:
//! 1. **Format Detection:** Only memory-access (format C) words are examined further.
//! 2. **Hazard Categories:** Loads, synchronized stores, multi-cycle transfers, and masked
//!    encodings.
//! 3. **Stride Extraction:** The per-lane address increment, sliced according to masking.
//!
//! Classification never depends on strand state. Words outside format C classify as ordinary
//! single-cycle instructions; the externally supplied `long_latency` flag is only honored for
//! them.

use super::instruction::MemoryFormatBits;
use super::opcodes::{Access, MemOp};

/// Hazard categories of one instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    /// Memory operation subtype; `None` for words outside format C.
    pub mem_op: Option<MemOp>,
    /// Format C load (direction bit set).
    pub is_load: bool,
    /// Format C store of the `Sync` subtype.
    pub is_synchronized_store: bool,
    /// Strided or scatter/gather access that iterates lanes across cycles.
    pub is_multi_cycle_transfer: bool,
    /// Encoding carries a mask register field.
    pub is_masked: bool,
    /// Non-format-C instruction that decode marked as long-latency.
    pub long_latency: bool,
    /// Per-lane stride taken from the word (zero outside format C).
    pub stride: u32,
}

impl Classification {
    /// Whether the word is a memory-access instruction.
    #[inline(always)]
    pub const fn is_format_c(&self) -> bool {
        self.mem_op.is_some()
    }

    /// Access direction for format C words.
    pub const fn access(&self) -> Option<Access> {
        match self.mem_op {
            Some(_) if self.is_load => Some(Access::Load),
            Some(_) => Some(Access::Store),
            None => None,
        }
    }

    /// Whether issuing this instruction alone (outside a transfer) leaves a pending
    /// read-after-write hazard.
    ///
    /// Any load or synchronized store qualifies; no register dependency check is made.
    pub const fn has_raw_hazard(&self) -> bool {
        if self.is_format_c() {
            self.is_load || self.is_synchronized_store
        } else {
            self.long_latency
        }
    }
}

/// Classifies a pending instruction word.
///
/// # Arguments
///
/// * `word` - The 32-bit instruction word presented by fetch.
/// * `long_latency` - Decode's long-latency flag; ignored for format C words.
///
/// # Returns
///
/// The hazard categories of the word.
pub fn classify(word: u32, long_latency: bool) -> Classification {
    if !word.is_format_c() {
        return Classification {
            long_latency,
            ..Classification::default()
        };
    }

    let op = word.mem_op();
    let is_load = word.load_bit();
    let is_masked = op.is_masked();

    Classification {
        mem_op: Some(op),
        is_load,
        is_synchronized_store: !is_load && op == MemOp::Sync,
        is_multi_cycle_transfer: op.is_multi_cycle(),
        is_masked,
        long_latency: false,
        stride: word.stride(is_masked),
    }
}
