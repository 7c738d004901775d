//! Global constants.
//!
//! Limits on the per-strand vector transfer state. The lane index is a 4-bit field in
//! hardware, so a vector register holds at most sixteen lanes.

/// Width in bits of the lane index field.
pub const LANE_INDEX_BITS: u32 = 4;

/// Maximum number of lanes in a vector register.
pub const MAX_LANES: u8 = 1 << LANE_INDEX_BITS;
