//! Core issue control.
//!
//! This module contains the per-strand issue controller and the strand-select arbiter
//! that chooses which ready strand issues each cycle.

/// Strand-select arbitration among ready strands.
pub mod arbiter;

/// Per-strand issue controller (state, next-state function, issue gate, contract checks).
pub mod strand;

pub use self::arbiter::Arbiter;
pub use self::strand::{ControlState, StrandController, StrandState};
