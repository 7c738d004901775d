//! Common types shared across the simulator.
//!
//! This module provides fundamental building blocks used by every other component. It includes:
//! 1. **Constants:** Vector lane limits shared by the controller and the configuration.
//! 2. **Error Handling:** Contract violations raised by the controller and the simulator's
//!    top-level error type.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types and contract violation definitions.
pub mod error;

pub use constants::MAX_LANES;
pub use error::{ContractViolation, SimError};
