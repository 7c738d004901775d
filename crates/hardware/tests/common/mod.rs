//! Shared test infrastructure.

/// Instruction word builders.
pub mod builder;

/// Single-strand test harness.
pub mod harness;
