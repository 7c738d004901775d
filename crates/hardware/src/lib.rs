//! Multi-strand issue controller model.
//!
//! This crate implements a cycle-level model of the per-strand instruction issue controller
//! used by a multi-threaded in-order core, with the following:
//! 1. **ISA:** Memory-format decode and the hazard classifier for pending instruction words.
//! 2. **Core:** The strand state machine (next-state function, issue gate, contract checks)
//!    and the strand-select arbiter.
//! 3. **Simulation:** Per-strand fetch streams, scripted hazard scenarios, and a staged
//!    multi-strand step loop.
//! 4. **Support:** Configuration, error taxonomy, and performance statistics.

/// Common types and constants (errors, lane limits).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Strand controller and strand-select arbiter.
pub mod core;
/// Instruction word layout, encoding helpers, and hazard classification.
pub mod isa;
/// Fetch model, hazard scenarios, and the multi-strand simulator.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Per-strand issue controller.
pub use crate::core::strand::StrandController;
/// Top-level multi-strand simulator.
pub use crate::sim::Simulator;
