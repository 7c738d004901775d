//! Simulation driver.
//!
//! Provides the surroundings a strand controller needs in order to run: a fetch stream per
//! strand, scripted hazard events standing in for the execution and cache units, and the
//! simulator that steps every strand and the arbiter in lockstep.

/// Per-strand instruction streams.
pub mod fetch;
/// Scripted programs and hazard events.
pub mod scenario;
/// Multi-strand simulator.
pub mod simulator;

pub use fetch::{FetchUnit, ProgramWord};
pub use scenario::{EventKind, HazardEvent, Scenario, StrandScript};
pub use simulator::{CycleTrace, Simulator, StepReport, StrandSnapshot};
