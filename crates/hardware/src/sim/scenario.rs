//! Hazard scenarios.
//!
//! A scenario scripts what the execution and cache units would do: each strand gets a program
//! and a list of hazard events keyed by cycle. Events landing on the same strand and cycle
//! are wired-OR together, which also lets a scenario describe illegal signal combinations.
//!
//! ```json
//! {
//!   "strands": [
//!     {
//!       "program": [3019902976, { "word": 3221225472, "long_latency": true }],
//!       "events": [
//!         { "cycle": 2, "kind": "suspend", "restart_pc": 0, "lane": 2, "offset": 128 },
//!         { "cycle": 9, "kind": "resume" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::fetch::ProgramWord;
use crate::common::SimError;
use crate::core::strand::HazardSignals;

/// Kind of hazard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Ordinary rollback.
    Rollback,
    /// Rollback into `CacheWait`, replaying from `lane`/`offset`.
    Suspend,
    /// Rollback that refetches immediately, replaying from `lane`/`offset`.
    Retry,
    /// Cache fill completion for a suspended strand.
    Resume,
}

/// A hazard event delivered to one strand in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct HazardEvent {
    /// Cycle in which the signals are asserted.
    pub cycle: u64,
    /// Which signals to assert.
    pub kind: EventKind,
    /// Program index fetch restarts from; rollbacks without one leave fetch where it is.
    #[serde(default)]
    pub restart_pc: Option<usize>,
    /// Replay lane for suspend and retry.
    #[serde(default)]
    pub lane: u8,
    /// Replay strided offset for suspend and retry.
    #[serde(default)]
    pub offset: u32,
}

impl HazardEvent {
    /// The signal bundle this event asserts.
    pub const fn signals(&self) -> HazardSignals {
        match self.kind {
            EventKind::Rollback => HazardSignals::rollback(),
            EventKind::Suspend => HazardSignals::suspend(self.lane, self.offset),
            EventKind::Retry => HazardSignals::retry(self.lane, self.offset),
            EventKind::Resume => HazardSignals::resume(),
        }
    }
}

/// Script for a single strand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StrandScript {
    /// Instruction stream.
    #[serde(default)]
    pub program: Vec<ProgramWord>,
    /// Hazard events, in any order.
    #[serde(default)]
    pub events: Vec<HazardEvent>,
}

impl StrandScript {
    /// A script with a program and no hazard events.
    pub const fn new(program: Vec<ProgramWord>) -> Self {
        Self {
            program,
            events: Vec::new(),
        }
    }

    /// Adds an event.
    #[must_use]
    pub fn with_event(mut self, event: HazardEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Merged signals and fetch restart point for `cycle`.
    pub fn hazards_at(&self, cycle: u64) -> (HazardSignals, Option<usize>) {
        self.events
            .iter()
            .filter(|event| event.cycle == cycle)
            .fold((HazardSignals::NONE, None), |(signals, restart), event| {
                (signals.merge(event.signals()), event.restart_pc.or(restart))
            })
    }

    /// Last cycle with an event, if any.
    pub fn last_event_cycle(&self) -> Option<u64> {
        self.events.iter().map(|event| event.cycle).max()
    }
}

/// Programs and hazard events for every strand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Scenario {
    /// Per-strand scripts, indexed by strand. Missing strands run empty scripts.
    #[serde(default)]
    pub strands: Vec<StrandScript>,
}

impl Scenario {
    /// Parses a JSON scenario document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] for malformed JSON or an unknown event kind.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] when the file cannot be read and [`SimError::Json`] when it
    /// does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks the scenario against the strand count.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Scenario`] when the scenario scripts more strands than exist.
    pub fn validate(&self, strands: usize) -> Result<(), SimError> {
        if self.strands.len() > strands {
            return Err(SimError::Scenario(format!(
                "{} strand scripts for {strands} strands",
                self.strands.len()
            )));
        }
        Ok(())
    }
}
