//! Configuration system for the strand simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline strand geometry (strand count, lanes, RAW delay) and run limits.
//! 2. **Structures:** Hierarchical config for general, strand, and arbiter settings.
//! 3. **Enums:** Contract violation policy and strand-select arbitration policy.
//!
//! Configuration is supplied as JSON (`Config::from_json` / `Config::from_file`) or built with
//! `Config::default()`. Every section and field may be omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{MAX_LANES, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Number of strands sharing the pipeline.
    pub const STRAND_COUNT: usize = 4;

    /// Lanes per vector register.
    ///
    /// A strided or scatter/gather transfer issues once per lane.
    pub const LANES: u8 = 16;

    /// Cycles a strand is held after issuing a load or synchronized store.
    ///
    /// Covers the latency between issue and the load result reaching the register file.
    pub const RAW_DELAY: u8 = 3;

    /// Cycle limit for `Simulator::run`.
    pub const MAX_CYCLES: u64 = 10_000;
}

/// Handling of illegal hazard-signal combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum ContractPolicy {
    /// Fail the step; the simulator reports cycle, strand and violated invariant.
    Abort,
    /// Emit a warning and evaluate the step as if the signals were legal.
    Log,
}

impl Default for ContractPolicy {
    /// `Abort` in debug builds, `Log` in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Abort
        } else {
            Self::Log
        }
    }
}

/// Strand-select arbitration algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum ArbiterPolicy {
    /// Grant rotates past the most recently granted strand.
    #[default]
    RoundRobin,
    /// Lowest-numbered ready strand always wins.
    FixedPriority,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use strand_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.strand.count, 4);
/// assert_eq!(config.strand.lanes, 16);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use strand_core::config::{ArbiterPolicy, Config, ContractPolicy};
///
/// let json = r#"{
///     "general": { "trace": true, "max_cycles": 500, "contract_policy": "Log" },
///     "strand": { "count": 2, "lanes": 4, "raw_delay": 2 },
///     "arbiter": { "policy": "FixedPriority" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.general.contract_policy, ContractPolicy::Log);
/// assert_eq!(config.strand.lanes, 4);
/// assert_eq!(config.arbiter.policy, ArbiterPolicy::FixedPriority);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Strand geometry and hazard timing
    #[serde(default)]
    pub strand: StrandConfig,
    /// Strand-select arbitration
    #[serde(default)]
    pub arbiter: ArbiterConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] for malformed JSON and [`SimError::InvalidConfig`] when a
    /// field is out of range.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] when the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks that every field lies in its legal range.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SimError> {
        let strand = &self.strand;
        if strand.count == 0 {
            return Err(SimError::InvalidConfig(
                "strand.count must be at least 1".to_string(),
            ));
        }
        if strand.lanes == 0 || strand.lanes > MAX_LANES {
            return Err(SimError::InvalidConfig(format!(
                "strand.lanes must be in 1..={MAX_LANES}, got {}",
                strand.lanes
            )));
        }
        if strand.raw_delay == 0 {
            return Err(SimError::InvalidConfig(
                "strand.raw_delay must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Record a per-cycle snapshot of every strand
    #[serde(default)]
    pub trace: bool,

    /// Cycle limit for a full run
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// What to do when hazard signals break the controller's contract
    #[serde(default)]
    pub contract_policy: ContractPolicy,
}

impl GeneralConfig {
    /// Returns the default cycle limit.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            max_cycles: defaults::MAX_CYCLES,
            contract_policy: ContractPolicy::default(),
        }
    }
}

/// Strand geometry and hazard timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StrandConfig {
    /// Number of strands sharing the pipeline
    #[serde(default = "StrandConfig::default_count")]
    pub count: usize,

    /// Lanes per vector register (1..=16)
    #[serde(default = "StrandConfig::default_lanes")]
    pub lanes: u8,

    /// Cycles held in RAW wait after a load or synchronized store issues
    #[serde(default = "StrandConfig::default_raw_delay")]
    pub raw_delay: u8,
}

impl StrandConfig {
    /// Returns the default strand count.
    fn default_count() -> usize {
        defaults::STRAND_COUNT
    }

    /// Returns the default lanes per vector.
    fn default_lanes() -> u8 {
        defaults::LANES
    }

    /// Returns the default RAW delay.
    fn default_raw_delay() -> u8 {
        defaults::RAW_DELAY
    }
}

impl Default for StrandConfig {
    fn default() -> Self {
        Self {
            count: defaults::STRAND_COUNT,
            lanes: defaults::LANES,
            raw_delay: defaults::RAW_DELAY,
        }
    }
}

/// Strand-select arbiter configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArbiterConfig {
    /// Arbitration algorithm
    #[serde(default)]
    pub policy: ArbiterPolicy,
}
