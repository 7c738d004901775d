use strand_core::StrandController;
use strand_core::common::ContractViolation;
use strand_core::config::{ContractPolicy, StrandConfig};
use strand_core::core::strand::{
    ControlState, HazardSignals, StrandInputs, StrandOutputs, StrandState,
};

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Drives a single strand controller cycle by cycle.
pub struct TestContext {
    pub strand: StrandController,
    pub cycle: u64,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// A 16-lane strand with a 3-cycle RAW delay that aborts on contract violations.
    pub fn new() -> Self {
        Self::with_geometry(16, 3)
    }

    pub fn with_geometry(lanes: u8, raw_delay: u8) -> Self {
        Self::with_policy(lanes, raw_delay, ContractPolicy::Abort)
    }

    pub fn with_policy(lanes: u8, raw_delay: u8, policy: ContractPolicy) -> Self {
        init_tracing();
        let config = StrandConfig {
            lanes,
            raw_delay,
            ..StrandConfig::default()
        };
        Self {
            strand: StrandController::new(0, &config, policy),
            cycle: 0,
        }
    }

    pub fn state(&self) -> &StrandState {
        self.strand.state()
    }

    pub fn control_state(&self) -> ControlState {
        self.strand.state().control_state()
    }

    /// Steps with arbitrary inputs, panicking on a contract violation.
    pub fn step(&mut self, inputs: StrandInputs) -> StrandOutputs {
        let cycle = self.cycle;
        self.try_step(inputs)
            .unwrap_or_else(|v| panic!("cycle {cycle}: unexpected violation: {v}"))
    }

    pub fn try_step(&mut self, inputs: StrandInputs) -> Result<StrandOutputs, ContractViolation> {
        let outputs = self.strand.step(&inputs)?;
        self.cycle += 1;
        Ok(outputs)
    }

    /// Presents `word` with the issue grant asserted.
    pub fn issue(&mut self, word: u32) -> StrandOutputs {
        self.step(StrandInputs::fetched(word).granted(true))
    }

    /// Presents a long-latency non-memory word with the issue grant asserted.
    pub fn issue_long_latency(&mut self, word: u32) -> StrandOutputs {
        self.step(StrandInputs::fetched(word).granted(true).long_latency(true))
    }

    /// A cycle with no instruction and no hazards.
    pub fn idle(&mut self) -> StrandOutputs {
        self.step(StrandInputs::default())
    }

    /// A cycle with only hazard signals.
    pub fn signal(&mut self, hazards: HazardSignals) -> StrandOutputs {
        self.step(StrandInputs::default().with_hazards(hazards))
    }

    /// Idles until the strand leaves `RawWait`, returning the number of cycles spent.
    pub fn drain_raw_wait(&mut self) -> u32 {
        let mut cycles = 0;
        while self.control_state() == ControlState::RawWait {
            let _ = self.idle();
            cycles += 1;
            assert!(cycles <= 255, "strand stuck in RawWait");
        }
        cycles
    }
}
