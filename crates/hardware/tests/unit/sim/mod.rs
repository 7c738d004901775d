/// Scenario documents and fetch streams.
pub mod scenario;
