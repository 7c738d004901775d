//! # Configuration Tests
//!
//! Tests for configuration structures, deserialization, defaults, and
//! validation.

use std::io::Write;

use pretty_assertions::assert_eq;
use strand_core::common::SimError;
use strand_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace);
    assert_eq!(config.general.max_cycles, 10_000);
    assert_eq!(config.strand.count, 4);
    assert_eq!(config.strand.lanes, 16);
    assert_eq!(config.strand.raw_delay, 3);
    assert_eq!(config.arbiter.policy, ArbiterPolicy::RoundRobin);
    assert!(config.validate().is_ok());
}

#[test]
fn test_contract_policy_default_follows_build() {
    let expected = if cfg!(debug_assertions) {
        ContractPolicy::Abort
    } else {
        ContractPolicy::Log
    };
    assert_eq!(ContractPolicy::default(), expected);
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_partial_json_keeps_field_defaults() {
    let config = Config::from_json(r#"{ "strand": { "lanes": 8 } }"#).unwrap();
    assert_eq!(config.strand.lanes, 8);
    assert_eq!(config.strand.count, 4);
    assert_eq!(config.strand.raw_delay, 3);
    assert_eq!(config.general, GeneralConfig::default());
}

#[test]
fn test_enum_names() {
    let config = Config::from_json(
        r#"{
            "general": { "contract_policy": "Log" },
            "arbiter": { "policy": "FixedPriority" }
        }"#,
    )
    .unwrap();
    assert_eq!(config.general.contract_policy, ContractPolicy::Log);
    assert_eq!(config.arbiter.policy, ArbiterPolicy::FixedPriority);
}

#[test]
fn test_json_round_trip() {
    let mut config = Config::default();
    config.strand.count = 2;
    config.general.trace = true;
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), config);
}

#[test]
fn test_unknown_enum_rejected() {
    let err = Config::from_json(r#"{ "arbiter": { "policy": "Lottery" } }"#).unwrap_err();
    assert!(matches!(err, SimError::Json(_)));
}

#[test]
fn test_validation_names_field() {
    let cases = [
        (r#"{ "strand": { "count": 0 } }"#, "strand.count"),
        (r#"{ "strand": { "lanes": 0 } }"#, "strand.lanes"),
        (r#"{ "strand": { "lanes": 17 } }"#, "strand.lanes"),
        (r#"{ "strand": { "raw_delay": 0 } }"#, "strand.raw_delay"),
    ];
    for (json, field) in cases {
        match Config::from_json(json) {
            Err(SimError::InvalidConfig(msg)) => assert!(msg.contains(field), "{msg}"),
            other => panic!("{json}: expected InvalidConfig, got {other:?}"),
        }
    }
}

#[test]
fn test_sixteen_lanes_is_the_limit() {
    assert!(Config::from_json(r#"{ "strand": { "lanes": 16 } }"#).is_ok());
    assert!(Config::from_json(r#"{ "strand": { "lanes": 1 } }"#).is_ok());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "strand": {{ "count": 8, "raw_delay": 5 }} }}"#).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.strand.count, 8);
    assert_eq!(config.strand.raw_delay, 5);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
