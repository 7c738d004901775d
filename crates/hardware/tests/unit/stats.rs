//! # Statistics Tests
//!
//! Verifies per-strand counter aggregation, utilization, and JSON export.

use pretty_assertions::assert_eq;
use strand_core::stats::{STATS_SECTIONS, SimStats, StrandStats};

fn strand(issued: u64, wait_raw: u64, rollbacks: u64) -> StrandStats {
    StrandStats {
        issued,
        wait_raw,
        rollbacks,
        ..StrandStats::default()
    }
}

#[test]
fn test_new_is_zeroed() {
    let stats = SimStats::new(3);
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.strands, vec![StrandStats::default(); 3]);
    assert_eq!(stats.issue_utilization(), 0.0);
}

#[test]
fn test_totals_sum_strands() {
    let mut stats = SimStats::new(2);
    stats.strands[0] = strand(5, 3, 1);
    stats.strands[1] = strand(2, 0, 2);
    assert_eq!(stats.totals(), strand(7, 3, 3));
}

#[test]
fn test_issue_utilization() {
    let mut stats = SimStats::new(2);
    stats.cycles = 10;
    stats.strands[0].issued = 4;
    stats.strands[1].issued = 4;
    assert!((stats.issue_utilization() - 0.8).abs() < f64::EPSILON);
}

#[test]
fn test_json_export_skips_host_time() {
    let mut stats = SimStats::new(1);
    stats.cycles = 42;
    let value: serde_json::Value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["cycles"], 42);
    assert_eq!(value["strands"][0]["wait_cache"], 0);
    assert!(value.get("start_time").is_none());
}

#[test]
fn test_sections_are_known() {
    assert_eq!(STATS_SECTIONS, &["summary", "strands", "hazards"]);
    let stats = SimStats::new(1);
    stats.print_sections(&["hazards".to_string()]);
    stats.print();
}
