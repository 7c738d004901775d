//! Scenario and Fetch Tests.
//!
//! JSON scenario parsing, per-cycle hazard merging, and the fetch stream the
//! simulator builds from each strand's program.

use std::io::Write;

use pretty_assertions::assert_eq;
use strand_core::common::SimError;
use strand_core::core::strand::HazardSignals;
use strand_core::sim::{EventKind, FetchUnit, HazardEvent, ProgramWord, Scenario, StrandScript};

const SCENARIO: &str = r#"{
    "strands": [
        {
            "program": [3019902976, { "word": 3221225472, "long_latency": true }],
            "events": [
                { "cycle": 2, "kind": "suspend", "restart_pc": 0, "lane": 2, "offset": 128 },
                { "cycle": 9, "kind": "resume" }
            ]
        },
        { "program": [3221225472] }
    ]
}"#;

#[test]
fn parses_programs_and_events() {
    let scenario = Scenario::from_json(SCENARIO).unwrap();
    assert_eq!(scenario.strands.len(), 2);

    let first = &scenario.strands[0];
    assert_eq!(
        first.program,
        vec![
            ProgramWord::new(0xB400_1000),
            ProgramWord::long_latency(0xC000_0000)
        ]
    );
    assert_eq!(
        first.events[0],
        HazardEvent {
            cycle: 2,
            kind: EventKind::Suspend,
            restart_pc: Some(0),
            lane: 2,
            offset: 128,
        }
    );
    assert_eq!(first.last_event_cycle(), Some(9));
    assert!(scenario.strands[1].events.is_empty());
}

#[test]
fn hazards_at_reports_signals_and_restart() {
    let scenario = Scenario::from_json(SCENARIO).unwrap();
    let script = &scenario.strands[0];
    assert_eq!(script.hazards_at(2), (HazardSignals::suspend(2, 128), Some(0)));
    assert_eq!(script.hazards_at(9), (HazardSignals::resume(), None));
    assert_eq!(script.hazards_at(3), (HazardSignals::NONE, None));
}

#[test]
fn events_on_one_cycle_merge() {
    let script = StrandScript::default()
        .with_event(HazardEvent {
            cycle: 4,
            kind: EventKind::Rollback,
            restart_pc: Some(1),
            lane: 0,
            offset: 0,
        })
        .with_event(HazardEvent {
            cycle: 4,
            kind: EventKind::Retry,
            restart_pc: None,
            lane: 3,
            offset: 24,
        });
    assert_eq!(script.hazards_at(4), (HazardSignals::retry(3, 24), Some(1)));
}

#[test]
fn unknown_event_kind_rejected() {
    let json = r#"{ "strands": [{ "events": [{ "cycle": 0, "kind": "flush" }] }] }"#;
    let err = Scenario::from_json(json).unwrap_err();
    assert!(matches!(err, SimError::Json(_)));
}

#[test]
fn from_file_reads_scenario() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCENARIO.as_bytes()).unwrap();
    let scenario = Scenario::from_file(file.path()).unwrap();
    assert_eq!(scenario, Scenario::from_json(SCENARIO).unwrap());
}

#[test]
fn fetch_stream_walks_program() {
    let mut fetch = FetchUnit::new(vec![ProgramWord::new(10), ProgramWord::new(20)]);
    assert_eq!(fetch.len(), 2);
    assert!(!fetch.is_empty());
    assert_eq!(fetch.pending().map(|w| w.word), Some(10));
    fetch.advance();
    assert_eq!(fetch.pc(), 1);
    fetch.advance();
    assert!(fetch.is_drained());
    fetch.reset();
    assert_eq!(fetch.pending().map(|w| w.word), Some(10));
}

#[test]
fn empty_program_is_drained() {
    let fetch = FetchUnit::new(Vec::new());
    assert!(fetch.is_empty());
    assert!(fetch.is_drained());
    assert_eq!(fetch.pending(), None);
}
