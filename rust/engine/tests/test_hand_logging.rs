use std::fs;

use indian_poker_engine::cards::{Card, Rank as R, Suit as S};
use indian_poker_engine::logger::{
    format_hand_id, read_records, ActionRecord, HandLogger, HandRecord,
};
use indian_poker_engine::rules::Action;

fn record(hand_id: &str, ts: Option<String>) -> HandRecord {
    HandRecord {
        hand_id: hand_id.to_string(),
        seed: Some(1),
        dealer_id: 0,
        hands: vec![
            vec![Card::new(S::Clubs, R::Ace)],
            vec![Card::new(S::Hearts, R::Ten)],
        ],
        actions: vec![
            ActionRecord {
                player_id: 1,
                action: Action::Call,
            },
            ActionRecord {
                player_id: 0,
                action: Action::Check,
            },
        ],
        payoffs: vec![-2, 2],
        winners: vec![1],
        ts,
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&record("20250102-000001", None)).expect("write");
    logger.write(&record("20250102-000002", None)).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    assert_eq!(bytes.iter().filter(|&&b| b == b'\n').count(), 2);
}

#[test]
fn records_read_back_with_timestamp() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let original = record("20250102-000001", None);
    logger.write(&original).expect("write");
    logger
        .write(&record("20250102-000002", Some("2025-01-02T00:00:00Z".into())))
        .expect("write");

    let lines = read_records(&path).expect("read back");
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ts.is_some());
    assert_eq!(lines[0].actions, original.actions);
    assert_eq!(lines[0].hands, original.hands);
    assert_eq!(lines[1].ts.as_deref(), Some("2025-01-02T00:00:00Z"));
}

#[test]
fn actions_serialize_by_name() {
    let json = serde_json::to_string(&record("x", None)).expect("json");
    assert!(json.contains("\"call\""));
    assert!(json.contains("\"check\""));
}

#[test]
fn sequential_ids_increment() {
    let mut logger = HandLogger::with_seq_for_test("20251231");
    assert_eq!(logger.next_id(), "20251231-000001");
    assert_eq!(logger.next_id(), "20251231-000002");
    assert_eq!(format_hand_id("20250101", 42), "20250101-000042");
}

#[test]
fn unparsable_line_is_reported_by_number() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.jsonl");
    let good = serde_json::to_string(&record("20250102-000001", None)).expect("json");
    fs::write(&path, format!("{good}\n\n{{not json\n")).expect("write");
    let err = read_records(&path).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("line 3"));
}
