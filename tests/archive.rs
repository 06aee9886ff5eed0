//! Tests for binary and JSON flow archives.
mod common;
use charla::prelude::*;
use common::*;

fn sample_positions() -> AHashMap<NodeId, Position> {
    [
        ("root".to_string(), Position::new(12.0, 34.0)),
        ("plans".to_string(), Position::new(-5.0, 600.0)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_binary_round_trip_preserves_everything() {
    let archive = FlowArchive::new(create_branching_flow(), sample_positions());

    let bytes = archive.to_bytes().expect("archive should encode");
    let restored = FlowArchive::from_bytes(&bytes).expect("archive should decode");

    assert_eq!(restored.flow, archive.flow);
    assert_eq!(restored.positions, archive.positions);
}

#[test]
fn test_file_round_trip() {
    let archive = FlowArchive::new(create_signup_flow(), AHashMap::new());
    let path = std::env::temp_dir().join(format!("charla-archive-{}.bin", std::process::id()));
    let path = path.to_string_lossy().into_owned();

    archive.save(&path).expect("archive should save");
    let restored = FlowArchive::from_file(&path).expect("archive should load");
    let _ = std::fs::remove_file(&path);

    assert_eq!(restored.flow, archive.flow);
}

#[test]
fn test_corrupt_bytes_fail_to_decode() {
    let result = FlowArchive::from_bytes(&[0xde, 0xad, 0xbe, 0xef]);
    match result {
        Err(ArchiveError::Deserialize(message)) => assert!(!message.is_empty()),
        other => panic!("Expected a deserialize error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_reports_the_path() {
    let result = FlowArchive::from_file("does/not/exist.bin");
    match result {
        Err(ArchiveError::Read { path, .. }) => assert_eq!(path, "does/not/exist.bin"),
        other => panic!("Expected a read error, got {:?}", other),
    }
}

#[test]
fn test_json_round_trip() {
    let archive = FlowArchive::new(create_branching_flow(), sample_positions());

    let json = archive.to_json().expect("archive should serialize");
    let restored = FlowArchive::from_json(&json).expect("archive should parse");

    assert_eq!(restored.flow, archive.flow);
    assert_eq!(restored.positions, archive.positions);
}

#[test]
fn test_bare_flow_json_is_accepted() {
    let flow = create_branching_flow();
    let json = serde_json::to_string(&flow).expect("flow should serialize");

    let archive = FlowArchive::from_json(&json).expect("bare flow should parse");
    assert_eq!(archive.flow, flow);
    assert!(archive.positions.is_empty());
}
