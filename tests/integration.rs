use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use assert_cmd::cargo::cargo_bin_cmd;
use mood::engine;
use mood::intake::{self, IntakeError, MAX_FILE_BYTES};
use mood::models::AnalysisEvent;
use mood::session::Session;

/// Write a file with the given number of zero bytes. The analysis never
/// parses contents, so any bytes stand in for audio data.
fn write_file(dir: &std::path::Path, filename: &str, bytes: usize) -> PathBuf {
    let path = dir.join(filename);
    std::fs::write(&path, vec![0u8; bytes]).unwrap();
    path
}

/// Create a sparse file of the given length without writing its bytes.
fn write_sparse_file(dir: &std::path::Path, filename: &str, len: u64) -> PathBuf {
    let path = dir.join(filename);
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(len).unwrap();
    path
}

// --- Intake tests ---

#[test]
fn test_submit_valid_audio() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "take.mp3", 4096);

    let metadata = intake::submit(&path).unwrap();
    assert_eq!(metadata.name, "take.mp3");
    assert_eq!(metadata.byte_size, 4096);
}

#[test]
fn test_submit_rejects_non_audio() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "notes.txt", 64);

    let err = intake::submit(&path).unwrap_err();
    assert!(matches!(err, IntakeError::InvalidType { .. }));
    assert!(err.to_string().contains("not an audio file"));
}

#[test]
fn test_submit_rejects_oversized_audio() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sparse_file(dir.path(), "long.mp3", 60 * 1024 * 1024);

    let err = intake::submit(&path).unwrap_err();
    assert!(matches!(err, IntakeError::TooLarge { .. }));
    assert!(err.to_string().contains("exceeds the 50 MiB limit"));
}

#[test]
fn test_submit_accepts_exact_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sparse_file(dir.path(), "edge.mp3", MAX_FILE_BYTES);

    let metadata = intake::submit(&path).unwrap();
    assert_eq!(metadata.byte_size, MAX_FILE_BYTES);
}

#[test]
fn test_type_is_checked_before_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sparse_file(dir.path(), "huge.txt", 60 * 1024 * 1024);

    // An oversized non-audio file reports the type rejection
    let err = intake::submit(&path).unwrap_err();
    assert!(matches!(err, IntakeError::InvalidType { .. }));
}

#[test]
fn test_submit_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ghost.mp3");

    let err = intake::submit(&path).unwrap_err();
    assert!(matches!(err, IntakeError::Io { .. }));
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn test_scan_audio_files() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "track.flac", 4);
    write_file(dir.path(), "voice.mp3", 4);
    write_file(dir.path(), "cover.jpg", 4);
    write_file(dir.path(), "notes.txt", 4);

    let files = intake::scan_audio_files(dir.path());
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].file_name().unwrap(), "track.flac");
    assert_eq!(files[1].file_name().unwrap(), "voice.mp3");
}

// --- Session tests ---

fn sample_metadata(name: &str, byte_size: u64) -> mood::models::FileMetadata {
    mood::models::FileMetadata {
        name: name.to_string(),
        byte_size,
    }
}

#[test]
fn test_session_select_and_reset() {
    let mut session = Session::new();
    assert!(!session.can_analyze());

    session.select(sample_metadata("take.mp3", 4096));
    assert!(session.can_analyze());
    assert_eq!(session.file().unwrap().name, "take.mp3");
    assert!(session.result().is_none());

    session.reset();
    assert!(session.file().is_none());
    assert!(session.result().is_none());
    assert!(!session.is_pending());
    assert!(!session.can_analyze());
}

#[test]
fn test_session_analysis_flow() {
    let mut session = Session::new();
    session.select(sample_metadata("take.mp3", 4096));

    let (tx, rx) = mpsc::channel::<AnalysisEvent>();
    session
        .begin_analysis(&tx, Duration::from_millis(50))
        .unwrap();
    assert!(session.is_pending());
    assert!(!session.can_analyze());

    let AnalysisEvent::Completed { generation, result } =
        rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert!(session.complete(generation, result));
    assert!(!session.is_pending());
    assert!(session.result().is_some());
    assert!(session.can_analyze());
}

#[test]
fn test_begin_analysis_requires_file() {
    let mut session = Session::new();
    let (tx, _rx) = mpsc::channel::<AnalysisEvent>();
    assert!(session
        .begin_analysis(&tx, Duration::from_millis(10))
        .is_err());
}

#[test]
fn test_begin_analysis_refuses_second_request() {
    let mut session = Session::new();
    session.select(sample_metadata("take.mp3", 4096));

    let (tx, _rx) = mpsc::channel::<AnalysisEvent>();
    session
        .begin_analysis(&tx, Duration::from_millis(500))
        .unwrap();
    assert!(session
        .begin_analysis(&tx, Duration::from_millis(500))
        .is_err());
}

#[test]
fn test_new_selection_cancels_pending_analysis() {
    let mut session = Session::new();
    session.select(sample_metadata("first.mp3", 4096));

    let (tx, rx) = mpsc::channel::<AnalysisEvent>();
    session
        .begin_analysis(&tx, Duration::from_millis(100))
        .unwrap();

    // Selecting a new file mid-delay cancels the timer before it fires
    session.select(sample_metadata("second.mp3", 8192));
    assert!(!session.is_pending());
    assert!(session.can_analyze());

    std::thread::sleep(Duration::from_millis(300));
    assert!(rx.try_recv().is_err(), "cancelled analysis must not deliver");
    assert!(session.result().is_none());
}

#[test]
fn test_stale_generation_is_dropped() {
    let mut session = Session::new();
    session.select(sample_metadata("take.mp3", 4096));

    let (tx, _rx) = mpsc::channel::<AnalysisEvent>();
    session
        .begin_analysis(&tx, Duration::from_secs(5))
        .unwrap();

    let result = engine::analyze(session.file().unwrap());

    // A delivery tagged with a superseded generation changes nothing
    assert!(!session.complete(999, result.clone()));
    assert!(session.result().is_none());
    assert!(session.is_pending());

    // The first scheduled analysis carries generation 1
    assert!(session.complete(1, result));
    assert!(session.result().is_some());
}

// --- CLI tests ---

#[test]
fn test_cli_rejects_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "notes.txt", 64);

    cargo_bin_cmd!("mood")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicates::str::contains("not an audio file"));
}

#[test]
fn test_cli_rejects_oversized_audio() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sparse_file(dir.path(), "long.mp3", 60 * 1024 * 1024);

    cargo_bin_cmd!("mood")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicates::str::contains("exceeds the 50 MiB limit"));
}

#[test]
fn test_cli_directory_requires_tui() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("mood")
        .arg(dir.path().to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicates::str::contains("is a directory"));
}

#[test]
fn test_cli_tui_requires_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "take.mp3", 64);

    cargo_bin_cmd!("mood")
        .args([path.to_str().unwrap(), "--tui"])
        .assert()
        .failure()
        .stderr(predicates::str::contains(
            "--tui expects a directory of audio files",
        ));
}

#[test]
fn test_cli_json_reference_values() {
    let dir = tempfile::tempdir().unwrap();
    // "a.mp3" at 1,000,000 bytes is the reference scenario: seed 1,000,005
    let path = write_file(dir.path(), "a.mp3", 1_000_000);

    let assert = cargo_bin_cmd!("mood")
        .args([path.to_str().unwrap(), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(parsed["file"]["name"], "a.mp3");
    assert_eq!(parsed["file"]["byte_size"], 1_000_000);
    assert_eq!(parsed["analysis"]["emotions"]["calm"], 50);
    assert_eq!(parsed["analysis"]["emotions"]["tense"], 22);
    assert_eq!(parsed["analysis"]["emotions"]["angry"], 14);
    assert_eq!(parsed["analysis"]["emotions"]["excited"], 15);
    assert_eq!(parsed["analysis"]["conflict_risk"], 30);
    assert_eq!(parsed["risk_tier"], "Medium");

    let intensity = parsed["analysis"]["intensity"].as_array().unwrap();
    assert_eq!(intensity.len(), 20);
    for value in intensity {
        let value = value.as_f64().unwrap();
        assert!((20.0..100.0).contains(&value));
    }
}

#[test]
fn test_cli_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "a.mp3", 1_000_000);

    cargo_bin_cmd!("mood")
        .arg(path.to_str().unwrap())
        .assert()
        .success()
        .stderr(predicates::str::contains("Analyzing a.mp3"))
        .stdout(predicates::str::contains("Dominant emotion: calm"))
        .stdout(predicates::str::contains("Conflict risk:     30% (Medium)"));
}
