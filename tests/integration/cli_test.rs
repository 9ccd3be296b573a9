//! CLI-level tests for the chatcast binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const SCRIPT: &str = r#"{
    "intro": {"title_text": "Catch Up", "theme": "default"},
    "characters": [
        {"id": "alice", "display_name": "Alice", "side": "left"},
        {"id": "me", "display_name": "Me", "side": "right"}
    ],
    "items": [
        {"sender": "alice", "message": "hey!", "order": 0},
        {"sender": "me", "message": "hey yourself", "order": 1},
        {"sender": "time_divider", "message": "Later", "order": 2},
        {"sender": "alice", "message": "dinner?", "order": 3}
    ]
}"#;

fn write_script(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("script.json");
    std::fs::write(&path, SCRIPT).unwrap();
    path
}

#[test]
fn compile_emits_timeline_json() {
    let dir = tempdir().unwrap();
    let script = write_script(&dir);

    Command::cargo_bin("chatcast")
        .unwrap()
        .arg("compile")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"events\""))
        .stdout(predicate::str::contains("\"total_duration\""))
        .stdout(predicate::str::contains("\"divider\""));
}

#[test]
fn compile_writes_output_file() {
    let dir = tempdir().unwrap();
    let script = write_script(&dir);
    let out = dir.path().join("timeline.json");

    Command::cargo_bin("chatcast")
        .unwrap()
        .arg("compile")
        .arg(&script)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let raw = std::fs::read_to_string(&out).unwrap();
    let timeline: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(timeline["events"].as_array().unwrap().len(), 4);
}

#[test]
fn compile_rejects_missing_script() {
    Command::cargo_bin("chatcast")
        .unwrap()
        .arg("compile")
        .arg("no-such-file.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load script"));
}

#[test]
fn render_frame_log_covers_all_events() {
    let dir = tempdir().unwrap();
    let script = write_script(&dir);
    let out = dir.path().join("frames.json");

    Command::cargo_bin("chatcast")
        .unwrap()
        .arg("render")
        .arg(&script)
        .arg("--fps")
        .arg("30")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let raw = std::fs::read_to_string(&out).unwrap();
    let log: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let appearances = log["appearances"].as_array().unwrap();
    assert_eq!(appearances.len(), 4);
    // Appearances land in event order on non-decreasing frames.
    let frames: Vec<u64> = appearances
        .iter()
        .map(|a| a["frame"].as_u64().unwrap())
        .collect();
    assert!(frames.windows(2).all(|pair| pair[0] <= pair[1]));
    // The divider toggled the overlay on and back off.
    let overlay = log["overlay_changes"].as_array().unwrap();
    assert_eq!(overlay.len(), 2);
    assert_eq!(overlay[0]["active"], serde_json::Value::Bool(true));
    assert_eq!(overlay[1]["active"], serde_json::Value::Bool(false));
}

#[test]
fn play_at_high_speed_prints_all_messages() {
    let dir = tempdir().unwrap();
    let script = write_script(&dir);

    Command::cargo_bin("chatcast")
        .unwrap()
        .arg("play")
        .arg(&script)
        .arg("--speed")
        .arg("500")
        .assert()
        .success()
        .stdout(predicate::str::contains("Catch Up"))
        .stdout(predicate::str::contains("hey!"))
        .stdout(predicate::str::contains("hey yourself"))
        .stdout(predicate::str::contains("dinner?"))
        .stdout(predicate::str::contains("(done"));
}

#[test]
fn play_rejects_non_positive_speed() {
    let dir = tempdir().unwrap();
    let script = write_script(&dir);

    Command::cargo_bin("chatcast")
        .unwrap()
        .arg("play")
        .arg(&script)
        .arg("--speed")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("speed must be a positive number"));
}

#[test]
fn config_show_prints_authoritative_constants() {
    Command::cargo_bin("chatcast")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base_delay = 0.8"))
        .stdout(predicate::str::contains("typing_ratio = 0.8"))
        .stdout(predicate::str::contains("max_delay = 7.0"));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("timing.toml");
    std::fs::write(&config_path, "base_delay = 2.5\n").unwrap();

    Command::cargo_bin("chatcast")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base_delay = 2.5"))
        .stdout(predicate::str::contains("min_delay = 1.2"));
}
