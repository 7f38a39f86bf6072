//! Integration tests for the `slotmask` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run the `schedule` and `bits`
//! subcommands through the actual binary: file and stdin input, flag
//! overrides, and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the two-calendar request fixture.
fn request_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/request.json")
}

/// Helper: path to the fixture with one unparseable event.
fn broken_event_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/broken_event.json")
}

/// Helper: run `schedule` with extra args and parse stdout as JSON.
fn schedule_json(args: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("slotmask")
        .unwrap()
        .args(["schedule", "-i", request_path()])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "schedule failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

fn slot_texts(day: &serde_json::Value) -> Vec<String> {
    day["times"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// schedule
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn schedule_file_to_stdout() {
    let json = schedule_json(&[]);
    let days = json.as_array().unwrap();

    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["date"]["value"], "2026/03/20");
    assert_eq!(days[0]["date"]["weekday"], "Friday");

    // Both rooms are busy only at 09:00.
    let friday = slot_texts(&days[0]);
    assert_eq!(friday.len(), 23);
    assert!(!friday.contains(&"09:00".to_string()));
    assert!(friday.contains(&"09:30".to_string()));

    // Room A is free while Room B is closed all day.
    assert_eq!(slot_texts(&days[1]).len(), 24);

    // Holiday.
    assert!(slot_texts(&days[2]).is_empty());
}

#[test]
fn schedule_reads_stdin() {
    let request = std::fs::read_to_string(request_path()).unwrap();

    Command::cargo_bin("slotmask")
        .unwrap()
        .arg("schedule")
        .write_stdin(request)
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-03-20T08:00:00+09:00"));
}

#[test]
fn schedule_writes_output_file() {
    let output_path = std::env::temp_dir().join("slotmask-test-schedule.json");
    let _ = std::fs::remove_file(&output_path);

    Command::cargo_bin("slotmask")
        .unwrap()
        .args(["schedule", "-i", request_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn schedule_slot_length_override() {
    let json = schedule_json(&["--slot-minutes", "60"]);

    let friday = slot_texts(&json[0]);
    assert_eq!(friday.len(), 11);
    assert_eq!(friday[0], "08:00");
    assert_eq!(friday[1], "10:00");
}

#[test]
fn schedule_business_hours_override() {
    let json = schedule_json(&["--open", "9", "--close", "11"]);

    assert_eq!(slot_texts(&json[0]), ["09:30", "10:00", "10:30"]);
}

#[test]
fn schedule_closed_days_override() {
    let json = schedule_json(&["--closed-days", "fri,sat"]);

    assert!(slot_texts(&json[0]).is_empty());
    assert!(slot_texts(&json[1]).is_empty());
}

#[test]
fn schedule_start_and_days_override_window() {
    let json = schedule_json(&["--start", "2026-03-21", "--days", "0"]);
    let days = json.as_array().unwrap();

    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"]["value"], "2026/03/21");
}

#[test]
fn schedule_skips_unparseable_event() {
    let output = Command::cargo_bin("slotmask")
        .unwrap()
        .args(["schedule", "-i", broken_event_path()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(slot_texts(&json[0]).len(), 22);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipping event"), "stderr: {}", stderr);
}

// ─────────────────────────────────────────────────────────────────────────────
// bits
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn bits_prints_calendar_and_merged_rows() {
    // Slot 18 (09:00) is the only one both rooms share on Friday.
    let merged_friday = format!("{}1{}", "0".repeat(29), "0".repeat(18));

    Command::cargo_bin("slotmask")
        .unwrap()
        .args(["bits", "-i", request_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026/03/20"))
        .stdout(predicate::str::contains("Room").not())
        .stdout(predicate::str::contains(format!("  {} (merged)", merged_friday)))
        .stdout(predicate::str::contains(format!("  {} b", "1".repeat(48))));
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_slot_length_fails() {
    Command::cargo_bin("slotmask")
        .unwrap()
        .args(["schedule", "-i", request_path(), "--slot-minutes", "45"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn unknown_weekday_fails() {
    Command::cargo_bin("slotmask")
        .unwrap()
        .args(["schedule", "-i", request_path(), "--closed-days", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown weekday"));
}

#[test]
fn malformed_request_fails() {
    Command::cargo_bin("slotmask")
        .unwrap()
        .arg("schedule")
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse request JSON"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("slotmask")
        .unwrap()
        .args(["schedule", "-i", "/nonexistent/request.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
