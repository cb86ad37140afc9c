//! E2E tests for the `mx` binary: `mx summary`, `mx log`, `mx report`.
//!
//! Covers: summary JSON schema and values, log JSON ordering and filters,
//! report artifact contents, config overrides, and fatal-error exits for
//! malformed exports.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

const HEADER: &str = "Date,Workout Name,Exercise Name,Set Order,Weight,Reps";

fn mx_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mx"));
    cmd.current_dir(dir);
    cmd.env("MAXLOG_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn seed_export(root: &Path, user: &str, rows: &[&str]) {
    let dir = root.join(user);
    fs::create_dir_all(&dir).expect("create user dir");
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    fs::write(dir.join("strong.csv"), content).expect("write export");
}

fn seed_progression_tree(root: &Path) {
    seed_export(
        root,
        "alice",
        &[
            "2023-01-01 09:00:00,Legs,Squat (Barbell),1,100,5",
            "2023-01-08 09:00:00,Legs,Squat (Barbell),1,110,5",
            "2023-01-15 09:00:00,Legs,Squat (Barbell),1,105,5",
        ],
    );
    seed_export(
        root,
        "bob",
        &["2023-01-02 18:00:00,Arms,Bicep Curl,1,30,8"],
    );
}

fn json_stdout(output: &std::process::Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout must be valid JSON")
}

// ---------------------------------------------------------------------------
// mx summary
// ---------------------------------------------------------------------------

#[test]
fn summary_json_has_one_row_per_user_in_order() {
    let dir = TempDir::new().expect("temp dir");
    seed_progression_tree(dir.path());

    let output = mx_cmd(dir.path())
        .args(["summary", "--json"])
        .output()
        .expect("summary should not crash");
    let rows = json_stdout(&output);

    let rows = rows.as_array().expect("rows must be an array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["user"], "alice");
    assert_eq!(rows[1]["user"], "bob");

    // alice: squat 5RM = 110, everything else zero.
    let alice_lifts = rows[0]["lifts"].as_array().expect("lifts array");
    assert_eq!(alice_lifts[1]["exercise"], "Squat");
    assert_eq!(alice_lifts[1]["five_rep_max"], 110);
    assert_eq!(alice_lifts[1]["one_rep_max"], 0);
    assert_eq!(rows[0]["total"], 0);

    // bob: untracked lifts only, all zeros.
    for lift in rows[1]["lifts"].as_array().expect("lifts array") {
        assert_eq!(lift["five_rep_max"], 0);
        assert_eq!(lift["one_rep_max"], 0);
    }
    assert_eq!(rows[1]["total"], 0);
}

#[test]
fn summary_total_sums_one_rep_maxima() {
    let dir = TempDir::new().expect("temp dir");
    seed_export(
        dir.path(),
        "alice",
        &[
            "2023-01-01 09:00:00,SBD,Bench Press (Barbell),1,100,1",
            "2023-01-01 09:20:00,SBD,Squat (Barbell),1,140,1",
            "2023-01-01 09:40:00,SBD,Deadlift (Barbell),1,180,1",
        ],
    );

    let output = mx_cmd(dir.path())
        .args(["summary", "--json"])
        .output()
        .expect("summary should not crash");
    let rows = json_stdout(&output);

    assert_eq!(rows[0]["total"], 420);
}

#[test]
fn summary_text_mode_prints_tsv_with_headers() {
    let dir = TempDir::new().expect("temp dir");
    seed_progression_tree(dir.path());

    // stdout is piped, so the default mode is text.
    mx_cmd(dir.path())
        .args(["summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user\tBench 5RM"))
        .stdout(predicate::str::contains("Powerlift Total"))
        .stdout(predicate::str::contains("alice\t0\t0\t110"));
}

// ---------------------------------------------------------------------------
// mx log
// ---------------------------------------------------------------------------

#[test]
fn log_json_emits_only_strict_improvements_in_order() {
    let dir = TempDir::new().expect("temp dir");
    seed_progression_tree(dir.path());

    let output = mx_cmd(dir.path())
        .args(["log", "--json"])
        .output()
        .expect("log should not crash");
    let events = json_stdout(&output);

    let events = events.as_array().expect("events must be an array");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["weight"], 100);
    assert_eq!(events[1]["weight"], 110);
    assert_eq!(events[0]["exercise"], "Squat");
    assert_eq!(events[0]["reps"], 5);
    assert_eq!(events[0]["user"], "alice");
}

#[test]
fn log_filters_by_user_and_exercise() {
    let dir = TempDir::new().expect("temp dir");
    seed_export(
        dir.path(),
        "alice",
        &[
            "2023-01-01 09:00:00,SBD,Squat,1,100,5",
            "2023-01-01 09:30:00,SBD,Deadlift,1,140,5",
        ],
    );
    seed_export(
        dir.path(),
        "bob",
        &["2023-01-01 10:00:00,SBD,Squat,1,80,5"],
    );

    let output = mx_cmd(dir.path())
        .args(["log", "--json", "--user", "alice", "--exercise", "Squat"])
        .output()
        .expect("log should not crash");
    let events = json_stdout(&output);

    let events = events.as_array().expect("events must be an array");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["user"], "alice");
    assert_eq!(events[0]["exercise"], "Squat");
}

// ---------------------------------------------------------------------------
// mx report
// ---------------------------------------------------------------------------

#[test]
fn report_writes_html_with_chart_and_table() {
    let dir = TempDir::new().expect("temp dir");
    seed_progression_tree(dir.path());

    mx_cmd(dir.path())
        .args(["report", "--json"])
        .assert()
        .success();

    let html = fs::read_to_string(dir.path().join("prs.html")).expect("prs.html must exist");
    assert!(html.contains("<title>Powerlifting PRs</title>"));
    assert!(html.contains("<svg"));
    assert!(html.contains("Latest PRs"));
    assert!(html.contains("<th>Squat 5RM</th>"));
    assert!(html.contains("<td>110</td>"));
}

#[test]
fn report_optionally_writes_standalone_chart() {
    let dir = TempDir::new().expect("temp dir");
    seed_progression_tree(dir.path());

    let output = mx_cmd(dir.path())
        .args(["report", "--json", "--chart", "prs.svg"])
        .output()
        .expect("report should not crash");
    let payload = json_stdout(&output);

    assert_eq!(payload["users"], 2);
    assert_eq!(payload["pr_events"], 2);
    assert_eq!(payload["entries_scanned"], 4);

    let svg = fs::read_to_string(dir.path().join("prs.svg")).expect("prs.svg must exist");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Bench Press"));
}

#[test]
fn report_honors_project_config() {
    let dir = TempDir::new().expect("temp dir");
    seed_progression_tree(dir.path());
    fs::write(dir.path().join("maxlog.toml"), "weight_unit = \"lb\"\n")
        .expect("write config");

    mx_cmd(dir.path()).args(["report", "--json"]).assert().success();

    let html = fs::read_to_string(dir.path().join("prs.html")).expect("prs.html must exist");
    assert!(html.contains("Weight (lb)"));
}

#[test]
fn quiet_report_prints_nothing_on_success() {
    let dir = TempDir::new().expect("temp dir");
    seed_progression_tree(dir.path());

    mx_cmd(dir.path())
        .args(["report", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ---------------------------------------------------------------------------
// Fatal errors
// ---------------------------------------------------------------------------

#[test]
fn invalid_rep_count_fails_and_names_the_record() {
    let dir = TempDir::new().expect("temp dir");
    seed_export(
        dir.path(),
        "alice",
        &[
            "2023-01-01 09:00:00,Legs,Squat,1,100,5",
            "2023-01-08 09:00:00,Legs,Squat,1,120,0",
        ],
    );

    mx_cmd(dir.path())
        .args(["summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid rep count 0"))
        .stderr(predicate::str::contains("alice"));
}

#[test]
fn invalid_rep_count_json_error_carries_code() {
    let dir = TempDir::new().expect("temp dir");
    seed_export(dir.path(), "alice", &["2023-01-01 09:00:00,Legs,Squat,1,100,0"]);

    mx_cmd(dir.path())
        .args(["log", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error_code\": \"E2003\""));
}

#[test]
fn malformed_row_fails_with_line_number() {
    let dir = TempDir::new().expect("temp dir");
    seed_export(
        dir.path(),
        "alice",
        &["2023-01-01 09:00:00,Legs,Squat,1,heavy,5"],
    );

    mx_cmd(dir.path())
        .args(["summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("Weight"));
}

#[test]
fn missing_root_fails_with_suggestion() {
    let dir = TempDir::new().expect("temp dir");

    mx_cmd(dir.path())
        .args(["summary", "--root", "no-such-dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn empty_root_reports_no_exports() {
    let dir = TempDir::new().expect("temp dir");
    fs::create_dir_all(dir.path().join("not-an-export")).expect("create dir");

    mx_cmd(dir.path())
        .args(["summary", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error_code\": \"E1002\""));
}
