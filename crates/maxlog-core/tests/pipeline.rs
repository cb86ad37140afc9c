//! Library-level pipeline tests: export tree on disk → scan → summary.

use std::fs;
use std::path::Path;

use maxlog_core::config::ReportConfig;
use maxlog_core::model::{Exercise, RepBracket};
use maxlog_core::scan;
use maxlog_core::summary;
use tempfile::TempDir;

const HEADER: &str = "Date,Workout Name,Exercise Name,Set Order,Weight,Reps";

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

#[test]
fn squat_progression_emits_two_events_and_one_summary_max() {
    let tmp = TempDir::new().expect("temp dir");
    seed_export(
        tmp.path(),
        "alice",
        &[
            "2023-01-01 09:00:00,Legs,Squat (Barbell),1,100,5",
            "2023-01-08 09:00:00,Legs,Squat (Barbell),1,110,5",
            "2023-01-15 09:00:00,Legs,Squat (Barbell),1,105,5",
        ],
    );

    let outcome = scan::run_scan(tmp.path(), &ReportConfig::default()).expect("scan");

    let squat_events: Vec<(u32, RepBracket)> = outcome
        .events
        .iter()
        .map(|e| (e.weight, e.bracket))
        .collect();
    assert_eq!(
        squat_events,
        [(100, RepBracket::Five), (110, RepBracket::Five)]
    );

    let rows = summary::summarize(&outcome.maxima, &outcome.users, &outcome.main_lifts);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user, "alice");
    assert_eq!(rows[0].lifts[1].exercise, Exercise::Squat);
    assert_eq!(rows[0].lifts[1].five_rep_max, 110);
    assert_eq!(rows[0].lifts[1].one_rep_max, 0);
}

#[test]
fn user_without_tracked_lifts_gets_an_all_zero_row() {
    let tmp = TempDir::new().expect("temp dir");
    seed_export(
        tmp.path(),
        "alice",
        &["2023-01-01 09:00:00,Legs,Squat,1,100,5"],
    );
    seed_export(
        tmp.path(),
        "bob",
        &[
            "2023-01-02 18:00:00,Arms,Bicep Curl,1,30,8",
            "2023-01-09 18:00:00,Arms,Bicep Curl,1,35,8",
        ],
    );

    let outcome = scan::run_scan(tmp.path(), &ReportConfig::default()).expect("scan");
    assert!(outcome.events.iter().all(|e| e.user == "alice"));

    let rows = summary::summarize(&outcome.maxima, &outcome.users, &outcome.main_lifts);
    let bob = rows.iter().find(|r| r.user == "bob").expect("bob row");
    assert!(bob
        .lifts
        .iter()
        .all(|l| l.five_rep_max == 0 && l.one_rep_max == 0));
    assert_eq!(bob.total, 0);
}

#[test]
fn qualified_and_bare_names_advance_the_same_maximum() {
    let tmp = TempDir::new().expect("temp dir");
    seed_export(
        tmp.path(),
        "alice",
        &[
            "2023-01-01 09:00:00,Legs,Squat (Barbell),1,100,5",
            "2023-01-08 09:00:00,Legs,Squat,1,99,5",
            "2023-01-15 09:00:00,Legs,Squat,1,101,5",
        ],
    );

    let outcome = scan::run_scan(tmp.path(), &ReportConfig::default()).expect("scan");
    // 99 is below the qualified 100; only 100 and 101 are PRs.
    let weights: Vec<u32> = outcome.events.iter().map(|e| e.weight).collect();
    assert_eq!(weights, [100, 101]);
}

#[test]
fn totals_combine_one_rep_maxima_across_lifts() {
    let tmp = TempDir::new().expect("temp dir");
    seed_export(
        tmp.path(),
        "alice",
        &[
            "2023-01-01 09:00:00,SBD,Bench Press (Barbell),1,100,1",
            "2023-01-01 09:20:00,SBD,Squat (Barbell),1,140.4,1",
            "2023-01-01 09:40:00,SBD,Deadlift (Barbell),1,179.5,1",
        ],
    );

    let outcome = scan::run_scan(tmp.path(), &ReportConfig::default()).expect("scan");
    let rows = summary::summarize(&outcome.maxima, &outcome.users, &outcome.main_lifts);

    // 140.4 rounds down, 179.5 rounds half away from zero.
    assert_eq!(rows[0].lifts[1].one_rep_max, 140);
    assert_eq!(rows[0].lifts[2].one_rep_max, 180);
    assert_eq!(rows[0].total, 100 + 140 + 180);
}

#[test]
fn users_appear_in_sorted_first_seen_order() {
    let tmp = TempDir::new().expect("temp dir");
    for user in ["zoe", "bob", "alice"] {
        seed_export(
            tmp.path(),
            user,
            &["2023-01-01 09:00:00,Legs,Squat,1,60,5"],
        );
    }

    let outcome = scan::run_scan(tmp.path(), &ReportConfig::default()).expect("scan");
    assert_eq!(outcome.users, ["alice", "bob", "zoe"]);

    let rows = summary::summarize(&outcome.maxima, &outcome.users, &outcome.main_lifts);
    let row_users: Vec<&str> = rows.iter().map(|r| r.user.as_str()).collect();
    assert_eq!(row_users, ["alice", "bob", "zoe"]);
}

#[test]
fn custom_main_lifts_change_tracking_and_columns() {
    let tmp = TempDir::new().expect("temp dir");
    seed_export(
        tmp.path(),
        "alice",
        &[
            "2023-01-01 09:00:00,Push,Overhead Press,1,60,5",
            "2023-01-01 09:30:00,Push,Bench Press,1,100,5",
        ],
    );

    let config = ReportConfig {
        main_lifts: vec![
            "Bench Press".to_owned(),
            "Squat".to_owned(),
            "Overhead Press".to_owned(),
        ],
        ..ReportConfig::default()
    };

    let outcome = scan::run_scan(tmp.path(), &config).expect("scan");
    assert_eq!(outcome.events.len(), 2);

    let headers = summary::table_headers(&outcome.main_lifts);
    assert_eq!(headers[5], "Overhead Press 5RM");
}
