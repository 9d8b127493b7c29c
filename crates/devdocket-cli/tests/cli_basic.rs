//! Basic CLI E2E tests.
//!
//! Every test runs the `devdocket` binary against its own data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn devdocket(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("devdocket").unwrap();
    cmd.env("DEVDOCKET_HOME", home.path())
        .env_remove("DEVDOCKET_LOG");
    cmd
}

fn json(home: &TempDir, args: &[&str]) -> Value {
    let output = devdocket(home).arg("--json").args(args).output().unwrap();
    assert!(output.status.success(), "{args:?} failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn problem_add_then_list_newest_first() {
    let home = TempDir::new().unwrap();
    devdocket(&home)
        .args(["problem", "add", "Two Sum", "--time", "15", "--difficulty", "easy"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Added problem"));
    let added = json(&home, &["problem", "add", "LRU Cache", "--time", "40", "--difficulty", "Hard"]);

    let list = json(&home, &["problem", "list"]);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], added);
    assert_eq!(list[0]["difficulty"], "Hard");
    assert_eq!(list[1]["name"], "Two Sum");
}

#[test]
fn problem_without_time_is_rejected() {
    let home = TempDir::new().unwrap();
    devdocket(&home)
        .args(["problem", "add", "Valid Parentheses"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("warning: time is required"));

    assert_eq!(json(&home, &["problem", "list"]), Value::Array(vec![]));
}

#[test]
fn problem_filters_and_stats() {
    let home = TempDir::new().unwrap();
    for (name, minutes, difficulty) in [
        ("a", "10", "Easy"),
        ("b", "20", "Medium"),
        ("c", "31", "Medium"),
    ] {
        devdocket(&home)
            .args(["problem", "add", name, "--time", minutes, "--difficulty", difficulty])
            .assert()
            .success();
    }

    let medium = json(&home, &["problem", "list", "--difficulty", "medium"]);
    let names: Vec<&str> = medium
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["c", "b"]);

    let stats = json(&home, &["problem", "stats"]);
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["total_minutes"], 61);
    assert_eq!(stats["average_minutes"], 20);
}

#[test]
fn problem_update_keeps_omitted_fields() {
    let home = TempDir::new().unwrap();
    let added = json(&home, &["problem", "add", "Two Sum", "--time", "15", "--link", "https://leetcode.com/problems/two-sum"]);
    let id = added["id"].to_string();

    let updated = json(&home, &["problem", "update", &id, "--time", "12"]);
    assert_eq!(updated["id"], added["id"]);
    assert_eq!(updated["createdAt"], added["createdAt"]);
    assert_eq!(updated["time"], 12);
    assert_eq!(updated["link"], "https://leetcode.com/problems/two-sum");

    let done = json(&home, &["problem", "done", &id]);
    assert_eq!(done["completed"], true);
}

#[test]
fn unknown_id_is_a_warning_and_delete_is_idempotent() {
    let home = TempDir::new().unwrap();
    devdocket(&home)
        .args(["plan", "toggle", "42"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("warning: No record with id 42"));

    let added = json(&home, &["plan", "add", "Rust", "--priority", "High"]);
    let id = added["id"].to_string();
    devdocket(&home).args(["plan", "delete", &id]).assert().success();
    devdocket(&home)
        .args(["plan", "delete", &id])
        .assert()
        .success()
        .stderr(predicate::str::contains("no plan with id"));
}

#[test]
fn journal_respects_configured_char_limit() {
    let home = TempDir::new().unwrap();
    devdocket(&home)
        .args(["config", "set", "journal.char_limit", "10"])
        .assert()
        .success();
    devdocket(&home)
        .args(["journal", "add", "this entry is far too long"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("text exceeds 10 characters"));
    devdocket(&home).args(["journal", "add", "short"]).assert().success();

    let stats = json(&home, &["journal", "stats"]);
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["latest"], "short");
}

#[test]
fn bug_toggle_and_filtered_search() {
    let home = TempDir::new().unwrap();
    let bug = json(
        &home,
        &["bug", "add", "TypeError: undefined is not a function", "--stack", "node.js", "--solution", "bind this"],
    );
    json(&home, &["bug", "add", "CORS preflight failed", "--error-type", "Network"]);
    assert_eq!(bug["status"], "Pending");
    assert_eq!(bug["techStack"], "Node.js");

    let toggled = json(&home, &["bug", "toggle", &bug["id"].to_string()]);
    assert_eq!(toggled["status"], "Resolved");

    let hits = json(&home, &["bug", "list", "--status", "resolved", "--search", "UNDEFINED"]);
    assert_eq!(hits.as_array().unwrap().len(), 1);
    let none = json(&home, &["bug", "list", "--stack", "Python"]);
    assert_eq!(none, Value::Array(vec![]));
}

#[test]
fn session_only_bug_vault_opens_with_examples_and_forgets_additions() {
    let home = TempDir::new().unwrap();
    devdocket(&home)
        .args(["config", "set", "storage.bug_vault", "session-only"])
        .assert()
        .success();
    devdocket(&home)
        .args(["bug", "add", "flaky"])
        .assert()
        .success()
        .stderr(predicate::str::contains("session-only"));

    let bugs = json(&home, &["bug", "list"]);
    let titles: Vec<&str> = bugs
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        [
            "TypeError: undefined is not a function",
            "Cannot read property \"map\" of undefined"
        ]
    );

    let stats = json(&home, &["bug", "stats"]);
    assert_eq!(stats["pending"], 1);
    assert_eq!(stats["resolved"], 1);
}

#[test]
fn timer_configure_clamps_input() {
    let home = TempDir::new().unwrap();
    let event = json(&home, &["timer", "configure", "--minutes", "-5", "--seconds", "75"]);
    assert_eq!(event["type"], "TimerConfigured");
    assert_eq!(event["total_secs"], 59);
}

#[test]
fn timer_pauses_after_tick_budget_and_resumes_to_completion() {
    let home = TempDir::new().unwrap();
    json(&home, &["timer", "configure", "--minutes", "0", "--seconds", "5"]);

    let paused = json(&home, &["timer", "start", "--ticks", "2", "--tick-ms", "1"]);
    assert_eq!(paused["state"], "paused");
    assert_eq!(paused["remaining_secs"], 3);

    devdocket(&home)
        .args(["timer", "start", "--tick-ms", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Break time is over"));

    let status = json(&home, &["timer", "status"]);
    assert_eq!(status["state"], "expired");
    assert_eq!(status["completed_sessions"], 1);

    devdocket(&home)
        .args(["timer", "start"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("the break is over"));

    let reset = json(&home, &["timer", "reset"]);
    assert_eq!(reset["state"], "idle");
    assert_eq!(reset["remaining_secs"], 5);
}

#[test]
fn timer_start_with_zero_duration_is_rejected() {
    let home = TempDir::new().unwrap();
    json(&home, &["timer", "configure", "--minutes", "0", "--seconds", "0"]);
    devdocket(&home)
        .args(["timer", "start", "--tick-ms", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("set to 00:00"));

    let status = json(&home, &["timer", "status"]);
    assert_eq!(status["state"], "idle");
    assert_eq!(status["completed_sessions"], 0);
}

#[test]
fn timer_skip_of_paused_session_counts_as_a_completed_break() {
    let home = TempDir::new().unwrap();
    let paused = json(&home, &["timer", "start", "--ticks", "1", "--tick-ms", "1"]);
    assert_eq!(paused["state"], "paused");

    let skipped = json(&home, &["timer", "skip"]);
    assert_eq!(skipped["state"], "expired");
    assert_eq!(skipped["remaining_secs"], 0);
    assert_eq!(skipped["completed_sessions"], 1);

    let dashboard = json(&home, &["dashboard"]);
    assert_eq!(dashboard["breaks_taken"], 1);
}

#[test]
fn timer_skip_of_idle_timer_completes_nothing() {
    let home = TempDir::new().unwrap();
    for _ in 0..2 {
        devdocket(&home)
            .args(["timer", "skip"])
            .assert()
            .success()
            .stderr(predicate::str::contains("no session to skip"));
        devdocket(&home).args(["timer", "reset"]).assert().success();
    }

    let status = json(&home, &["timer", "status"]);
    assert_eq!(status["state"], "idle");
    assert_eq!(status["completed_sessions"], 0);
}

#[test]
fn config_and_theme() {
    let home = TempDir::new().unwrap();
    devdocket(&home)
        .args(["config", "get", "timer.default_minutes"])
        .assert()
        .success()
        .stdout("25\n");
    devdocket(&home)
        .args(["config", "get", "timer.nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown config key"));

    devdocket(&home)
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout("dark\n");
    devdocket(&home)
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout("light\n");
    devdocket(&home)
        .args(["config", "get", "ui.dark_mode"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn dashboard_summarizes_every_widget() {
    let home = TempDir::new().unwrap();
    json(&home, &["problem", "add", "Two Sum", "--time", "15"]);
    json(&home, &["journal", "add", "Learned about React Hooks today!"]);
    json(&home, &["bug", "add", "Unexpected token"]);
    json(&home, &["plan", "add", "Svelte", "--priority", "Low"]);
    json(&home, &["plan", "add", "Rust", "--priority", "High"]);

    let summary = json(&home, &["dashboard"]);
    assert_eq!(summary["coding"]["total"], 1);
    assert_eq!(summary["journal"]["latest"], "Learned about React Hooks today!");
    assert_eq!(summary["bugs"]["pending"], 1);
    assert_eq!(summary["plans"]["total"], 2);
    assert_eq!(summary["focus"], "Rust");

    devdocket(&home)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("focus: Rust"));
}
