//! End-to-end CLI tests.
//!
//! Each test gets its own HOME so databases and config never collide.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn focusflow(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("focusflow").unwrap();
    cmd.env("HOME", home.path());
    cmd
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn parse_only_extracts_structured_fields() {
    let home = TempDir::new().unwrap();

    let out = stdout_of(
        focusflow(&home)
            .args([
                "add",
                "купить молоко завтра 15:00 #дом важно",
                "--parse-only",
                "-o",
                "json",
            ])
            .assert()
            .success(),
    );

    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["title"], "купить молоко");
    assert_eq!(parsed["priority"], "high");
    assert_eq!(parsed["tags"][0], "дом");
    assert!(parsed["deadline"].is_i64());
}

#[test]
fn add_then_list_shows_task() {
    let home = TempDir::new().unwrap();

    focusflow(&home)
        .args(["add", "Review the quarterly report #work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created:"));

    focusflow(&home)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Review the quarterly report"))
        .stdout(predicate::str::contains("#work"));
}

#[test]
fn task_lifecycle_by_id() {
    let home = TempDir::new().unwrap();

    let out = stdout_of(
        focusflow(&home)
            .args(["add", "disposable task", "-o", "json"])
            .assert()
            .success(),
    );
    let created: serde_json::Value = serde_json::from_str(&out).unwrap();
    let id = created["task"]["id"].as_str().unwrap().to_string();

    focusflow(&home)
        .args(["task", "done", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed task"));

    let out = stdout_of(
        focusflow(&home)
            .args(["task", "show", id.as_str(), "-o", "json"])
            .assert()
            .success(),
    );
    let shown: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(shown["status"], "done");
    assert!(shown["completed_at"].is_i64());
}

#[test]
fn focus_next_prefers_high_priority() {
    let home = TempDir::new().unwrap();

    focusflow(&home)
        .args(["add", "background chore"])
        .assert()
        .success();
    focusflow(&home)
        .args(["add", "починить прод срочно"])
        .assert()
        .success();

    let out = stdout_of(
        focusflow(&home)
            .args(["focus", "next", "-o", "json"])
            .assert()
            .success(),
    );
    let head: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(head["title"], "починить прод");
    assert_eq!(head["priority"], "high");
}

#[test]
fn focus_session_round_trip() {
    let home = TempDir::new().unwrap();

    let out = stdout_of(
        focusflow(&home)
            .args(["add", "deep work", "-o", "json"])
            .assert()
            .success(),
    );
    let created: serde_json::Value = serde_json::from_str(&out).unwrap();
    let task_id = created["task"]["id"].as_str().unwrap().to_string();

    let out = stdout_of(
        focusflow(&home)
            .args(["focus", "start", task_id.as_str(), "-o", "json"])
            .assert()
            .success(),
    );
    let session: serde_json::Value = serde_json::from_str(&out).unwrap();
    let session_id = session["session_id"].as_str().unwrap().to_string();

    focusflow(&home)
        .args(["focus", "finish", session_id.as_str(), "--minutes", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25 min"));

    focusflow(&home)
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25 min"));
}

#[test]
fn unknown_task_id_fails_cleanly() {
    let home = TempDir::new().unwrap();

    focusflow(&home)
        .args(["task", "done", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn settings_set_and_show() {
    let home = TempDir::new().unwrap();

    focusflow(&home)
        .args(["settings", "set", "pomodoro_length", "50"])
        .assert()
        .success();

    focusflow(&home)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomodoro_length: 50 min"));
}

#[test]
fn finance_summary_balances() {
    let home = TempDir::new().unwrap();

    focusflow(&home)
        .args(["finance", "income", "1000", "зарплата"])
        .assert()
        .success();
    focusflow(&home)
        .args(["finance", "spend", "250", "продукты"])
        .assert()
        .success();

    focusflow(&home)
        .args(["finance", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("750.00"));
}

#[test]
fn backup_round_trip_between_homes() {
    let source_home = TempDir::new().unwrap();
    let target_home = TempDir::new().unwrap();
    let bundle = source_home.path().join("bundle.json");

    focusflow(&source_home)
        .args(["add", "task worth keeping #export"])
        .assert()
        .success();

    focusflow(&source_home)
        .args(["backup", "export"])
        .arg(&bundle)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 tasks"));

    focusflow(&target_home)
        .args(["backup", "import"])
        .arg(&bundle)
        .assert()
        .success();

    focusflow(&target_home)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("task worth keeping"));
}

#[test]
fn reminder_due_lists_overdue() {
    let home = TempDir::new().unwrap();

    let out = stdout_of(
        focusflow(&home)
            .args(["add", "call the bank", "-o", "json"])
            .assert()
            .success(),
    );
    let created: serde_json::Value = serde_json::from_str(&out).unwrap();
    let id = created["task"]["id"].as_str().unwrap().to_string();

    // "сейчас" resolves to the current instant, so it is due immediately.
    focusflow(&home)
        .args(["reminder", "set", id.as_str(), "сейчас"])
        .assert()
        .success();

    focusflow(&home)
        .args(["reminder", "due"])
        .assert()
        .success()
        .stdout(predicate::str::contains("call the bank"));

    focusflow(&home)
        .args(["reminder", "ack", id.as_str()])
        .assert()
        .success();

    focusflow(&home)
        .args(["reminder", "due"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No items"));
}

#[test]
fn completions_generate() {
    let home = TempDir::new().unwrap();

    focusflow(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("focusflow"));
}
