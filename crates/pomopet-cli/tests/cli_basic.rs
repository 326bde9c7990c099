//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary home
//! directory.

mod common;

use common::*;
use serde_json::Value;

fn task_ids(home: &std::path::Path) -> Vec<i64> {
    let stdout = run_cli_success(home, &["task", "list", "--json"]);
    let tasks: Vec<Value> = parse_json(&stdout);
    tasks.iter().map(|t| t["id"].as_i64().unwrap()).collect()
}

#[test]
fn test_task_add_and_list() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["task", "add", "water", "plants"]);
    assert_contains(&stdout, "Task added:");

    let stdout = run_cli_success(home.path(), &["task", "list", "--json"]);
    let tasks: Vec<Value> = parse_json(&stdout);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "water plants");
    assert_eq!(tasks[0]["done"], false);
}

#[test]
fn test_task_list_empty() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["task", "list"]);
    assert_contains(&stdout, "No tasks.");
}

#[test]
fn test_blank_task_is_ignored() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["task", "add", "   "]);
    assert_eq!(code, 0);
    assert_contains(&stderr, "ignored");
    assert!(task_ids(home.path()).is_empty());
}

#[test]
fn test_task_toggle_and_delete() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["task", "add", "first"]);
    run_cli_success(home.path(), &["task", "add", "second"]);
    let ids = task_ids(home.path());
    assert_eq!(ids.len(), 2);

    let id = ids[0].to_string();
    let stdout = run_cli_success(home.path(), &["task", "toggle", &id]);
    assert_contains(&stdout, "done");
    let stdout = run_cli_success(home.path(), &["task", "list"]);
    assert_contains(&stdout, "[x]");

    run_cli_success(home.path(), &["task", "delete", &id]);
    let remaining = task_ids(home.path());
    assert_eq!(remaining, vec![ids[1]]);
}

#[test]
fn test_unknown_task_id_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, _) = run_cli_failure(home.path(), &["task", "toggle", "12345"]);
    assert_contains(&stderr, "task not found");
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["config", "get", "timer.focus_duration_secs"]);
    assert_eq!(stdout.trim(), "1500");

    run_cli_success(home.path(), &["config", "set", "pet.drain_interval_secs", "300"]);
    let stdout = run_cli_success(home.path(), &["config", "get", "pet.drain_interval_secs"]);
    assert_eq!(stdout.trim(), "300");

    run_cli_failure(home.path(), &["config", "set", "timer.nope", "1"]);
    run_cli_failure(home.path(), &["config", "set", "timer.focus_duration_secs", "0"]);
}

#[test]
fn test_config_reset() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["config", "set", "notifications.enabled", "false"]);
    run_cli_success(home.path(), &["config", "reset"]);
    let stdout = run_cli_success(home.path(), &["config", "get", "notifications.enabled"]);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_run_applies_stdin_commands() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["config", "set", "notifications.enabled", "false"]);

    let (stdout, _, code) = run_cli_with_input(
        home.path(),
        &["run"],
        "add feed the cat\ndown 100\nquit\n",
    );
    assert_eq!(code, 0);
    assert_contains(&stdout, "FOCUS TIME!");
    assert_contains(&stdout, "01:00");
    assert_contains(&stdout, "feed the cat");

    let stdout = run_cli_success(home.path(), &["task", "list", "--json"]);
    let tasks: Vec<Value> = parse_json(&stdout);
    assert_eq!(tasks.len(), 1);
}

#[test]
fn test_run_json_snapshots() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["config", "set", "notifications.enabled", "false"]);

    let (stdout, _, code) = run_cli_with_input(home.path(), &["run", "--json"], "quit\n");
    assert_eq!(code, 0);
    let first = stdout.lines().next().expect("at least one frame");
    let snapshot: Value = parse_json(first);
    assert_eq!(snapshot["session"]["mode"], "focus");
    assert_eq!(snapshot["session"]["remaining_secs"], 1500);
    assert_eq!(snapshot["pet"]["happiness"], 30);
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["completions", "bash"]);
    assert_contains(&stdout, "pomopet");
}
