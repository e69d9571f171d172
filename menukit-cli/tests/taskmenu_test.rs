//! End-to-end runs of the `taskmenu` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary, run from an empty directory with an empty home so no config
/// file is picked up
fn taskmenu(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taskmenu").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_tools_and_modes() {
    let dir = TempDir::new().unwrap();
    taskmenu(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Track and complete tasks"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("complete"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("--agent-skill-md"))
        .stdout(predicate::str::contains("Settings").not());
}

#[test]
fn test_no_subcommand_shows_help() {
    let dir = TempDir::new().unwrap();
    taskmenu(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: task"));
}

#[test]
fn test_subcommand_usage_and_flag_help() {
    let dir = TempDir::new().unwrap();
    taskmenu(&dir)
        .args(["add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add --title <value> [flags]"))
        .stdout(predicate::str::contains("What needs doing (required)"))
        .stdout(predicate::str::contains("low, normal or high"));
}

#[test]
fn test_add_task() {
    let dir = TempDir::new().unwrap();
    taskmenu(&dir)
        .args(["add", "--title", "Water the plants", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": 3"#))
        .stdout(predicate::str::contains(r#""title": "Water the plants""#))
        .stdout(predicate::str::contains(r#""priority": "high""#));
}

#[test]
fn test_missing_required_flag() {
    let dir = TempDir::new().unwrap();
    taskmenu(&dir)
        .arg("add")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing required field: title"));
}

#[test]
fn test_invalid_flag_value() {
    let dir = TempDir::new().unwrap();
    taskmenu(&dir)
        .args(["complete", "--id", "first"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid id: must be a positive number"));
}

#[test]
fn test_list_and_complete() {
    let dir = TempDir::new().unwrap();
    taskmenu(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Triage open issues"));

    taskmenu(&dir)
        .args(["complete", "--id", "1"])
        .assert()
        .success()
        .stdout("Completed task 1: Write the README\n");
}

#[test]
fn test_handler_failure_is_sanitized() {
    let dir = TempDir::new().unwrap();
    taskmenu(&dir)
        .args(["complete", "--id", "99"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("tool execution failed"))
        .stderr(predicate::str::contains("no task with id").not());
}

#[test]
fn test_agent_skill_md() {
    let dir = TempDir::new().unwrap();
    taskmenu(&dir)
        .arg("--agent-skill-md")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---\nname: task\n"))
        .stdout(predicate::str::contains("### `task_add`"))
        .stdout(predicate::str::contains("| `title` | yes | string | Title |"))
        .stdout(predicate::str::contains("1. List tasks to see what is open"))
        .stdout(predicate::str::contains("Ask before completing a task"))
        .stdout(predicate::str::contains("## Priorities"));
}

#[test]
fn test_tui_without_terminal() {
    let dir = TempDir::new().unwrap();
    taskmenu(&dir)
        .arg("tui")
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires a terminal"));
}

#[test]
fn test_unknown_subcommand() {
    let dir = TempDir::new().unwrap();
    taskmenu(&dir).arg("remove").assert().code(2);
}
