use assert_cmd::Command;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn taskdeck() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("taskdeck").unwrap()
}

fn init_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    taskdeck().arg("init").current_dir(dir.path()).assert().success();
    dir
}

/// Add a task and return its full id.
fn add(dir: &Path, text: &str) -> String {
    let output = taskdeck()
        .args(["--json", "add", text])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);
    let task: Value = serde_json::from_slice(&output.stdout).unwrap();
    task["id"].as_str().unwrap().to_string()
}

fn list_json(dir: &Path, args: &[&str]) -> Vec<Value> {
    let output = taskdeck()
        .args(["--json", "list"])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn texts(tasks: &[Value]) -> Vec<&str> {
    tasks.iter().map(|t| t["text"].as_str().unwrap()).collect()
}

#[test]
fn init_creates_workspace_dir() {
    let dir = TempDir::new().unwrap();
    taskdeck()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains(".taskdeck"));

    assert!(dir.path().join(".taskdeck").is_dir());
    assert!(dir.path().join(".taskdeck/config.json").exists());
}

#[test]
fn init_twice_fails() {
    let dir = init_workspace();
    taskdeck()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("already exists"));
}

#[test]
fn commands_outside_workspace_fail() {
    let dir = TempDir::new().unwrap();
    taskdeck()
        .arg("list")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("not a taskdeck workspace"));
}

#[test]
fn list_empty_workspace() {
    let dir = init_workspace();
    taskdeck()
        .arg("list")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("No tasks yet"));
}

#[test]
fn add_shows_task_with_defaults() {
    let dir = init_workspace();
    taskdeck()
        .args(["add", "  Buy milk  "])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Buy milk  (medium)"));

    let tasks = list_json(dir.path(), &[]);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "Buy milk");
    assert_eq!(tasks[0]["completed"], false);
    assert_eq!(tasks[0]["priority"], "medium");
    assert!(tasks[0]["dueDate"].is_null());
}

#[test]
fn add_rejects_blank_and_long_text() {
    let dir = init_workspace();
    taskdeck()
        .args(["add", "   "])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("task cannot be empty"));

    let long = "x".repeat(151);
    taskdeck()
        .args(["add", long.as_str()])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("keep it under 150"));

    assert!(list_json(dir.path(), &[]).is_empty());
}

#[test]
fn add_with_priority_and_due_date() {
    let dir = init_workspace();
    taskdeck()
        .args(["add", "File taxes", "--priority", "high", "--due", "2001-04-15"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("(high, due 15 Apr, overdue)"));

    taskdeck()
        .args(["add", "Nap", "--priority", "urgent"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("unknown priority"));

    taskdeck()
        .args(["add", "Nap", "--due", "tomorrow"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("invalid due date"));
}

#[test]
fn filter_and_search_compose() {
    let dir = init_workspace();
    add(dir.path(), "Pay bills");
    let rent = add(dir.path(), "Pay rent");
    add(dir.path(), "Walk dog");

    taskdeck()
        .args(["toggle", rent.as_str()])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Completed"));

    let active = list_json(dir.path(), &["--filter", "active", "--search", "pay"]);
    assert_eq!(texts(&active), vec!["Pay bills"]);

    let done = list_json(dir.path(), &["--filter", "completed", "--search", "PAY"]);
    assert_eq!(texts(&done), vec!["Pay rent"]);

    let all = list_json(dir.path(), &[]);
    assert_eq!(texts(&all), vec!["Pay bills", "Pay rent", "Walk dog"]);

    taskdeck()
        .args(["list", "--filter", "done"])
        .current_dir(dir.path())
        .assert()
        .failure();
}

#[test]
fn ids_resolve_by_prefix() {
    let dir = init_workspace();
    let id = add(dir.path(), "Water plants");

    taskdeck()
        .args(["toggle", &id[..8]])
        .current_dir(dir.path())
        .assert()
        .success();

    taskdeck()
        .args(["toggle", "zzzzzzzz"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("no task matches"));
}

#[test]
fn move_places_task_before_target() {
    let dir = init_workspace();
    let a = add(dir.path(), "A");
    add(dir.path(), "B");
    let c = add(dir.path(), "C");

    taskdeck()
        .args(["move", c.as_str(), "--before", a.as_str()])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Moved"));

    let tasks = list_json(dir.path(), &[]);
    assert_eq!(texts(&tasks), vec!["C", "A", "B"]);
    let orders: Vec<f64> = tasks.iter().map(|t| t["order"].as_f64().unwrap()).collect();
    assert_eq!(orders, vec![0.0, 1.0, 2.0]);

    taskdeck()
        .args(["move", a.as_str(), "--before", a.as_str()])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Nothing to move"));
}

#[test]
fn edit_replaces_text_and_ignores_blank() {
    let dir = init_workspace();
    let id = add(dir.path(), "Walk dog");

    taskdeck()
        .args(["edit", id.as_str(), "Walk the dog"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Updated"));

    taskdeck()
        .args(["edit", id.as_str(), "   "])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("left unchanged"));

    let long = "y".repeat(200);
    taskdeck()
        .args(["edit", id.as_str(), long.as_str()])
        .current_dir(dir.path())
        .assert()
        .failure();

    assert_eq!(texts(&list_json(dir.path(), &[])), vec!["Walk the dog"]);
}

#[test]
fn rm_clear_completed_and_stats() {
    let dir = init_workspace();
    let a = add(dir.path(), "A");
    add(dir.path(), "B");
    let c = add(dir.path(), "C");
    let d = add(dir.path(), "D");

    taskdeck()
        .args(["rm", d.as_str()])
        .current_dir(dir.path())
        .assert()
        .success();
    for id in [a.as_str(), c.as_str()] {
        taskdeck()
            .args(["toggle", id])
            .current_dir(dir.path())
            .assert()
            .success();
    }

    let output = taskdeck()
        .args(["--json", "stats"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    let counts: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(counts["total"], 3);
    assert_eq!(counts["active"], 1);
    assert_eq!(counts["completed"], 2);

    taskdeck()
        .arg("clear-completed")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Removed 2 completed tasks"));

    assert_eq!(texts(&list_json(dir.path(), &[])), vec!["B"]);
}

#[test]
fn backup_and_restore_between_workspaces() {
    let source = init_workspace();
    let first = add(source.path(), "Pay bills");
    add(source.path(), "Walk dog");
    taskdeck()
        .args(["toggle", first.as_str()])
        .current_dir(source.path())
        .assert()
        .success();

    let backup_path = source.path().join("backup.json");
    taskdeck()
        .args(["backup", "-o", backup_path.to_str().unwrap()])
        .current_dir(source.path())
        .assert()
        .success();

    let target = init_workspace();
    add(target.path(), "to be replaced");
    taskdeck()
        .args(["restore", backup_path.to_str().unwrap()])
        .current_dir(target.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Restored 2 tasks"));

    assert_eq!(list_json(target.path(), &[]), list_json(source.path(), &[]));
}

#[test]
fn restore_from_stdin() {
    let dir = init_workspace();
    taskdeck()
        .args(["restore", "-"])
        .write_stdin(r#"[{"text": "second", "order": 2}, {"id": "abc123", "text": "first", "order": 1}]"#)
        .current_dir(dir.path())
        .assert()
        .success();

    let tasks = list_json(dir.path(), &[]);
    assert_eq!(texts(&tasks), vec!["first", "second"]);
    assert_eq!(tasks[0]["id"], "abc123");
}

#[test]
fn malformed_restore_keeps_existing_tasks() {
    let dir = init_workspace();
    add(dir.path(), "keep me");

    taskdeck()
        .args(["restore", "-"])
        .write_stdin("{ this is not a backup")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("could not restore backup"));

    taskdeck()
        .args(["restore", "-"])
        .write_stdin(r#"{"text": "object, not list"}"#)
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("list of task records"));

    assert_eq!(texts(&list_json(dir.path(), &[])), vec!["keep me"]);
}

#[test]
fn hand_written_tasks_keep_their_assigned_ids() {
    let dir = init_workspace();
    std::fs::write(
        dir.path().join(".taskdeck/tasks.json"),
        r#"[{"text": "imported by hand"}]"#,
    )
    .unwrap();

    let tasks = list_json(dir.path(), &[]);
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    taskdeck()
        .args(["toggle", id.as_str()])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Completed"));

    let tasks = list_json(dir.path(), &[]);
    assert_eq!(tasks[0]["id"], id.as_str());
    assert_eq!(tasks[0]["completed"], true);
}

#[test]
fn corrupt_task_file_reads_as_empty() {
    let dir = init_workspace();
    std::fs::write(dir.path().join(".taskdeck/tasks.json"), "garbage").unwrap();

    taskdeck()
        .arg("list")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("No tasks yet"));
}

#[test]
fn theme_defaults_toggles_and_persists() {
    let dir = init_workspace();
    taskdeck()
        .arg("theme")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("light"));

    taskdeck()
        .args(["theme", "toggle"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("dark"));

    taskdeck()
        .args(["--json", "theme"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains(r#""theme":"dark""#));

    taskdeck()
        .args(["theme", "sepia"])
        .current_dir(dir.path())
        .assert()
        .failure();
}
