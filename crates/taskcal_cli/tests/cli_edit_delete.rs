use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskcal-{nanos}-{file_name}"))
}

fn taskcal(store_path: &PathBuf) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_taskcal"));
    command
        .env("TASKCAL_STORE_PATH", store_path)
        .env("TASKCAL_CONFIG_PATH", temp_path("no-config.json"));
    command
}

fn run(store_path: &PathBuf, args: &[&str]) -> std::process::Output {
    taskcal(store_path)
        .args(args)
        .output()
        .expect("failed to run command")
}

fn first_record(store_path: &PathBuf) -> serde_json::Value {
    let content = std::fs::read_to_string(store_path).expect("store file exists");
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    parsed.as_array().expect("top-level array")[0].clone()
}

#[test]
fn edit_updates_only_the_named_fields() {
    let store_path = temp_path("cli-edit.json");
    assert!(
        run(
            &store_path,
            &["add", "Buy milk", "--priority", "low", "--due", "2024-01-10"],
        )
        .status
        .success()
    );

    let output = run(
        &store_path,
        &["edit", "1", "--title", "Buy oat milk", "--priority", "high"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Updated task 1: Buy oat milk"));

    let record = first_record(&store_path);
    std::fs::remove_file(&store_path).ok();
    assert_eq!(record["title"], "Buy oat milk");
    assert_eq!(record["priority"], "High");
    assert_eq!(record["due_date"], "2024-01-10");
}

#[test]
fn edit_clear_due_removes_the_date() {
    let store_path = temp_path("cli-edit-clear.json");
    assert!(
        run(
            &store_path,
            &[
                "add",
                "demo",
                "--due",
                "2024-01-10",
                "--reminder",
                "2024-01-10 09:00",
            ],
        )
        .status
        .success()
    );

    assert!(
        run(&store_path, &["edit", "1", "--clear-due", "--clear-reminder"])
            .status
            .success()
    );

    let record = first_record(&store_path);
    std::fs::remove_file(&store_path).ok();
    assert_eq!(record["due_date"], serde_json::Value::Null);
    assert_eq!(record["reminder"], serde_json::Value::Null);
}

#[test]
fn edit_rejects_clear_due_combined_with_due() {
    let store_path = temp_path("cli-edit-conflict.json");
    assert!(run(&store_path, &["add", "demo"]).status.success());

    let output = run(
        &store_path,
        &["edit", "1", "--due", "2024-02-01", "--clear-due"],
    );
    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
}

#[test]
fn edit_unknown_id_fails() {
    let store_path = temp_path("cli-edit-missing.json");
    let output = run(&store_path, &["edit", "99", "--title", "anything"]);

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - task 99 not found"));
}

#[test]
fn delete_removes_the_task() {
    let store_path = temp_path("cli-delete.json");
    assert!(run(&store_path, &["add", "first"]).status.success());
    assert!(run(&store_path, &["add", "second"]).status.success());

    let output = run(&store_path, &["delete", "1"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted task 1: first"));

    let list = run(&store_path, &["list"]);
    let list_out = String::from_utf8_lossy(&list.stdout).to_string();
    std::fs::remove_file(&store_path).ok();
    assert!(!list_out.contains("first"));
    assert!(list_out.contains("second"));
}

#[test]
fn delete_unknown_id_fails() {
    let store_path = temp_path("cli-delete-missing.json");
    let output = run(&store_path, &["delete", "99"]);

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - task 99 not found"));
}

#[test]
fn ids_survive_delete_without_reuse() {
    let store_path = temp_path("cli-id-reuse.json");
    assert!(run(&store_path, &["add", "first"]).status.success());
    assert!(run(&store_path, &["add", "second"]).status.success());
    assert!(run(&store_path, &["delete", "2"]).status.success());

    let output = run(&store_path, &["add", "third", "--json"]);
    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let task: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(task["id"], 3);
}
