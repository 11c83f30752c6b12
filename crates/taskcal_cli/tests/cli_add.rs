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

#[test]
fn add_command_succeeds() {
    let store_path = temp_path("cli-add.json");
    let output = taskcal(&store_path)
        .args(["add", "demo task"])
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task 1: demo task"));
}

#[test]
fn add_command_persists_a_json_array() {
    let store_path = temp_path("cli-add-persist.json");
    let output = taskcal(&store_path)
        .args([
            "add",
            "Buy milk",
            "--priority",
            "high",
            "--due",
            "2024-01-10",
            "--reminder",
            "2024-01-10 09:30",
        ])
        .output()
        .expect("failed to run add command");
    assert!(output.status.success());

    let content = std::fs::read_to_string(&store_path).expect("store file written");
    std::fs::remove_file(&store_path).ok();

    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    let records = parsed.as_array().expect("top-level array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "Buy milk");
    assert_eq!(records[0]["priority"], "High");
    assert_eq!(records[0]["due_date"], "2024-01-10");
    assert_eq!(records[0]["reminder"], "2024-01-10 09:30");
    assert_eq!(records[0]["completed"], false);
}

#[test]
fn add_command_rejects_blank_title() {
    let store_path = temp_path("cli-add-blank.json");
    let output = taskcal(&store_path)
        .args(["add", "   "])
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn add_command_rejects_malformed_due_date() {
    let store_path = temp_path("cli-add-bad-date.json");
    let output = taskcal(&store_path)
        .args(["add", "demo", "--due", "10/01/2024"])
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn add_command_emits_json_when_asked() {
    let store_path = temp_path("cli-add-json.json");
    let output = taskcal(&store_path)
        .args(["add", "demo task", "--json"])
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let task: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(task["id"], 1);
    assert_eq!(task["title"], "demo task");
    assert_eq!(task["completed"], false);
}
