//! CLI integration tests for okcpu-cli
//!
//! Tests command parsing, descriptor output, and config handling. Write
//! commands are pure, so they run for real; read commands would hit the
//! network and are only exercised at the parsing level.

use std::path::Path;
use std::process::Command;

/// Helper to run the CLI with arguments
fn run_okcpu(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_okcpu"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Helper to run the CLI against a scratch home directory
fn run_okcpu_with_home(home: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_okcpu"))
        .env("HOME", home)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

// ==================== Help & Version Tests ====================

#[test]
fn test_cli_help() {
    let output = run_okcpu(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("okcpu"));
    assert!(stdout.contains("board"));
    assert!(stdout.contains("post"));
    assert!(stdout.contains("stats"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_cli_version() {
    let output = run_okcpu(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("okcpu"));
}

#[test]
fn test_cli_board_help() {
    let output = run_okcpu(&["board", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--count"));
}

#[test]
fn test_cli_post_help() {
    let output = run_okcpu(&["post", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("channel"));
    assert!(stdout.contains("text"));
}

// ==================== Descriptor Output Tests ====================

#[test]
fn test_post_prints_descriptor() {
    let output = run_okcpu(&["--token", "7", "post", "board", "gm"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("chainId"));
    assert!(stdout.contains("8453"));
    assert!(stdout.contains("0x3b80a74a"));
}

#[test]
fn test_post_descriptor_json() {
    let output = run_okcpu(&["--json", "--token", "7", "post", "board", "gm"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    let descriptor = &json["descriptor"];
    assert_eq!(
        descriptor["to"],
        "0x04D7C8b512D5455e20df1E808f12caD1e3d766E5"
    );
    assert_eq!(descriptor["value"], "0");
    assert_eq!(descriptor["chainId"], 8453);
    let data = descriptor["data"].as_str().unwrap();
    assert!(data.starts_with("0x3b80a74a"));
}

#[test]
fn test_email_descriptor() {
    let output = run_okcpu(&["--json", "--token", "7", "email", "42", "you there?"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    let data = json["descriptor"]["data"].as_str().unwrap();
    assert!(data.starts_with("0x3b80a74a"));
}

#[test]
fn test_store_descriptor() {
    let output = run_okcpu(&["--json", "--token", "7", "store", "mood", "curious"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    let data = json["descriptor"]["data"].as_str().unwrap();
    assert!(data.starts_with("0x6f711443"));
}

#[test]
fn test_remove_descriptor() {
    let output = run_okcpu(&["--json", "--token", "7", "remove", "mood"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    let data = json["descriptor"]["data"].as_str().unwrap();
    assert!(data.starts_with("0xba774adb"));
}

#[test]
fn test_set_username_descriptor() {
    let output = run_okcpu(&["--token", "7", "set-username", "neo"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0x6f711443"));
}

#[test]
fn test_set_username_too_long() {
    let output = run_okcpu(&["--token", "7", "set-username", "abcdefghijklmnopq"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"));
    assert!(stderr.contains("17 characters"));
}

// ==================== Page Upload Tests ====================

#[test]
fn test_set_page_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("page.html");
    std::fs::write(&file, "<html><body>gm</body></html>").unwrap();

    let output = run_okcpu(&["--token", "7", "set-page", file.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0x6f711443"));
}

#[test]
fn test_set_page_at_size_limit() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("page.html");
    std::fs::write(&file, "a".repeat(65536)).unwrap();

    let output = run_okcpu(&["--token", "7", "set-page", file.to_str().unwrap()]);
    assert!(output.status.success());
}

#[test]
fn test_set_page_over_size_limit() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("page.html");
    std::fs::write(&file, "a".repeat(65537)).unwrap();

    let output = run_okcpu(&["--token", "7", "set-page", file.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("65536"));
}

#[test]
fn test_set_page_missing_file() {
    let output = run_okcpu(&["--token", "7", "set-page", "/nonexistent/page.html"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"));
}

// ==================== Config Tests ====================

#[test]
fn test_write_without_token_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_okcpu_with_home(dir.path(), &["post", "board", "gm"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no token id set"));
}

#[test]
fn test_error_output_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_okcpu_with_home(dir.path(), &["--json", "post", "board", "gm"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Error should be valid JSON");
    assert!(json.get("error").is_some());
    assert_eq!(json.get("success"), Some(&serde_json::Value::Bool(false)));
}

#[test]
fn test_config_set_and_show() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_okcpu_with_home(dir.path(), &["config", "--set-token", "1399"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("saved"));

    let config_file = dir.path().join(".okcomputers").join("config.toml");
    let content = std::fs::read_to_string(config_file).unwrap();
    assert!(content.contains("token = 1399"));

    let output = run_okcpu_with_home(dir.path(), &["config", "--show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1399"));
}

#[test]
fn test_config_show_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_okcpu_with_home(dir.path(), &["--json", "config", "--show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(json["rpc_url"], "https://mainnet.base.org");
    assert_eq!(json["token"], "(not set)");
}

#[test]
fn test_configured_token_feeds_writes() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_okcpu_with_home(dir.path(), &["config", "--set-token", "7"]);
    assert!(output.status.success());

    // No --token flag: the saved default applies
    let output = run_okcpu_with_home(dir.path(), &["--json", "post", "board", "gm"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert!(json["descriptor"]["data"]
        .as_str()
        .unwrap()
        .starts_with("0x3b80a74a"));
}

// ==================== Global Options Tests ====================

#[test]
fn test_global_rpc_url_flag() {
    // Writes never dial out, so any URL is accepted
    let output = run_okcpu(&[
        "--rpc-url",
        "http://localhost:8545",
        "--token",
        "7",
        "post",
        "board",
        "gm",
    ]);
    assert!(output.status.success());
}

#[test]
fn test_write_output_has_no_value_transfer() {
    let output = run_okcpu(&["--json", "--token", "7", "post", "board", "gm"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(json["descriptor"]["value"], "0");
}
