//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(dir: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_pomotimer"))
        .args(args)
        .env("POMOTIMER_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn view(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_status_on_fresh_data_dir() {
    let dir = TempDir::new().unwrap();
    let json = view(&dir, &["status"]);
    assert_eq!(json["mode"], "work");
    assert_eq!(json["countdown"], "25:00");
    assert_eq!(json["goal"], 0);
    assert_eq!(json["completed_today"], 0);
    assert_eq!(json["sound_enabled"], true);
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_goal_set_and_ignored() {
    let dir = TempDir::new().unwrap();
    assert_eq!(view(&dir, &["goal", "5"])["goal"], 5);
    assert_eq!(view(&dir, &["goal", "abc"])["goal"], 5);
    assert_eq!(view(&dir, &["goal", "--", "-1"])["goal"], 5);
    assert_eq!(view(&dir, &["status"])["goal"], 5);
}

#[test]
fn test_goal_without_value_uses_prefilled_input() {
    let dir = TempDir::new().unwrap();
    assert_eq!(view(&dir, &["goal"])["goal"], 4);
}

#[test]
fn test_sound_toggle() {
    let dir = TempDir::new().unwrap();
    assert_eq!(view(&dir, &["sound", "off"])["sound_enabled"], false);
    assert_eq!(view(&dir, &["sound", "toggle"])["sound_enabled"], true);
    assert_eq!(view(&dir, &["status"])["sound_enabled"], true);
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["config", "get", "ui.progress_bar_width"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "20");

    let (code, _, _) = run_cli(&dir, &["config", "set", "ui.progress_bar_width", "10"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(&dir, &["config", "get", "ui.progress_bar_width"]);
    assert_eq!(stdout.trim(), "10");
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&dir, &["config", "set", "ui.colour", "red"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&dir, &["config", "set", "ui.terminal_title", "false"]);
    assert_eq!(code, 0);
    let (code, _, _) = run_cli(&dir, &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(&dir, &["config", "get", "ui.terminal_title"]);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_interactive_run_applies_commands() {
    let dir = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomotimer"))
        .args(["run", "--mode", "short-break"])
        .env("POMOTIMER_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn interactive run");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"g 3\nm\nq\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[Short Break] 05:00 paused"));
    assert!(stdout.contains("0/3"));

    let json = view(&dir, &["status"]);
    assert_eq!(json["goal"], 3);
    assert_eq!(json["sound_enabled"], false);
}

#[cfg(unix)]
#[test]
fn test_interactive_run_exits_on_interrupt() {
    let dir = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomotimer"))
        .arg("run")
        .env("POMOTIMER_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn interactive run");

    // Keep stdin open and idle for the whole test.
    let _stdin = child.stdin.take().unwrap();
    let mut stdout = BufReader::new(child.stdout.take().unwrap());
    let mut help = String::new();
    stdout.read_line(&mut help).unwrap();
    assert!(help.contains("start/pause"));
    thread::sleep(Duration::from_millis(500));

    let sent = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(sent.success());

    let deadline = Instant::now() + Duration::from_secs(5);
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if Instant::now() > deadline {
            child.kill().ok();
            panic!("still running 5s after SIGINT");
        }
        thread::sleep(Duration::from_millis(50));
    };
    assert!(status.success());
}
