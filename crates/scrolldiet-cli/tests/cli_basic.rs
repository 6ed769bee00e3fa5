//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory
//! and inspects the JSON it prints.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(home, args, "")
}

fn run_cli_with_input(home: &Path, args: &[&str], input: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_scrolldiet"))
        .args(args)
        .env("SCROLLDIET_HOME", home)
        .env_remove("SCROLLDIET_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// The CLI prints one pretty JSON document per event.
fn events(stdout: &str) -> Vec<Value> {
    serde_json::Deserializer::from_str(stdout)
        .into_iter::<Value>()
        .map(|v| v.unwrap())
        .collect()
}

fn of_type<'a>(events: &'a [Value], ty: &str) -> Vec<&'a Value> {
    events.iter().filter(|e| e["type"] == ty).collect()
}

#[test]
fn test_status_before_setup_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["status"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("scrolldiet setup"));
}

#[test]
fn test_setup_then_status() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["setup", "--limit", "30", "--platform", "instagram"],
    );
    assert_eq!(code, 0, "setup failed: {stderr}");
    let evs = events(&stdout);
    assert_eq!(evs[0]["type"], "budget_initialized");
    assert_eq!(evs[0]["limit"], 30);
    assert_eq!(evs[0]["platform"], "INSTAGRAM");
    assert!(stderr.contains("Goal set: 30 Reels!"));

    let (stdout, _, code) = run_cli(home.path(), &["status"]);
    assert_eq!(code, 0);
    let snap = &events(&stdout)[0];
    assert_eq!(snap["type"], "state_snapshot");
    assert_eq!(snap["count"], 0);
    assert_eq!(snap["remaining"], 30);
    assert_eq!(snap["locked"], false);
}

#[test]
fn test_add_crosses_thresholds_and_locks() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["setup", "--limit", "50"]);

    let (stdout, _, code) = run_cli(home.path(), &["add", "25"]);
    assert_eq!(code, 0);
    let evs = events(&stdout);
    let crossed = of_type(&evs, "threshold_crossed");
    assert_eq!(crossed.len(), 1);
    assert_eq!(crossed[0]["percent"], 50);

    let (stdout, stderr, _) = run_cli(home.path(), &["add", "30"]);
    let evs = events(&stdout);
    let percents: Vec<_> = of_type(&evs, "threshold_crossed")
        .iter()
        .map(|e| e["percent"].as_u64().unwrap())
        .collect();
    assert_eq!(percents, vec![80, 100]);
    assert!(stderr.contains("Stop scrolling now!"));

    let (stdout, _, code) = run_cli(home.path(), &["add"]);
    assert_eq!(code, 0);
    let evs = events(&stdout);
    assert_eq!(evs[0]["type"], "increment_suppressed");
    assert_eq!(evs[0]["count"], 55);
}

#[test]
fn test_limit_is_floored() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["setup"]);

    let (stdout, _, code) = run_cli(home.path(), &["limit", "set", "2"]);
    assert_eq!(code, 0);
    let evs = events(&stdout);
    assert_eq!(evs[0]["type"], "limit_changed");
    assert_eq!(evs[0]["from"], 50);
    assert_eq!(evs[0]["to"], 5);

    let (stdout, _, _) = run_cli(home.path(), &["limit", "up"]);
    assert_eq!(events(&stdout)[0]["to"], 10);
}

#[test]
fn test_reset_requires_confirmation() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["setup", "--limit", "10"]);
    run_cli(home.path(), &["add", "4"]);

    let (_, stderr, code) = run_cli(home.path(), &["reset"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--yes"));

    let (stdout, _, code) = run_cli(home.path(), &["reset", "--yes"]);
    assert_eq!(code, 0);
    assert_eq!(events(&stdout)[0]["type"], "progress_reset");

    let (stdout, _, _) = run_cli(home.path(), &["status"]);
    assert_eq!(events(&stdout)[0]["count"], 0);
}

#[test]
fn test_forget_returns_to_setup() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["setup"]);
    let (_, _, code) = run_cli(home.path(), &["forget", "--yes"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(home.path(), &["status"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "budget.default_limit"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "50");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "budget.default_limit", "20"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "budget.default_limit"]);
    assert_eq!(stdout.trim(), "20");

    let (stdout, _, _) = run_cli(home.path(), &["setup"]);
    assert_eq!(events(&stdout)[0]["limit"], 20);

    let (_, _, code) = run_cli(home.path(), &["config", "set", "tracker.seconds_per_scroll", "0"]);
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(home.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
}

#[test]
fn test_offline_posts() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["posts", "--offline", "--count", "3"]);
    assert_eq!(code, 0);
    let posts: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(posts.len(), 3);
    assert!(posts[0]["imageUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://picsum.photos/seed/"));
}

#[test]
fn test_track_quits_on_command() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["setup", "--mode", "tracker"]);

    let (stdout, stderr, code) = run_cli_with_input(home.path(), &["track"], "p\np\nq\n");
    assert_eq!(code, 0, "track failed: {stderr}");
    let evs = events(&stdout);
    assert_eq!(of_type(&evs, "tracker_paused").len(), 1);
    assert_eq!(of_type(&evs, "tracker_resumed").len(), 1);
    assert_eq!(evs.last().unwrap()["type"], "state_snapshot");
}

#[test]
fn test_track_on_locked_budget_stays_idle() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["setup", "--limit", "5", "--mode", "tracker"]);
    run_cli(home.path(), &["add", "5"]);

    let (stdout, stderr, code) = run_cli_with_input(home.path(), &["track"], "p\nq\n");
    assert_eq!(code, 0);
    assert!(stderr.contains("reached your daily limit"));
    let evs = events(&stdout);
    assert!(of_type(&evs, "tracker_paused").is_empty());
    assert_eq!(evs.last().unwrap()["count"], 5);
}

#[test]
fn test_track_reset_keeps_user_pause() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["setup", "--mode", "tracker"]);

    let (stdout, stderr, code) =
        run_cli_with_input(home.path(), &["track"], "p\nreset\ns\nq\n");
    assert_eq!(code, 0, "track failed: {stderr}");
    let evs = events(&stdout);
    assert_eq!(of_type(&evs, "tracker_paused").len(), 1);
    assert_eq!(of_type(&evs, "progress_reset").len(), 1);
    assert!(of_type(&evs, "tracker_resumed").is_empty());
    assert!(stderr.contains("tracker paused"));
    assert!(!stderr.contains("tracker running"));
}

#[test]
fn test_feed_counts_each_post_once() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["setup"]);

    let (stdout, stderr, code) =
        run_cli_with_input(home.path(), &["feed", "--offline"], "n\nn\nk\ns\nq\n");
    assert_eq!(code, 0, "feed failed: {stderr}");
    let evs = events(&stdout);
    // The first post counts on open; going back to post two adds nothing.
    let added = of_type(&evs, "scrolls_added");
    assert_eq!(added.len(), 3);
    assert_eq!(added.last().unwrap()["count"], 3);
    let snapshots = of_type(&evs, "state_snapshot");
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0]["count"], 3);
    assert_eq!(evs.last().unwrap()["count"], 3);

    let (stdout, _, _) = run_cli(home.path(), &["status"]);
    assert_eq!(events(&stdout)[0]["count"], 3);
}

#[test]
fn test_disabled_notifications_skip_system_alert() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "notifications.enabled", "false"]);
    assert_eq!(code, 0);
    run_cli(home.path(), &["setup", "--limit", "5"]);

    let (stdout, stderr, code) = run_cli(home.path(), &["add", "5"]);
    assert_eq!(code, 0);
    assert_eq!(of_type(&events(&stdout), "threshold_crossed").len(), 3);
    assert!(!stderr.contains("[ScrollDiet Limit Reached]"));
    assert!(stderr.contains("That's it! You've reached your daily limit."));
}

#[test]
fn test_enabled_notifications_raise_system_alert() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["setup", "--limit", "5"]);

    let (_, stderr, code) = run_cli(home.path(), &["add", "5"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("[ScrollDiet Limit Reached] Stop scrolling now!"));
}
