use assert_cmd::Command;
use predicates::prelude::*;
use std::time::{Duration, Instant};

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.env("BF_CONFIG", "/nonexistent/bf.toml").env_remove("BF_DELAY_MS");
    cmd
}

#[test]
fn live_view_draws_frames_on_stderr() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .args(["run", "--live", "--delay", "0", "+++."])
        .assert()
        .success()
        .stdout("\u{3}\n")
        // stderr is not a terminal here, so the view marks positions with brackets
        .stderr(predicate::str::contains("+[+]+.").and(predicate::str::contains("[3]")));
}

#[test]
fn live_delay_slows_execution() {
    let started = Instant::now();
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .args(["run", "--live", "--delay", "20", "++++++++++"])
        .assert()
        .success();
    assert!(started.elapsed() >= Duration::from_millis(200));
}

#[test]
fn delay_from_environment() {
    let started = Instant::now();
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .env("BF_DELAY_MS", "20")
        .args(["run", "++++++++++"])
        .assert()
        .success()
        .stdout("\n");
    assert!(started.elapsed() >= Duration::from_millis(200));
}
