// Verifies that --debug prints a step-by-step table to stderr and keeps stdout for program output.
use predicates::prelude::*;

fn cargo_bin() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("bf").expect("failed to locate bf binary");
    cmd.env("BF_CONFIG", "/nonexistent/bf.toml").env_remove("BF_DELAY_MS");
    cmd
}

#[test]
fn debug_flag_prints_table() {
    cargo_bin()
        .args(["run", "--debug", ">"])
        .assert()
        .success()
        .stdout("\n")
        .stderr(predicate::str::contains("STEP | IP")
            .and(predicate::str::contains("Moved pointer head to index 1"))
        );
}

#[test]
fn debug_still_produces_output() {
    cargo_bin()
        .args(["run", "-d", "+++."])
        .assert()
        .success()
        .stdout("\u{3}\n")
        .stderr(predicate::str::contains("Increment cell[0] from 2 to 3"));
}

#[test]
fn live_and_debug_cannot_be_combined() {
    cargo_bin()
        .args(["run", "--live", "--debug", "+"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be combined"));
}
