use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.env("BF_CONFIG", "/nonexistent/bf.toml").env_remove("BF_MATCHING");
    cmd
}

#[test]
fn pointer_underflow_halts_with_context() {
    cargo_bin()
        .args(["run", ">+<<+."])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("Runtime error: pointer moved left of cell 0 at instruction 3")
                .and(predicate::str::contains(">+<<+."))
                .and(predicate::str::contains("     ^")),
        );
}

#[test]
fn output_is_discarded_on_fault() {
    cargo_bin()
        .args(["run", "+++.<"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_input_is_fatal() {
    cargo_bin()
        .args(["run", ",."])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no input line available"));
}

#[test]
fn non_numeric_input_is_fatal() {
    cargo_bin()
        .args(["run", ",."])
        .write_stdin("abc\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'abc' is not an integer from 0 to 255"));
}

#[test]
fn input_too_large_for_the_cell_is_fatal() {
    cargo_bin()
        .args(["run", ",."])
        .write_stdin("300\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("from 0 to 255"));

    cargo_bin()
        .args(["run", "--cell-width", "16", ",."])
        .write_stdin("300\n")
        .assert()
        .success()
        .stdout("\u{12c}\n");
}
