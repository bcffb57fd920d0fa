use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("brain").unwrap();
    cmd.env("BRAIN_CONFIG", "/nonexistent/brain.toml").timeout(Duration::from_secs(5));
    cmd
}

#[test]
fn editor_on_non_tty_is_error_exit_1() {
    cargo_bin()
        .env_remove("BRAIN_REPL_MODE")
        .arg("repl")
        .arg("--editor")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("stdin is not a TTY"));
}

#[test]
fn env_editor_on_non_tty_is_error() {
    cargo_bin()
        .env("BRAIN_REPL_MODE", "editor")
        .arg("repl")
        .write_stdin("+.\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("stdin is not a TTY"));
}

#[test]
fn bare_flag_overrides_env() {
    cargo_bin()
        .env("BRAIN_REPL_MODE", "editor")
        .arg("repl")
        .arg("--bare")
        .write_stdin("+++.\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{3}"));
}

#[test]
fn invalid_env_value_is_rejected() {
    cargo_bin()
        .env("BRAIN_REPL_MODE", "fancy")
        .arg("repl")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid BRAIN_REPL_MODE value"));
}
