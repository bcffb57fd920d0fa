use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("brain").unwrap();
    cmd.env("BRAIN_CONFIG", "/nonexistent/brain.toml")
        .env_remove("BRAIN_REPL_MODE")
        .timeout(Duration::from_secs(5));
    cmd
}

/// 'A' (65)
fn print_a() -> String {
    format!("{}.", "+".repeat(65))
}

#[test]
fn piped_stdin_runs_in_bare_mode_without_prompts() {
    cargo_bin()
        .write_stdin(format!("{}\n", print_a()))
        .assert()
        .success()
        .stdout("A\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn empty_stdin_exits_cleanly() {
    cargo_bin()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn each_line_runs_on_a_fresh_tape() {
    let line = print_a();
    cargo_bin()
        .arg("repl")
        .write_stdin(format!("{line}\n{line}\n"))
        .assert()
        .success()
        .stdout("A\nA\n");
}

#[test]
fn errors_are_reported_and_the_loop_continues() {
    cargo_bin()
        .arg("repl")
        .write_stdin(format!("<\n{}\n", print_a()))
        .assert()
        .success()
        .stdout("\nA\n")
        .stderr(predicate::str::contains("below minimum index 0"));
}

#[test]
fn mode_toggle_switches_to_classic() {
    cargo_bin()
        .arg("repl")
        .write_stdin("-\n:mode\n-\n")
        .assert()
        .success()
        .stdout("\n\n")
        .stderr(predicate::str::contains("Runtime error").count(1));
}

#[test]
fn numout_toggle() {
    cargo_bin()
        .arg("repl")
        .write_stdin(":numout\n++++++[>+++++++<-]>.\n")
        .assert()
        .success()
        .stdout("42\n");
}

#[test]
fn paste_mode_runs_after_two_blank_lines() {
    cargo_bin()
        .arg("repl")
        .write_stdin(":paste\n++++++++[>++++++++\n<-]>+.\n\n\n")
        .assert()
        .success()
        .stdout("A\n");
}

#[test]
fn quit_stops_reading() {
    cargo_bin()
        .arg("repl")
        .write_stdin(format!(":quit\n{}\n", print_a()))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn comma_reads_the_next_stdin_line() {
    cargo_bin()
        .arg("repl")
        .write_stdin(",.\nz\n")
        .assert()
        .success()
        .stdout("z\n");
}

#[test]
fn flags_set_initial_modes() {
    cargo_bin()
        .arg("repl").arg("--classic")
        .write_stdin("<-\n")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
