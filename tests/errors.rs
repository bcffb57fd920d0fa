use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("brain").unwrap();
    cmd.env("BRAIN_CONFIG", "/nonexistent/brain.toml").timeout(Duration::from_secs(5));
    cmd
}

#[test]
fn unmatched_open_bracket_fails_in_both_modes() {
    for flag in ["--strict", "--classic"] {
        cargo_bin()
            .arg("run").arg(flag).arg("[")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("missing close-brace ] for this open-brace ["));
    }
}

#[test]
fn unmatched_close_bracket_fails_in_both_modes() {
    for flag in ["--strict", "--classic"] {
        cargo_bin()
            .arg("run").arg(flag).arg("+]")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("missing open-brace [ for this close-brace ]"));
    }
}

#[test]
fn pointer_below_zero_only_fails_in_strict_mode() {
    cargo_bin()
        .arg("run").arg("<")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("below minimum index 0"));

    cargo_bin()
        .arg("run").arg("--classic").arg("<")
        .assert()
        .success();
}

#[test]
fn pointer_past_single_cell_tape() {
    cargo_bin()
        .arg("run").arg("--memory").arg("1").arg(">>")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("above maximum index 0"));

    cargo_bin()
        .arg("run").arg("--classic").arg("--memory").arg("1").arg(">>")
        .assert()
        .success();
}

#[test]
fn decrement_below_zero_only_fails_in_strict_mode() {
    cargo_bin()
        .arg("run").arg("-")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cell 0 is already at minimum allowable value"));

    // Classic wraps to 255; 255 - 150 = 105 = 'i'
    let code = format!("-{}.", "-".repeat(150));
    cargo_bin()
        .arg("run").arg("--classic").arg(code)
        .assert()
        .success()
        .stdout("i\n");
}

#[test]
fn zero_memory_is_a_configuration_error() {
    cargo_bin()
        .arg("run").arg("--memory").arg("0").arg("+")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must provide at least 1 cell of memory"));
}

#[test]
fn oversized_memory_is_a_configuration_error() {
    cargo_bin()
        .arg("run").arg("--memory").arg("18446744073709551615").arg("+")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("cannot allocate 18446744073709551615 cells of memory"));
}

#[test]
fn diagnostic_shows_caret_and_partial_output() {
    let code = format!("{}.<", "+".repeat(65));
    cargo_bin()
        .arg("run").arg(code)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error at      ^      char index 66"))
        .stderr(predicate::str::contains("   output: A"));
}

#[test]
fn multi_character_input_is_rejected() {
    for flags in [&["run"][..], &["run", "--classic"][..], &["run", "--numin"][..]] {
        cargo_bin()
            .args(flags).arg(",")
            .write_stdin("abc\n")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("expected a single character of input"));
    }
}

#[test]
fn empty_input_is_rejected() {
    cargo_bin()
        .arg("run").arg(",")
        .write_stdin("\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("got 0 characters"));
}

#[test]
fn non_digit_numeric_input_is_rejected() {
    cargo_bin()
        .arg("run").arg("--numin").arg(",")
        .write_stdin("x\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("non-digit characters entered in numeric mode"));
}
