use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

fn cargo_bin(config: &tempfile::NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("brain").unwrap();
    cmd.env("BRAIN_CONFIG", config.path()).timeout(Duration::from_secs(5));
    cmd
}

#[test]
fn config_defaults_apply_to_run() {
    let cfg = config_file("[defaults]\nclassic = true\nnumeric_output = true\n");
    cargo_bin(&cfg)
        .arg("run").arg("-.")
        .assert()
        .success()
        .stdout("255\n");
}

#[test]
fn flags_override_config() {
    let cfg = config_file("[defaults]\nclassic = true\n");
    cargo_bin(&cfg)
        .arg("run").arg("--strict").arg("-")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("minimum allowable value"));
}

#[test]
fn config_memory_size() {
    let cfg = config_file("[defaults]\nmemory = 2\n");
    cargo_bin(&cfg)
        .arg("run").arg(">>")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("above maximum index 1"));
}
