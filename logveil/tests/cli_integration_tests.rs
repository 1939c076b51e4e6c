// logveil/tests/cli_integration_tests.rs
//! End-to-end tests for the logveil binary: stdin in, masked stdout out.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::Builder;

fn logveil() -> Command {
    let mut cmd = Command::cargo_bin("logveil").unwrap();
    cmd.env_remove("LOGVEIL_CONFIG").arg("--quiet");
    cmd
}

#[test]
fn masks_credentials_with_default_config() {
    logveil()
        .write_stdin("login attempt password=hunter2 from 10.0.0.1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("password=***"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn masks_fields_from_a_config_file() {
    let yaml = r#"
auto_detect: false
sensitive_fields:
  - name: matricula
    visible_chars_start: 2
    visible_chars_end: 2
"#;
    let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    logveil()
        .arg("--config")
        .arg(file.path())
        .write_stdin(r#"{"matricula": "900123456789"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("90********89"))
        .stdout(predicate::str::contains("900123456789").not());
}

#[test]
fn field_flag_declares_sensitive_fields_inline() {
    logveil()
        .args(["--no-auto-detect", "--field", "documento:national-id"])
        .write_stdin(r#"{"documento": "12345678909"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("***456789**"))
        .stdout(predicate::str::contains("12345678909").not());
}

#[test]
fn disabled_config_passes_text_through() {
    let yaml = "enabled: false\n";
    let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let input = "login attempt password=hunter2\n";
    logveil()
        .arg("--config")
        .arg(file.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::eq(input));
}

#[test]
fn stats_flag_reports_rule_counts_on_stderr() {
    logveil()
        .args(["--stats", "--no-auto-detect"])
        .write_stdin("a password=x\nb password=y\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Masking summary"))
        .stderr(predicate::str::contains("password: 2"));
}

#[test]
fn unmatched_lines_are_unchanged() {
    logveil()
        .arg("--no-auto-detect")
        .write_stdin("plain log line with nothing sensitive\n")
        .assert()
        .success()
        .stdout(predicate::eq("plain log line with nothing sensitive\n"));
}

#[test]
fn invalid_config_file_fails_with_context() {
    let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(b"sensitive_fields:\n  - name: bad\n    custom_pattern: '(oops'\n")
        .unwrap();

    logveil()
        .arg("--config")
        .arg(file.path())
        .write_stdin("x\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad"));
}
