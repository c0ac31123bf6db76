#![allow(dead_code)]
use assert_cmd::Command;
use std::io::Write;
use tempfile::NamedTempFile;

pub const NO_OUTPUT: &str = "";
pub const NO_ERROR: &str = "";
pub const SUCCESS: i32 = 0;
pub const STATIC_ERROR: i32 = 65;
pub const RUNTIME_ERROR: i32 = 70;

/// Writes the input to a temp script, runs the given command of the built
/// binary on it, and asserts stdout, stderr and exit code exactly.
fn run_command(
    command: &str,
    input: &str,
    expected: &str,
    expected_error: &str,
    expected_code: i32,
) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    write!(temp_file, "{input}").expect("Failed to write to temp file");

    let mut cmd = Command::cargo_bin("treelox").expect("Binary not found");
    cmd.args([command, temp_file.path().to_str().unwrap()]);

    let output = cmd.output().expect("Failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let exit_code = output.status.code().unwrap_or(-1);

    assert_eq!(stdout, expected, "stdout mismatch for input:\n{input}");
    assert_eq!(stderr, expected_error, "stderr mismatch for input:\n{input}");
    assert_eq!(exit_code, expected_code, "exit code mismatch for input:\n{input}");
}

pub fn run_tokenize(input: &str, expected: &str, expected_error: &str, expected_code: i32) {
    run_command("tokenize", input, expected, expected_error, expected_code);
}

pub fn run_parse(input: &str, expected: &str, expected_error: &str, expected_code: i32) {
    run_command("parse", input, expected, expected_error, expected_code);
}

pub fn run_evaluate(input: &str, expected: &str, expected_error: &str, expected_code: i32) {
    run_command("evaluate", input, expected, expected_error, expected_code);
}

pub fn run_program(input: &str, expected: &str, expected_error: &str, expected_code: i32) {
    run_command("run", input, expected, expected_error, expected_code);
}
