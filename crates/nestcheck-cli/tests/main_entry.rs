//! Integration tests for the `nestcheck` binary entry point.
//!
//! Verifies exit codes, output formats and configuration flags end to end.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn workspace_with(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents)
            .unwrap_or_else(|err| panic!("write {name}: {err}"));
    }
    dir
}

fn path_in(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}

#[test]
fn balanced_file_exits_successfully() {
    let dir = workspace_with(&[("main.c", "int main(void) { return 0; }\n")]);
    let mut command = cargo_bin_cmd!("nestcheck");
    command
        .current_dir(dir.path())
        .args(["--output", "human", "main.c"]);
    command
        .assert()
        .success()
        .stdout(contains("main.c (c)").and(contains("Balanced")));
}

#[test]
fn unbalanced_file_exits_with_one() {
    let dir = workspace_with(&[("app.js", "const s = `(`;\nf([1, 2);\n")]);
    let mut command = cargo_bin_cmd!("nestcheck");
    command
        .current_dir(dir.path())
        .args(["--output", "json", "app.js"]);
    command
        .assert()
        .code(1)
        .stdout(contains("\"profile\":\"javascript\"").and(contains("\"reason\":\"kind_mismatch\"")));
}

#[test]
fn redirected_output_defaults_to_json() {
    let dir = workspace_with(&[("main.go", "func main() { s := `}` }\n")]);
    let mut command = cargo_bin_cmd!("nestcheck");
    command.arg(path_in(dir.path(), "main.go"));
    command
        .assert()
        .success()
        .stdout(contains("\"verdict\":\"balanced\""));
}

#[test]
fn stdin_is_read_for_dash() {
    let mut command = cargo_bin_cmd!("nestcheck");
    command
        .args(["--profile", "rust", "--output", "human", "-"])
        .write_stdin("fn longest<'a>(x: &'a str) -> &'a str { x }\n");
    command.assert().success().stdout(contains("<stdin> (rust)"));
}

#[test]
fn non_utf8_input_exits_with_twenty_one() {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let path = dir.path().join("bytes.c");
    fs::write(&path, [b'(', 0xc3, 0x28, b')'])
        .unwrap_or_else(|err| panic!("write bytes: {err}"));
    let mut command = cargo_bin_cmd!("nestcheck");
    command.arg(&path);
    command
        .assert()
        .code(21)
        .stderr(contains("not valid UTF-8"));
}

#[test]
fn configuration_flags_precede_the_command() {
    let dir = workspace_with(&[("main.c", "int main(void) { return 0; }\n")]);
    let mut command = cargo_bin_cmd!("nestcheck");
    command
        .current_dir(dir.path())
        .args(["--max-input-bytes", "8", "--log-filter=error", "main.c"]);
    command
        .assert()
        .code(42)
        .stderr(contains("exceeds the 8 byte limit"));
}

#[test]
fn oversized_input_is_rejected_before_decoding() {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let path = dir.path().join("blob.c");
    fs::write(&path, [0xff; 5]).unwrap_or_else(|err| panic!("write bytes: {err}"));
    let mut command = cargo_bin_cmd!("nestcheck");
    command.args(["--max-input-bytes", "4"]).arg(&path);
    command
        .assert()
        .code(42)
        .stderr(contains("input of 5 bytes exceeds the 4 byte limit"));
}

#[test]
fn oversized_stdin_is_rejected() {
    let mut command = cargo_bin_cmd!("nestcheck");
    command
        .args(["--max-input-bytes", "4", "--profile", "c", "-"])
        .write_stdin("int main(void) { return 0; }\n");
    command
        .assert()
        .code(42)
        .stderr(contains("input of 29 bytes exceeds the 4 byte limit"));
}

#[test]
fn environment_overrides_the_size_limit() {
    let dir = workspace_with(&[("main.c", "int main(void) { return 0; }\n")]);
    let mut command = cargo_bin_cmd!("nestcheck");
    command
        .current_dir(dir.path())
        .env("NESTCHECK_MAX_INPUT_BYTES", "8")
        .arg("main.c");
    command.assert().code(42);
}

#[test]
fn missing_files_exit_with_usage_error() {
    let mut command = cargo_bin_cmd!("nestcheck");
    command
        .assert()
        .code(10)
        .stderr(contains("no input files given"));
}

#[test]
fn unreadable_file_exits_with_twenty() {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let mut command = cargo_bin_cmd!("nestcheck");
    command.arg(path_in(dir.path(), "absent.py"));
    command
        .assert()
        .code(20)
        .stdout(predicate::str::is_empty())
        .stderr(contains("failed to read input"));
}

#[test]
fn profiles_are_listed_as_json_lines() -> anyhow::Result<()> {
    let mut command = cargo_bin_cmd!("nestcheck");
    command.args(["--list-profiles", "--output", "json"]);
    let output = command.assert().success().get_output().stdout.clone();
    let records = String::from_utf8(output)?
        .lines()
        .map(serde_json::from_str::<serde_json::Value>)
        .collect::<Result<Vec<_>, _>>()?;
    let identifiers: Vec<&str> = records
        .iter()
        .filter_map(|record| record.get("identifier").and_then(serde_json::Value::as_str))
        .collect();
    assert_eq!(
        identifiers,
        vec!["c", "cpp", "java", "javascript", "csharp", "go", "rust", "python"]
    );
    Ok(())
}
