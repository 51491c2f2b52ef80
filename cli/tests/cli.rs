use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write test file");
}

#[test]
fn pretty_prints_file_by_default() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, r#"{"items":[1,2]}"#);

    cargo_bin_cmd!("rcjson")
        .arg(&input)
        .assert()
        .success()
        .stdout("{\n  \"items\" : [\n    1,\n    2\n  ]\n}\n");
}

#[test]
fn compact_output() {
    cargo_bin_cmd!("rcjson")
        .arg("--compact")
        .write_stdin("[ 1 , \"two\" , null ]")
        .assert()
        .success()
        .stdout("[1,\"two\",null]\n");
}

#[test]
fn reads_stdin_with_dash() {
    cargo_bin_cmd!("rcjson")
        .args(["-", "--compact"])
        .write_stdin("// leading comment\n{\"a\": true}")
        .assert()
        .success()
        .stdout("{\"a\":true}\n");
}

#[test]
fn custom_indent() {
    cargo_bin_cmd!("rcjson")
        .args(["--indent", "4"])
        .write_stdin("[1]")
        .assert()
        .success()
        .stdout("[\n    1\n]\n");
}

#[test]
fn no_comments_rejects_comments() {
    cargo_bin_cmd!("rcjson")
        .arg("--no-comments")
        .write_stdin("/* c */ 1")
        .assert()
        .failure()
        .stderr(contains("error: line 1: comments are not supported"));
}

#[test]
fn syntax_error_is_reported_once() {
    cargo_bin_cmd!("rcjson")
        .write_stdin("{\n\"a\" 1}")
        .assert()
        .failure()
        .stderr(contains("error: line 2: ':' expected").and(contains("ERROR").not()));
}

#[test]
fn missing_file_reports_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("missing.json");

    cargo_bin_cmd!("rcjson")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(contains("error: unable to read"));
}

#[test]
fn ascii_and_general_numbers() {
    cargo_bin_cmd!("rcjson")
        .args(["--compact", "--ascii", "--general-numbers"])
        .write_stdin(r#"["café", 1234567]"#)
        .assert()
        .success()
        .stdout("[\"caf\\u00e9\",1.23457e+06]\n");
}

#[test]
fn writes_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    let output = dir.path().join("out.json");
    write_file(&input, r#"{"k": "v"}"#);

    cargo_bin_cmd!("rcjson")
        .arg(&input)
        .arg("--compact")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Formatted"));

    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(written, "{\"k\":\"v\"}\n");
}

#[test]
fn output_write_failure_uses_error_prefix() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("no-such-dir").join("out.json");

    cargo_bin_cmd!("rcjson")
        .arg("-o")
        .arg(&output)
        .write_stdin("1")
        .assert()
        .failure()
        .stderr(contains("ERROR  "));
}
