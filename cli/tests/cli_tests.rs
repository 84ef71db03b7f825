//! CLI binary integration tests using assert_cmd + predicates.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("swagger-ir").expect("binary should exist")
}

fn simple_document() -> String {
    serde_json::json!({
        "definitions": {
            "Person": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "age": { "type": "integer" }
                },
                "required": ["name"]
            }
        }
    })
    .to_string()
}

// ── Convert to File ─────────────────────────────────────────────────────────

#[test]
fn test_convert_to_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("swagger.json");
    let output = dir.path().join("out.json");

    fs::write(&input, simple_document()).unwrap();

    cmd()
        .args(["convert", input.to_str().unwrap()])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success();

    let content = fs::read_to_string(&output).expect("output file should exist");
    assert!(content.ends_with('\n'));
    let out: serde_json::Value = serde_json::from_str(&content).expect("output should be valid JSON");
    assert_eq!(
        out,
        serde_json::json!({
            "Person": {
                "name": { "__type__": "String", "required": true },
                "age": { "__type__": "Number" }
            }
        })
    );
}

// ── Convert to Stdout ───────────────────────────────────────────────────────

#[test]
fn test_convert_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("swagger.json");
    fs::write(&input, simple_document()).unwrap();

    cmd()
        .args(["convert", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"__type__\""));
}

// ── Marker and Output Flags ─────────────────────────────────────────────────

#[test]
fn test_plain_markers_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("swagger.json");
    fs::write(&input, simple_document()).unwrap();

    cmd()
        .args(["convert", input.to_str().unwrap(), "--markers", "plain"])
        .args(["--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"Person":{"name":{"type":"String","required":true},"age":{"type":"Number"}}}"#,
        ));
}

#[test]
fn test_tagged_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("swagger.json");
    fs::write(&input, simple_document()).unwrap();

    let assert = cmd()
        .args(["convert", input.to_str().unwrap(), "--tagged"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let out: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(out["Person"]["kind"], serde_json::json!("object"));
    assert_eq!(
        out["Person"]["fields"]["name"],
        serde_json::json!({ "kind": "primitive", "primitive": "String", "required": true })
    );
}

#[test]
fn test_max_depth_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("swagger.json");
    fs::write(&input, simple_document()).unwrap();

    cmd()
        .args(["convert", input.to_str().unwrap(), "--max-depth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Recursion depth exceeded"));
}

// ── Invalid Input ───────────────────────────────────────────────────────────

#[test]
fn test_invalid_input() {
    cmd()
        .args(["convert", "/nonexistent/path/swagger.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_malformed_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ not json").unwrap();

    cmd()
        .args(["convert", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON document"));
}

// ── Help Output ─────────────────────────────────────────────────────────────

#[test]
fn test_help_output() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"));
}

#[test]
fn test_convert_help() {
    cmd()
        .args(["convert", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--markers"))
        .stdout(predicate::str::contains("--tagged"))
        .stdout(predicate::str::contains("--max-depth"));
}
