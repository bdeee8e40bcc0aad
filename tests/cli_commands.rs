//! CLI Command Tests
//!
//! Runs `translate` and `decode` against request and rows files in a
//! temporary directory, capturing their JSON-lines output.

use std::fs;
use std::path::PathBuf;

use docbridge::cli::{run_command, Command};
use serde_json::{json, Value};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn users_request(dir: &TempDir) -> PathBuf {
    let request = json!({
        "keyspace": "users",
        "columns": [{"path": "name"}, {"path": "age"}],
        "predicates": [{"field": "age", "op": {"gte": 18}}],
        "sort": [{"field": "name"}]
    });
    write_file(dir, "request.json", &request.to_string())
}

fn output_lines(out: &[u8]) -> Vec<Value> {
    String::from_utf8(out.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn decode(request: PathBuf, types: &[&str], rows: PathBuf, skip_bad_rows: bool) -> Command {
    Command::Decode {
        request,
        types: types.iter().map(|t| t.to_string()).collect(),
        rows,
        skip_bad_rows,
    }
}

// =============================================================================
// Translate Tests
// =============================================================================

#[test]
fn test_translate_prints_query_and_columns() {
    let dir = TempDir::new().unwrap();
    let request = users_request(&dir);

    let mut out = Vec::new();
    run_command(Command::Translate { request }, &mut out).unwrap();

    let lines = output_lines(&out);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["status"], "ok");
    assert_eq!(
        lines[0]["data"]["query"],
        "SELECT `name`, `age` FROM `users` WHERE `age` >= 18 ORDER BY `name` ASC"
    );
    assert_eq!(lines[0]["data"]["columns"], json!(["name", "age"]));
}

#[test]
fn test_translate_rejects_bad_request() {
    let dir = TempDir::new().unwrap();
    let request = write_file(&dir, "request.json", r#"{"keyspace": "users", "columns": []}"#);

    let mut out = Vec::new();
    let err = run_command(Command::Translate { request }, &mut out).unwrap_err();
    assert_eq!(err.code_str(), "BRIDGE_TRANSLATION_NO_COLUMNS");
    assert!(out.is_empty());
}

// =============================================================================
// Decode Tests
// =============================================================================

#[test]
fn test_decode_prints_rows_then_summary() {
    let dir = TempDir::new().unwrap();
    let request = users_request(&dir);
    let rows = write_file(
        &dir,
        "rows.jsonl",
        "{\"name\": \"Ana\", \"age\": 30}\n{\"name\": \"Bo\"}\n",
    );

    let mut out = Vec::new();
    run_command(decode(request, &["name:string", "age:integer"], rows, false), &mut out).unwrap();

    let lines = output_lines(&out);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], json!(["Ana", 30]));
    assert_eq!(lines[1], json!(["Bo", null]));
    assert_eq!(
        lines[2],
        json!({"status": "ok", "data": {"columns": ["name", "age"], "rows": 2, "skipped": 0}})
    );
}

#[test]
fn test_decode_aborts_on_bad_row() {
    let dir = TempDir::new().unwrap();
    let request = users_request(&dir);
    let rows = write_file(
        &dir,
        "rows.jsonl",
        "{\"name\": \"Ana\", \"age\": \"old\"}\n{\"name\": \"Bo\", \"age\": 5}\n",
    );

    let mut out = Vec::new();
    let err = run_command(decode(request, &["string", "integer"], rows, false), &mut out)
        .unwrap_err();
    assert_eq!(err.code_str(), "BRIDGE_TYPE_COERCION");
    assert!(err.message().contains("age"));
}

#[test]
fn test_decode_skips_bad_rows_when_asked() {
    let dir = TempDir::new().unwrap();
    let request = users_request(&dir);
    let rows = write_file(
        &dir,
        "rows.jsonl",
        "{\"name\": \"Ana\", \"age\": \"old\"}\n{\"name\": \"Bo\", \"age\": 5}\n",
    );

    let mut out = Vec::new();
    run_command(decode(request, &["string", "integer"], rows, true), &mut out).unwrap();

    let lines = output_lines(&out);
    assert_eq!(lines[0], json!(["Bo", 5]));
    assert_eq!(lines[1]["data"]["rows"], 1);
    assert_eq!(lines[1]["data"]["skipped"], 1);
}

#[test]
fn test_decode_checks_column_names() {
    let dir = TempDir::new().unwrap();
    let request = users_request(&dir);
    let rows = write_file(&dir, "rows.jsonl", "");

    let mut out = Vec::new();
    let err = run_command(decode(request, &["age:string", "name:integer"], rows, false), &mut out)
        .unwrap_err();
    assert_eq!(err.code_str(), "BRIDGE_CLI_INVALID_ARGUMENTS");
}

#[test]
fn test_decode_type_count_mismatch() {
    let dir = TempDir::new().unwrap();
    let request = users_request(&dir);
    let rows = write_file(&dir, "rows.jsonl", "");

    let mut out = Vec::new();
    let err = run_command(decode(request, &["string"], rows, false), &mut out).unwrap_err();
    assert_eq!(err.code_str(), "BRIDGE_COLUMN_COUNT_MISMATCH");
}

#[test]
fn test_decode_non_object_row_is_protocol_fault() {
    let dir = TempDir::new().unwrap();
    let request = users_request(&dir);
    let rows = write_file(&dir, "rows.jsonl", "[1, 2]\n");

    let mut out = Vec::new();
    let err = run_command(decode(request, &["string", "integer"], rows, false), &mut out)
        .unwrap_err();
    assert_eq!(err.code_str(), "BRIDGE_RESOURCE_PROTOCOL");
}
