//! End-to-end tests for the patch engine, driving it the way the CLI and
//! an automation agent would: JSON requests in, structured outcomes out.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use linepatch::{PatchEngine, PatchRequest};

const FIVE_LINES: &str = "line 1\nline 2\nline 3\nline 4\nline 5";

fn workspace_with_file(content: &str) -> (PatchEngine, TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.txt");
    fs::write(&path, content).unwrap();
    let engine = PatchEngine::new(temp_dir.path()).unwrap();
    (engine, temp_dir, path)
}

#[test]
fn test_single_line_replace_scenario() {
    let (engine, _dir, path) = workspace_with_file(FIVE_LINES);
    let request = PatchRequest::from_json(
        r#"{
            "command": "replace",
            "path": "test.txt",
            "create_backup": false,
            "replacements": [
                { "old_text": "line 2", "new_text": "modified line 2",
                  "start_line": 2, "end_line": 2 }
            ]
        }"#,
    )
    .unwrap();

    let report = engine.apply(&request).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "line 1\nmodified line 2\nline 3\nline 4\nline 5"
    );
    assert_eq!(
        report.outcome.operations_log,
        vec!["Replaced 1 lines (2-2) with 1 lines"]
    );
}

#[test]
fn test_multi_line_replace_keeps_line_count() {
    let (engine, _dir, path) = workspace_with_file(FIVE_LINES);
    let request = PatchRequest::from_json(
        r#"{
            "command": "replace",
            "path": "test.txt",
            "create_backup": false,
            "replacements": [
                { "old_text": "line 2\nline 3", "new_text": "new line 2\nnew line 3",
                  "start_line": 2, "end_line": 3 }
            ]
        }"#,
    )
    .unwrap();

    let report = engine.apply(&request).unwrap();

    assert_eq!(report.outcome.original_line_count, 5);
    assert_eq!(report.outcome.modified_line_count, 5);
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.split('\n').nth(1).unwrap(), "new line 2");
    assert_eq!(content.split('\n').nth(2).unwrap(), "new line 3");
}

#[test]
fn test_insert_after_line_scenario() {
    let (engine, _dir, path) = workspace_with_file(FIVE_LINES);
    let request = PatchRequest::from_json(
        r#"{
            "command": "insert",
            "path": "test.txt",
            "create_backup": false,
            "insertions": [ { "after_line": 2, "text": "inserted line" } ]
        }"#,
    )
    .unwrap();

    let report = engine.apply(&request).unwrap();

    assert_eq!(report.outcome.modified_line_count, 6);
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.split('\n').nth(2).unwrap(), "inserted line");
}

#[test]
fn test_content_mismatch_names_expected_and_found() {
    let (engine, _dir, path) = workspace_with_file(FIVE_LINES);
    let request = PatchRequest::from_json(
        r#"{
            "command": "replace",
            "path": "test.txt",
            "replacements": [
                { "old_text": "wrong content", "new_text": "x",
                  "start_line": 2, "end_line": 2 }
            ]
        }"#,
    )
    .unwrap();

    let err = engine.apply(&request).unwrap_err().to_string();

    assert!(err.contains("wrong content"), "got: {}", err);
    assert!(err.contains("line 2"), "got: {}", err);
    // Rejected request leaves the file untouched.
    assert_eq!(fs::read_to_string(&path).unwrap(), FIVE_LINES);
}

#[test]
fn test_out_of_range_names_actual_line_count() {
    let (engine, _dir, _path) = workspace_with_file(FIVE_LINES);
    let request = PatchRequest::from_json(
        r#"{
            "command": "replace",
            "path": "test.txt",
            "replacements": [
                { "old_text": "x", "new_text": "y", "start_line": 10, "end_line": 15 }
            ]
        }"#,
    )
    .unwrap();

    let err = engine.apply(&request).unwrap_err().to_string();
    assert!(err.contains("10-15"), "got: {}", err);
    assert!(err.contains("5 lines"), "got: {}", err);
}

#[test]
fn test_dry_run_previews_without_writing() {
    let (engine, _dir, path) = workspace_with_file(FIVE_LINES);
    let request = PatchRequest::from_json(
        r#"{
            "command": "replace",
            "path": "test.txt",
            "dry_run": true,
            "replacements": [
                { "old_text": "line 2", "new_text": "modified line 2",
                  "start_line": 2, "end_line": 2 }
            ]
        }"#,
    )
    .unwrap();

    let report = engine.apply(&request).unwrap();

    assert!(report.outcome.dry_run);
    assert!(!report.outcome.backup_created);
    assert_eq!(report.outcome.modified_line_count, 5);
    assert!(report.modified_text.contains("modified line 2"));
    assert_eq!(fs::read_to_string(&path).unwrap(), FIVE_LINES);
}

#[test]
fn test_backup_bytes_equal_pre_write_content() {
    let (engine, _dir, path) = workspace_with_file("a\nb\nc\n");
    let request = PatchRequest::from_json(
        r#"{
            "command": "replace",
            "path": "test.txt",
            "replacements": [
                { "old_text": "b", "new_text": "B", "start_line": 2, "end_line": 2 }
            ]
        }"#,
    )
    .unwrap();

    let report = engine.apply(&request).unwrap();

    let backup_path = report.outcome.backup_path.expect("backup path");
    assert_eq!(fs::read_to_string(&backup_path).unwrap(), "a\nb\nc\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), "a\nB\nc\n");
    let name = backup_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("test.txt.backup."), "got: {}", name);
}

#[test]
fn test_path_escape_rejected() {
    let (engine, _dir, _path) = workspace_with_file(FIVE_LINES);
    let request = PatchRequest::from_json(
        r#"{
            "command": "replace",
            "path": "../../etc/passwd",
            "replacements": [
                { "old_text": "x", "new_text": "y", "start_line": 1, "end_line": 1 }
            ]
        }"#,
    )
    .unwrap();

    assert!(engine.apply(&request).is_err());
}

#[test]
fn test_multiple_disjoint_replacements_in_one_request() {
    let (engine, _dir, path) = workspace_with_file(FIVE_LINES);
    let request = PatchRequest::from_json(
        r#"{
            "command": "replace",
            "path": "test.txt",
            "create_backup": false,
            "replacements": [
                { "old_text": "line 4", "new_text": "four", "start_line": 4, "end_line": 4 },
                { "old_text": "line 1", "new_text": "one\nand a half", "start_line": 1, "end_line": 1 }
            ]
        }"#,
    )
    .unwrap();

    let report = engine.apply(&request).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "one\nand a half\nline 2\nline 3\nfour\nline 5"
    );
    // Log in file order, one entry per operation.
    assert_eq!(report.outcome.operations_log.len(), 2);
    assert_eq!(
        report.outcome.operations_log[0],
        "Replaced 1 lines (1-1) with 2 lines"
    );
}

#[test]
fn test_overlapping_replacements_rejected_atomically() {
    let (engine, _dir, path) = workspace_with_file(FIVE_LINES);
    let request = PatchRequest::from_json(
        r#"{
            "command": "replace",
            "path": "test.txt",
            "replacements": [
                { "old_text": "line 2\nline 3", "new_text": "x", "start_line": 2, "end_line": 3 },
                { "old_text": "line 3\nline 4", "new_text": "y", "start_line": 3, "end_line": 4 }
            ]
        }"#,
    )
    .unwrap();

    let err = engine.apply(&request).unwrap_err().to_string();
    assert!(err.contains("Overlapping"), "got: {}", err);
    assert_eq!(fs::read_to_string(&path).unwrap(), FIVE_LINES);
}

#[test]
fn test_multiple_insertions_anchor_on_original_numbering() {
    let (engine, _dir, path) = workspace_with_file("a\nb\nc");
    let request = PatchRequest::from_json(
        r#"{
            "command": "insert",
            "path": "test.txt",
            "create_backup": false,
            "insertions": [
                { "after_line": 0, "text": "start" },
                { "after_line": 3, "text": "end" }
            ]
        }"#,
    )
    .unwrap();

    engine.apply(&request).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "start\na\nb\nc\nend");
}

#[test]
fn test_outcome_json_shape() {
    let (engine, _dir, _path) = workspace_with_file(FIVE_LINES);
    let request = PatchRequest::from_json(
        r#"{
            "command": "insert",
            "path": "test.txt",
            "dry_run": true,
            "insertions": [ { "after_line": 5, "text": "tail" } ]
        }"#,
    )
    .unwrap();

    let report = engine.apply(&request).unwrap();
    let json = report.outcome.to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["command"], "insert");
    assert_eq!(value["path"], "test.txt");
    assert_eq!(value["original_line_count"], 5);
    assert_eq!(value["modified_line_count"], 6);
    assert_eq!(value["dry_run"], true);
    assert_eq!(value["backup_created"], false);
    assert!(value["backup_path"].is_null());
    assert!(value["operations_log"].is_array());
}

#[test]
fn test_repeat_application_is_rejected_not_reapplied() {
    let (engine, _dir, path) = workspace_with_file(FIVE_LINES);
    let request = PatchRequest::from_json(
        r#"{
            "command": "replace",
            "path": "test.txt",
            "create_backup": false,
            "replacements": [
                { "old_text": "line 3", "new_text": "three", "start_line": 3, "end_line": 3 }
            ]
        }"#,
    )
    .unwrap();

    engine.apply(&request).unwrap();
    let after_first = fs::read_to_string(&path).unwrap();

    let err = engine.apply(&request).unwrap_err().to_string();
    assert!(err.contains("Content mismatch"), "got: {}", err);
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
}

#[test]
fn test_engines_with_different_roots_are_independent() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    fs::write(dir_a.path().join("f.txt"), "a").unwrap();
    fs::write(dir_b.path().join("f.txt"), "b").unwrap();

    let engine_a = PatchEngine::new(dir_a.path()).unwrap();
    let engine_b = PatchEngine::new(dir_b.path()).unwrap();

    let request = PatchRequest::from_json(
        r#"{
            "command": "replace",
            "path": "f.txt",
            "create_backup": false,
            "replacements": [
                { "old_text": "a", "new_text": "A", "start_line": 1, "end_line": 1 }
            ]
        }"#,
    )
    .unwrap();

    assert!(engine_a.apply(&request).is_ok());
    // Same request against the other root fails its content check.
    assert!(engine_b.apply(&request).is_err());
    assert_eq!(fs::read_to_string(dir_b.path().join("f.txt")).unwrap(), "b");
}
