//! CLI Integration Tests
//!
//! These tests verify that the prefixdb binary works correctly
//! end-to-end: dataset loading, lookup exit codes, positional batch
//! rendering and the reload command.
//!
//! Run with:
//! ```bash
//! cargo test --test cli_integration
//! ```

use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

const SAMPLE_DATASET: &str = r#"{
    "AWS": [
        { "prefixes": ["192.168.1.0/24", "10.0.0.0/8"], "tags": ["Cloud"] }
    ],
    "IPv6Provider": [
        { "prefixes": ["2001:db8::/32"], "tags": ["IPv6"] }
    ]
}"#;

/// Get the path to the built binary
fn prefixdb_binary() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("target");
    path.push("debug");
    path.push("prefixdb");
    path
}

/// Run prefixdb and return (stdout, stderr, exit code)
fn run_prefixdb(args: &[&str], dataset: &str) -> (String, String, Option<i32>) {
    let output = Command::new(prefixdb_binary())
        .args(["-d", dataset, "-f", "json"])
        .args(args)
        .output()
        .expect("Failed to execute prefixdb");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code(),
    )
}

/// Write the sample dataset into a tempdir and return (dir, path string)
fn sample_dataset_file() -> (tempfile::TempDir, String) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefixes.json");
    std::fs::write(&path, SAMPLE_DATASET).unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

// ============================================================================
// Single lookup
// ============================================================================

#[test]
fn test_cli_lookup_found() {
    let (_dir, dataset) = sample_dataset_file();
    let (stdout, _stderr, code) = run_prefixdb(&["lookup", "192.168.1.5"], &dataset);

    assert_eq!(code, Some(0));
    assert!(stdout.contains("\"status\":\"ok\""), "got: {}", stdout);
    assert!(stdout.contains("192.168.1.0/24"));
    assert!(stdout.contains("AWS"));
    assert!(stdout.contains("Cloud"));
}

#[test]
fn test_cli_lookup_not_found_exits_1() {
    let (_dir, dataset) = sample_dataset_file();
    let (stdout, _stderr, code) = run_prefixdb(&["lookup", "8.8.8.8"], &dataset);

    assert_eq!(code, Some(1));
    assert!(stdout.contains("IP not found in any subnet"), "got: {}", stdout);
}

#[test]
fn test_cli_lookup_invalid_address_exits_2() {
    let (_dir, dataset) = sample_dataset_file();
    let (stdout, _stderr, code) = run_prefixdb(&["lookup", "999.999.999.999"], &dataset);

    assert_eq!(code, Some(2));
    assert!(stdout.contains("Invalid IP address"), "got: {}", stdout);
}

#[test]
fn test_cli_lookup_ipv6() {
    let (_dir, dataset) = sample_dataset_file();
    let (stdout, _stderr, code) = run_prefixdb(&["lookup", "2001:db8::ff00:42"], &dataset);

    assert_eq!(code, Some(0));
    assert!(stdout.contains("2001:db8::/32"));
    assert!(stdout.contains("IPv6Provider"));
}

// ============================================================================
// Batch lookup
// ============================================================================

#[test]
fn test_cli_batch_is_positional() {
    let (_dir, dataset) = sample_dataset_file();
    let (stdout, _stderr, code) =
        run_prefixdb(&["batch", "192.168.1.5", "8.8.8.8"], &dataset);

    assert_eq!(code, Some(0));
    let doc: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    let results = doc["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0][0]["subnet"], "192.168.1.0/24");
    assert!(results[1].is_null());
}

#[test]
fn test_cli_batch_all_misses_exits_1() {
    let (_dir, dataset) = sample_dataset_file();
    let (stdout, _stderr, code) = run_prefixdb(&["batch", "8.8.8.8", "1.2.3.4"], &dataset);

    assert_eq!(code, Some(1));
    assert!(stdout.contains("No IPs found in any subnet"), "got: {}", stdout);
}

#[test]
fn test_cli_batch_rejects_one_bad_address() {
    let (_dir, dataset) = sample_dataset_file();
    let (stdout, _stderr, code) =
        run_prefixdb(&["batch", "192.168.1.5", "invalid-ip"], &dataset);

    assert_eq!(code, Some(2));
    assert!(stdout.contains("Invalid IP address"), "got: {}", stdout);
}

#[test]
fn test_cli_batch_requires_at_least_one_address() {
    let (_dir, dataset) = sample_dataset_file();
    let (_stdout, _stderr, code) = run_prefixdb(&["batch"], &dataset);

    assert_ne!(code, Some(0));
}

// ============================================================================
// Reload and stats
// ============================================================================

#[test]
fn test_cli_reload_reports_counts() {
    let (_dir, dataset) = sample_dataset_file();
    let (stdout, _stderr, code) = run_prefixdb(&["reload"], &dataset);

    assert_eq!(code, Some(0));
    let doc: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(doc["status"], "ok");
    assert_eq!(doc["message"], "index reloaded");
    assert_eq!(doc["inserted"], 3);
    assert!(doc["nodes"].as_u64().unwrap() > 1);
}

#[test]
fn test_cli_stats() {
    let (_dir, dataset) = sample_dataset_file();
    let (stdout, _stderr, code) = run_prefixdb(&["stats"], &dataset);

    assert_eq!(code, Some(0));
    let doc: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert!(doc["nodes"].as_u64().unwrap() > 1);
    assert_eq!(doc["workers"], 10);
}

// ============================================================================
// Dataset failures
// ============================================================================

#[test]
fn test_cli_missing_dataset_fails_without_panic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let (_stdout, stderr, code) =
        run_prefixdb(&["lookup", "192.168.1.5"], path.to_str().unwrap());

    assert_ne!(code, Some(0));
    assert!(!stderr.contains("panicked"), "stderr: {}", stderr);
}

#[test]
fn test_cli_malformed_dataset_fails_without_panic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();
    let (_stdout, stderr, code) =
        run_prefixdb(&["lookup", "192.168.1.5"], path.to_str().unwrap());

    assert_ne!(code, Some(0));
    assert!(!stderr.contains("panicked"), "stderr: {}", stderr);
}

#[test]
fn test_cli_bad_subnet_in_dataset_fails_without_panic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad_subnet.json");
    std::fs::write(
        &path,
        r#"{"Broken": [{ "prefixes": ["999.0.0.0/8"], "tags": [] }]}"#,
    )
    .unwrap();
    let (_stdout, stderr, code) =
        run_prefixdb(&["stats"], path.to_str().unwrap());

    assert_ne!(code, Some(0));
    assert!(stderr.contains("Invalid subnet"), "stderr: {}", stderr);
}
