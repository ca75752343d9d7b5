use check_vsphere::commands::check::{self, CheckOptions};
use check_vsphere::core::CheckKind;
use check_vsphere::error::CheckError;
use std::fs;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "latency_seconds": 1,
    "hosts": [
        {"name": "esx02.lab", "status": "green"},
        {"name": "esx01.lab", "status": "yellow"}
    ],
    "datacenters": [
        {"name": "Lab", "datastores": [
            {"name": "DS1", "capacity": 1073741824000, "free_space": 53687091200}
        ]}
    ]
}"#;

fn write_snapshot(dir: &TempDir) -> String {
    let path = dir.path().join("snapshot.json");
    fs::write(&path, SNAPSHOT).unwrap();
    path.to_string_lossy().into_owned()
}

fn run_cli(args: &[&str]) -> check_vsphere::ui::Outcome {
    let mut argv = vec!["check_vsphere"];
    argv.extend_from_slice(args);
    let matches = check::command().try_get_matches_from(argv).unwrap();
    check::execute(&matches)
}

#[test]
fn test_connect_from_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir);

    let outcome = run_cli(&["-s", &snapshot]);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(
        outcome.text,
        "OK - Connection took 1 seconds |connection_time=1;3;6"
    );
}

#[test]
fn test_general_health_from_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir);

    let outcome = run_cli(&["-s", &snapshot, "-A", "general_health"]);
    assert_eq!(outcome.exit_code(), 2);
    assert_eq!(outcome.text, "CRITICAL - Host: esx01.lab is in state of yellow");
}

#[test]
fn test_datastore_from_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir);

    let outcome = run_cli(&[
        "--snapshot",
        &snapshot,
        "--action",
        "datastore",
        "--warning",
        "100#10",
        "--critical",
        "50#5",
    ]);
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(
        outcome.text,
        "WARNING - DS1 [Lab] has 5.00% disk space free (50.00 GiB)"
    );
}

#[test]
fn test_malformed_threshold_checked_before_source() {
    // The snapshot does not exist; the threshold error must win
    let outcome = run_cli(&[
        "-s",
        "/nonexistent/snapshot.json",
        "-A",
        "datastore",
        "-W",
        "lots#10",
    ]);
    assert_eq!(outcome.exit_code(), 2);
    assert!(outcome.text.starts_with("CRITICAL - Malformed threshold:"));
}

#[test]
fn test_missing_snapshot_is_source_unavailable() {
    let outcome = run_cli(&["-s", "/nonexistent/snapshot.json"]);
    assert_eq!(outcome.exit_code(), 2);
    assert!(outcome
        .text
        .starts_with("CRITICAL - Metric source unavailable:"));
}

#[test]
fn test_snapshot_from_config_file() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir);
    let config_path = dir.path().join("config.json");
    let config = serde_json::json!({ "snapshot": snapshot });
    fs::write(&config_path, config.to_string()).unwrap();

    let outcome = run_cli(&[
        "-c",
        config_path.to_str().unwrap(),
        "-A",
        "general_health",
    ]);
    assert_eq!(outcome.exit_code(), 2);
    assert!(outcome.text.contains("esx01.lab"));
}

#[test]
fn test_broken_config_file_is_critical() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, "{ user: ").unwrap();

    let outcome = run_cli(&["-c", config_path.to_str().unwrap()]);
    assert_eq!(outcome.exit_code(), 2);
    assert!(outcome.text.starts_with("CRITICAL - Configuration error:"));
}

#[test]
fn test_run_reports_threshold_error() {
    let options = CheckOptions {
        kind: CheckKind::Connect,
        warning: Some("soon".to_string()),
        critical: None,
        host: "127.0.0.1".to_string(),
        user: None,
        password: None,
        snapshot: None,
        timeout: std::time::Duration::from_secs(1),
    };
    let err = check::run(&options).unwrap_err();
    assert!(matches!(err, CheckError::MalformedThreshold(_)));
}

#[test]
fn test_fractional_latency_reported_in_whole_seconds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.json");
    fs::write(&path, r#"{"latency_seconds": 2.7}"#).unwrap();

    let outcome = run_cli(&["-s", path.to_str().unwrap()]);
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(
        outcome.text,
        "WARNING - Connection took 3 seconds |connection_time=3;3;6"
    );
}
