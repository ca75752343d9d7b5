use super::common::{datastore, StaticSource};
use check_vsphere::commands::check::run_with_source;
use check_vsphere::core::{CheckKind, Severity, ThresholdSpec};
use check_vsphere::ui::Outcome;

fn run(kind: CheckKind, warning: Option<&str>, critical: Option<&str>, source: &mut StaticSource) -> Outcome {
    let spec = ThresholdSpec::parse(kind, warning, critical).unwrap();
    match run_with_source(kind, &spec, source) {
        Ok(outcome) => outcome,
        Err(err) => Outcome::from_error(&err),
    }
}

#[test]
fn test_connect_latency_warning() {
    let mut source = StaticSource::with_latency(4.0);
    let outcome = run(CheckKind::Connect, Some("3"), Some("6"), &mut source);

    assert_eq!(outcome.severity, Severity::Warning);
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(
        outcome.text,
        "WARNING - Connection took 4 seconds |connection_time=4;3;6"
    );
}

#[test]
fn test_connect_defaults_apply() {
    let mut source = StaticSource::with_latency(6.0);
    let outcome = run(CheckKind::Connect, None, None, &mut source);

    assert_eq!(outcome.exit_code(), 2);
    assert!(outcome.text.ends_with("|connection_time=6;3;6"));
}

#[test]
fn test_datastore_warning_not_critical() {
    let mut source = StaticSource::with_datastores(vec![datastore("DS1", "DC1", 1000, 50)]);
    let outcome = run(CheckKind::Datastore, Some("100#10"), Some("50#5"), &mut source);

    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(
        outcome.text,
        "WARNING - DS1 [DC1] has 5.00% disk space free (50.00 GiB)"
    );
}

#[test]
fn test_hosts_red_is_critical() {
    let mut source = StaticSource::with_hosts(&[("esx01", "green"), ("esx02", "red")]);
    let outcome = run(CheckKind::GeneralHealth, None, None, &mut source);

    assert_eq!(outcome.exit_code(), 2);
    assert_eq!(outcome.text, "CRITICAL - Host: esx02 is in state of red");
    assert!(!outcome.text.contains("esx01"));
}

#[test]
fn test_no_datastores_is_unknown() {
    let mut source = StaticSource::with_datastores(Vec::new());
    let outcome = run(CheckKind::Datastore, None, None, &mut source);

    assert_eq!(outcome.severity, Severity::Unknown);
    assert_eq!(outcome.exit_code(), 3);
    assert_eq!(outcome.text, "UNKNOWN - No datastores found");
}

#[test]
fn test_no_hosts_is_unknown() {
    let mut source = StaticSource::with_hosts(&[]);
    let outcome = run(CheckKind::GeneralHealth, None, None, &mut source);

    assert_eq!(outcome.exit_code(), 3);
    assert_eq!(outcome.text, "UNKNOWN - No hosts found");
}

#[test]
fn test_source_failure_is_critical() {
    let mut source = StaticSource::failing();
    let outcome = run(CheckKind::GeneralHealth, None, None, &mut source);

    assert_eq!(outcome.exit_code(), 2);
    assert_eq!(
        outcome.text,
        "CRITICAL - Metric source unavailable: Connection to vSphere failed"
    );
    // No retries in the check itself
    assert_eq!(source.calls.get(), 1);
}

#[test]
fn test_host_status_table() {
    let cases = [
        ("green", 0),
        ("gray", 1),
        ("yellow", 2),
        ("red", 2),
        ("purple", 2),
    ];
    for (status, exit_code) in cases {
        let mut source = StaticSource::with_hosts(&[("esx01", status)]);
        let outcome = run(CheckKind::GeneralHealth, None, None, &mut source);
        assert_eq!(outcome.exit_code(), exit_code, "status {}", status);
    }
}
