//! Renders an [`AggregateReport`] as plugin output.

use crate::core::aggregator::{AggregateReport, EvaluationResult};
use crate::core::metric::MetricValue;
use crate::core::severity::{Rollup, Severity};
use crate::core::threshold::{CheckKind, ThresholdSpec};
use crate::error::CheckError;
use crate::ui::perfdata::{self, PerfData};

/// What the plugin prints and how it exits
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub severity: Severity,
    pub text: String,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }

    /// A fatal error is always a single line
    pub fn from_error(err: &CheckError) -> Self {
        let severity = err.severity();
        Self {
            severity,
            text: format!("{} - {}", severity.label(), err),
        }
    }
}

pub fn render(kind: CheckKind, report: &AggregateReport, spec: &ThresholdSpec) -> Outcome {
    let severity = report.overall_severity;

    let mut lines: Vec<String> = match severity {
        Severity::Critical => report
            .critical()
            .chain(report.warning())
            .map(status_line)
            .collect(),
        Severity::Warning => report.warning().map(status_line).collect(),
        Severity::Ok => vec![format!("OK - {}", all_clear(kind, report))],
        Severity::Unknown => vec![format!("UNKNOWN - {}", no_data(kind))],
    };

    let tag = perfdata::render(&perf_entries(report, spec));
    if let Some(first) = lines.first_mut() {
        first.push_str(&tag);
    }

    Outcome {
        severity,
        text: lines.join("\n"),
    }
}

fn status_line(item: &EvaluationResult) -> String {
    format!("{} - {}", item.severity.label(), item.message)
}

fn all_clear(kind: CheckKind, report: &AggregateReport) -> String {
    match kind {
        CheckKind::Connect => report
            .items
            .first()
            .map(|item| item.message.clone())
            .unwrap_or_else(|| "Connection OK".to_string()),
        CheckKind::GeneralHealth => "All hosts are green".to_string(),
        CheckKind::Datastore => "All datastores OK".to_string(),
    }
}

pub fn no_data(kind: CheckKind) -> &'static str {
    match kind {
        CheckKind::Connect => "No connection data found",
        CheckKind::GeneralHealth => "No hosts found",
        CheckKind::Datastore => "No datastores found",
    }
}

/// Only numeric checks carry performance data, one entry per metric
fn perf_entries(report: &AggregateReport, spec: &ThresholdSpec) -> Vec<PerfData> {
    let Some((warning, critical)) = spec.numeric_levels() else {
        return Vec::new();
    };

    report
        .items
        .iter()
        .filter_map(|item| match item.metric.value {
            MetricValue::Number(value) => Some(
                PerfData::new(&item.metric.resource_name, value).with_levels(warning, critical),
            ),
            _ => None,
        })
        .collect()
}
