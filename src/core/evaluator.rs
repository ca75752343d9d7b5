//! Per-metric severity evaluation.
//!
//! Pure functions: one metric and one threshold in, one verdict out.

use crate::core::metric::{HostStatus, Metric, MetricValue, Unit, BYTES_PER_GIB};
use crate::core::severity::Severity;
use crate::core::threshold::{CategoricalSet, ThresholdSpec};
use crate::error::{CheckError, Result};

/// Severity plus the human readable detail for one metric
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub severity: Severity,
    pub message: String,
}

impl Verdict {
    fn new(severity: Severity, message: String) -> Self {
        Self { severity, message }
    }
}

pub fn evaluate(metric: &Metric, spec: &ThresholdSpec) -> Result<Verdict> {
    match (&metric.value, spec) {
        (MetricValue::Number(value), ThresholdSpec::Numeric { warning, critical }) => {
            Ok(evaluate_numeric(metric, *value, *warning, *critical))
        }
        (MetricValue::Status(status), ThresholdSpec::Categorical(table)) => {
            Ok(evaluate_status(metric, status, table))
        }
        (
            MetricValue::Capacity {
                free_bytes,
                capacity_bytes,
            },
            ThresholdSpec::Compound {
                warning_abs,
                warning_pct,
                critical_abs,
                critical_pct,
            },
        ) => {
            let usage = FreeSpace::new(metric, *free_bytes, *capacity_bytes)?;
            let message = usage.describe(metric);

            // Both axes have to fail before a level fires.
            let critical = usage.gib < *critical_abs && usage.percent < *critical_pct;
            let warning = usage.gib < *warning_abs && usage.percent < *warning_pct;

            let severity = if critical {
                Severity::Critical
            } else if warning {
                Severity::Warning
            } else {
                Severity::Ok
            };
            Ok(Verdict::new(severity, message))
        }
        (value, spec) => Err(CheckError::invalid_metric(format!(
            "{} has value {:?} that cannot be checked against {:?}",
            metric.resource_name, value, spec
        ))),
    }
}

fn evaluate_numeric(metric: &Metric, value: f64, warning: f64, critical: f64) -> Verdict {
    let message = match metric.unit {
        Unit::Seconds => format!("Connection took {} seconds", value),
        _ => format!("{} is {}", metric.resource_name, value),
    };

    let severity = if value >= critical {
        Severity::Critical
    } else if value >= warning {
        Severity::Warning
    } else {
        Severity::Ok
    };
    Verdict::new(severity, message)
}

fn evaluate_status(metric: &Metric, status: &HostStatus, table: &CategoricalSet) -> Verdict {
    let severity = table.classify(status);
    let message = match (severity, status) {
        (Severity::Ok, _) => format!("Host: {} is {}", metric.resource_name, status),
        (Severity::Warning, HostStatus::Gray) => {
            format!("Host: {} is in unknown state (gray)", metric.resource_name)
        }
        _ => format!("Host: {} is in state of {}", metric.resource_name, status),
    };
    Verdict::new(severity, message)
}

struct FreeSpace {
    percent: f64,
    gib: f64,
}

impl FreeSpace {
    fn new(metric: &Metric, free_bytes: u64, capacity_bytes: u64) -> Result<Self> {
        if capacity_bytes == 0 {
            return Err(CheckError::invalid_metric(format!(
                "{} [{}] reports zero capacity",
                metric.resource_name, metric.group_name
            )));
        }
        if free_bytes > capacity_bytes {
            return Err(CheckError::invalid_metric(format!(
                "{} [{}] reports more free space ({} bytes) than capacity ({} bytes)",
                metric.resource_name, metric.group_name, free_bytes, capacity_bytes
            )));
        }

        Ok(Self {
            percent: free_bytes as f64 / capacity_bytes as f64 * 100.0,
            gib: free_bytes as f64 / BYTES_PER_GIB,
        })
    }

    fn describe(&self, metric: &Metric) -> String {
        format!(
            "{} [{}] has {:.2}% disk space free ({:.2} GiB)",
            metric.resource_name, metric.group_name, self.percent, self.gib
        )
    }
}
