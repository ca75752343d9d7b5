//! Roll-up of per-resource verdicts into one run verdict.
//!
//! Every metric is evaluated on its own; a bad reading for one datastore
//! never stops its siblings from being checked.

use crate::core::evaluator::{self, Verdict};
use crate::core::metric::Metric;
use crate::core::severity::{Rollup, Severity};
use crate::core::threshold::ThresholdSpec;
use crate::error::CheckError;

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub severity: Severity,
    pub message: String,
    pub metric: Metric,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    /// Sorted by group name, resource name, then resource id
    pub items: Vec<EvaluationResult>,
    pub overall_severity: Severity,
}

impl AggregateReport {
    /// Evaluate every metric against `spec` and roll the results up.
    pub fn build(metrics: Vec<Metric>, spec: &ThresholdSpec) -> Self {
        let mut items: Vec<EvaluationResult> = metrics
            .into_iter()
            .map(|metric| evaluate_isolated(metric, spec))
            .collect();

        items.sort_by(|a, b| {
            a.metric
                .group_name
                .cmp(&b.metric.group_name)
                .then_with(|| a.metric.resource_name.cmp(&b.metric.resource_name))
                .then_with(|| a.metric.resource_id.cmp(&b.metric.resource_id))
        });

        let overall_severity = items
            .iter()
            .map(|item| item.severity)
            .fold(Severity::Unknown, Rollup::worst);

        log::debug!(
            "aggregated {} items, overall {}",
            items.len(),
            overall_severity.label()
        );

        Self {
            items,
            overall_severity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn critical(&self) -> impl Iterator<Item = &EvaluationResult> {
        self.with_severity(Severity::Critical)
    }

    /// Items in warning but not critical
    pub fn warning(&self) -> impl Iterator<Item = &EvaluationResult> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &EvaluationResult> {
        self.items
            .iter()
            .filter(move |item| item.severity == severity)
    }
}

fn evaluate_isolated(metric: Metric, spec: &ThresholdSpec) -> EvaluationResult {
    let Verdict { severity, message } = match evaluator::evaluate(&metric, spec) {
        Ok(verdict) => verdict,
        Err(err @ CheckError::InvalidMetric(_)) => {
            log::warn!("{}", err);
            Verdict {
                severity: Severity::Critical,
                message: err.to_string(),
            }
        }
        Err(err) => Verdict {
            severity: err.severity(),
            message: err.to_string(),
        },
    };

    log::debug!("{} -> {}: {}", metric.resource_id, severity.label(), message);

    EvaluationResult {
        severity,
        message,
        metric,
    }
}
