// Core business logic module

pub mod aggregator;
pub mod config;
pub mod evaluator;
pub mod metric;
pub mod severity;
pub mod threshold;

// Re-export commonly used items
pub use aggregator::{AggregateReport, EvaluationResult};
pub use config::Config;
pub use evaluator::{evaluate, Verdict};
pub use metric::{HostStatus, Metric, MetricValue, Unit};
pub use severity::{Rollup, Severity};
pub use threshold::{CategoricalSet, CheckKind, ThresholdSpec};
