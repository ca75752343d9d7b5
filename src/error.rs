use thiserror::Error;

use crate::core::severity::Severity;

/// Custom error type for check_vsphere
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    #[error("Malformed threshold: {0}")]
    MalformedThreshold(String),

    #[error("Metric source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    #[error("{0}")]
    NoDataFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for check_vsphere
pub type Result<T> = std::result::Result<T, CheckError>;

impl CheckError {
    /// Create a malformed threshold error
    pub fn malformed_threshold<S: Into<String>>(msg: S) -> Self {
        CheckError::MalformedThreshold(msg.into())
    }

    /// Create a source unavailable error
    pub fn source_unavailable<S: Into<String>>(msg: S) -> Self {
        CheckError::SourceUnavailable(msg.into())
    }

    pub fn invalid_metric<S: Into<String>>(msg: S) -> Self {
        CheckError::InvalidMetric(msg.into())
    }

    pub fn no_data<S: Into<String>>(msg: S) -> Self {
        CheckError::NoDataFound(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        CheckError::Config(msg.into())
    }

    /// Severity reported when this error ends the run.
    ///
    /// Only an empty data set is UNKNOWN, everything else fails the check.
    pub fn severity(&self) -> Severity {
        match self {
            CheckError::NoDataFound(_) => Severity::Unknown,
            _ => Severity::Critical,
        }
    }
}
