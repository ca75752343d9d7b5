//! Threshold parsing.
//!
//! Every check builds its own [`ThresholdSpec`] from the raw `--warning` and
//! `--critical` strings. Empty input falls back to per-check defaults.

use crate::core::metric::HostStatus;
use crate::core::severity::Severity;
use crate::error::{CheckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CONNECT_WARNING_SECS: f64 = 3.0;
pub const DEFAULT_CONNECT_CRITICAL_SECS: f64 = 6.0;
pub const DEFAULT_FREE_WARNING_GIB: f64 = 100.0;
pub const DEFAULT_FREE_CRITICAL_GIB: f64 = 50.0;
pub const DEFAULT_FREE_PERCENT: f64 = 100.0;

/// Check selected with `--action`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckKind {
    Connect,
    GeneralHealth,
    Datastore,
}

impl CheckKind {
    pub const ALL: [&'static str; 3] = ["connect", "general_health", "datastore"];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckKind::Connect => "connect",
            CheckKind::GeneralHealth => "general_health",
            CheckKind::Datastore => "datastore",
        }
    }
}

impl FromStr for CheckKind {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "connect" => Ok(CheckKind::Connect),
            "general_health" => Ok(CheckKind::GeneralHealth),
            "datastore" => Ok(CheckKind::Datastore),
            other => Err(CheckError::config(format!("unknown action '{}'", other))),
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical table over the host status alphabet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSet {
    pub critical_set: BTreeSet<HostStatus>,
    pub warning_set: BTreeSet<HostStatus>,
    pub ok_set: BTreeSet<HostStatus>,
}

impl CategoricalSet {
    /// Only green is healthy; gray means vSphere does not know.
    pub fn host_status() -> Self {
        Self {
            critical_set: [HostStatus::Red, HostStatus::Yellow].into_iter().collect(),
            warning_set: [HostStatus::Gray].into_iter().collect(),
            ok_set: [HostStatus::Green].into_iter().collect(),
        }
    }

    /// Statuses outside every set fail the check.
    pub fn classify(&self, status: &HostStatus) -> Severity {
        match status {
            s if self.ok_set.contains(s) => Severity::Ok,
            s if self.warning_set.contains(s) => Severity::Warning,
            s if self.critical_set.contains(s) => Severity::Critical,
            other => {
                log::debug!("unexpected host status '{}'", other);
                Severity::Critical
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ThresholdSpec {
    Numeric {
        warning: f64,
        critical: f64,
    },
    Compound {
        warning_abs: f64,
        warning_pct: f64,
        critical_abs: f64,
        critical_pct: f64,
    },
    Categorical(CategoricalSet),
}

impl ThresholdSpec {
    /// Build the threshold for `kind` from optional raw user input.
    pub fn parse(kind: CheckKind, warning: Option<&str>, critical: Option<&str>) -> Result<Self> {
        let spec = match kind {
            CheckKind::Connect => ThresholdSpec::Numeric {
                warning: parse_number(warning, "warning")?
                    .unwrap_or(DEFAULT_CONNECT_WARNING_SECS),
                critical: parse_number(critical, "critical")?
                    .unwrap_or(DEFAULT_CONNECT_CRITICAL_SECS),
            },
            CheckKind::GeneralHealth => {
                if warning.is_some() || critical.is_some() {
                    log::debug!("general_health ignores numeric thresholds");
                }
                ThresholdSpec::Categorical(CategoricalSet::host_status())
            }
            CheckKind::Datastore => {
                let (warning_abs, warning_pct) =
                    parse_compound(warning, "warning", DEFAULT_FREE_WARNING_GIB)?;
                let (critical_abs, critical_pct) =
                    parse_compound(critical, "critical", DEFAULT_FREE_CRITICAL_GIB)?;
                ThresholdSpec::Compound {
                    warning_abs,
                    warning_pct,
                    critical_abs,
                    critical_pct,
                }
            }
        };

        log::debug!("{} thresholds: {:?}", kind, spec);
        Ok(spec)
    }

    /// Warning/critical pair for performance data; `None` for non-numeric forms
    pub fn numeric_levels(&self) -> Option<(f64, f64)> {
        match self {
            ThresholdSpec::Numeric { warning, critical } => Some((*warning, *critical)),
            _ => None,
        }
    }
}

fn parse_number(raw: Option<&str>, level: &str) -> Result<Option<f64>> {
    parse_part(raw.unwrap_or(""), level)
}

/// `absolute#percent`, either side may be empty
fn parse_compound(raw: Option<&str>, level: &str, default_abs: f64) -> Result<(f64, f64)> {
    let raw = raw.unwrap_or("");
    let parts: Vec<&str> = raw.split('#').collect();
    if parts.len() > 2 {
        return Err(CheckError::malformed_threshold(format!(
            "{} threshold '{}' has more than one '#'",
            level, raw
        )));
    }

    let abs = parse_part(parts[0], level)?.unwrap_or(default_abs);
    let pct = match parts.get(1) {
        Some(part) => parse_part(part, level)?.unwrap_or(DEFAULT_FREE_PERCENT),
        None => DEFAULT_FREE_PERCENT,
    };

    if abs < 0.0 || pct < 0.0 {
        return Err(CheckError::malformed_threshold(format!(
            "{} threshold '{}' must not be negative",
            level, raw
        )));
    }

    Ok((abs, pct))
}

fn parse_part(part: &str, level: &str) -> Result<Option<f64>> {
    let part = part.trim();
    if part.is_empty() {
        return Ok(None);
    }

    let value: f64 = part.parse().map_err(|_| {
        CheckError::malformed_threshold(format!("{} threshold '{}' is not a number", level, part))
    })?;

    if !value.is_finite() {
        return Err(CheckError::malformed_threshold(format!(
            "{} threshold '{}' is not finite",
            level, part
        )));
    }

    Ok(Some(value))
}
