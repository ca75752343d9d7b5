use serde::{Deserialize, Serialize};
use std::fmt;

pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// A single polled value, created fresh on each run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub resource_id: String,
    pub resource_name: String,
    pub group_name: String, // datacenter for datastores, empty otherwise
    pub value: MetricValue,
    pub unit: Unit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    Number(f64),
    Status(HostStatus),
    Capacity { free_bytes: u64, capacity_bytes: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Seconds,
    Bytes,
    Status,
}

impl Metric {
    pub fn latency(seconds: f64) -> Self {
        Self {
            resource_id: "connection".to_string(),
            resource_name: "connection_time".to_string(),
            group_name: String::new(),
            value: MetricValue::Number(seconds),
            unit: Unit::Seconds,
        }
    }

    pub fn host_status(name: &str, status: &str) -> Self {
        Self {
            resource_id: name.to_string(),
            resource_name: name.to_string(),
            group_name: String::new(),
            value: MetricValue::Status(HostStatus::parse(status)),
            unit: Unit::Status,
        }
    }

    pub fn datastore(
        id: &str,
        name: &str,
        datacenter: &str,
        capacity_bytes: u64,
        free_bytes: u64,
    ) -> Self {
        Self {
            resource_id: id.to_string(),
            resource_name: name.to_string(),
            group_name: datacenter.to_string(),
            value: MetricValue::Capacity {
                free_bytes,
                capacity_bytes,
            },
            unit: Unit::Bytes,
        }
    }
}

/// Overall status reported by vSphere for a managed entity.
///
/// The alphabet is closed; anything vSphere may add later lands in `Other`
/// with its original spelling.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HostStatus {
    Green,
    Yellow,
    Red,
    Gray,
    Other(String),
}

impl HostStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "green" => HostStatus::Green,
            "yellow" => HostStatus::Yellow,
            "red" => HostStatus::Red,
            "gray" => HostStatus::Gray,
            _ => HostStatus::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HostStatus::Green => "green",
            HostStatus::Yellow => "yellow",
            HostStatus::Red => "red",
            HostStatus::Gray => "gray",
            HostStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for HostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
