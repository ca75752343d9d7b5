//! Metric sources.
//!
//! The check core never talks to vSphere itself. A [`MetricSource`] hands it
//! values that were already fetched, either from a snapshot file written by
//! a collector or from an inventory endpoint over HTTP.

mod http;
mod snapshot;

pub use http::HttpSource;
pub use snapshot::{Snapshot, SnapshotSource};

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStatusRecord {
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatastoreRecord {
    pub id: String,
    pub name: String,
    pub datacenter: String,
    pub capacity_bytes: u64,
    pub free_bytes: u64,
}

/// Supplies raw values for one run.
///
/// Any failure is fatal for the check; implementations must not fall back
/// to zero or default readings.
pub trait MetricSource {
    fn latency_seconds(&mut self) -> Result<f64>;

    fn host_statuses(&mut self) -> Result<Vec<HostStatusRecord>>;

    fn datastores(&mut self) -> Result<Vec<DatastoreRecord>>;
}
