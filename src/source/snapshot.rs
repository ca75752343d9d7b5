use super::{DatastoreRecord, HostStatusRecord, MetricSource};
use crate::error::{CheckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Inventory document produced by a vSphere collector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub latency_seconds: Option<f64>,
    #[serde(default)]
    pub hosts: Vec<SnapshotHost>,
    #[serde(default)]
    pub datacenters: Vec<SnapshotDatacenter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotHost {
    pub name: String,
    #[serde(alias = "overall_status")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDatacenter {
    pub name: String,
    #[serde(default)]
    pub datastores: Vec<SnapshotDatastore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDatastore {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub capacity: u64,
    pub free_space: u64,
}

impl Snapshot {
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data)
            .map_err(|e| CheckError::source_unavailable(format!("invalid inventory snapshot: {}", e)))
    }

    pub fn host_records(&self) -> Vec<HostStatusRecord> {
        self.hosts
            .iter()
            .map(|host| HostStatusRecord {
                name: host.name.clone(),
                status: host.status.clone(),
            })
            .collect()
    }

    /// Flattens datastores under their datacenter
    pub fn datastore_records(&self) -> Vec<DatastoreRecord> {
        self.datacenters
            .iter()
            .flat_map(|dc| {
                dc.datastores.iter().map(move |ds| DatastoreRecord {
                    id: ds
                        .id
                        .clone()
                        .unwrap_or_else(|| format!("{}/{}", dc.name, ds.name)),
                    name: ds.name.clone(),
                    datacenter: dc.name.clone(),
                    capacity_bytes: ds.capacity,
                    free_bytes: ds.free_space,
                })
            })
            .collect()
    }

    pub fn latency(&self) -> Result<f64> {
        self.latency_seconds.ok_or_else(|| {
            CheckError::source_unavailable("snapshot carries no connection latency")
        })
    }
}

/// Reads a snapshot file once per run
#[derive(Debug)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| {
            CheckError::source_unavailable(format!("cannot read snapshot {:?}: {}", path, e))
        })?;
        let snapshot = Snapshot::from_json(&data)?;

        log::info!(
            "loaded snapshot {:?}: {} hosts, {} datacenters",
            path,
            snapshot.hosts.len(),
            snapshot.datacenters.len()
        );

        Ok(Self { snapshot })
    }
}

impl MetricSource for SnapshotSource {
    fn latency_seconds(&mut self) -> Result<f64> {
        self.snapshot.latency()
    }

    fn host_statuses(&mut self) -> Result<Vec<HostStatusRecord>> {
        Ok(self.snapshot.host_records())
    }

    fn datastores(&mut self) -> Result<Vec<DatastoreRecord>> {
        Ok(self.snapshot.datastore_records())
    }
}
