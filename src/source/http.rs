use super::{DatastoreRecord, HostStatusRecord, MetricSource, Snapshot};
use crate::error::{CheckError, Result};
use std::time::{Duration, Instant};

const USER_AGENT: &str = concat!("check_vsphere/", env!("CARGO_PKG_VERSION"));

/// Fetches the inventory snapshot from an HTTP endpoint.
///
/// The document is requested once; its round trip time is the connect
/// latency reported by the `connect` check.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    url: String,
    user: String,
    password: String,
    fetched: Option<(Snapshot, f64)>,
}

impl HttpSource {
    pub fn new(host: &str, user: &str, password: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CheckError::source_unavailable(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: inventory_url(host),
            user: user.to_string(),
            password: password.to_string(),
            fetched: None,
        })
    }

    fn fetch(&mut self) -> Result<&(Snapshot, f64)> {
        if self.fetched.is_none() {
            let start = Instant::now();
            log::info!("requesting inventory from {}", self.url);

            let response = self
                .client
                .get(&self.url)
                .basic_auth(&self.user, Some(&self.password))
                .send()
                .map_err(|e| {
                    CheckError::source_unavailable(format!(
                        "Connection to vSphere failed: {}",
                        e
                    ))
                })?;

            if !response.status().is_success() {
                return Err(CheckError::source_unavailable(format!(
                    "{} returned status {}",
                    self.url,
                    response.status()
                )));
            }

            let snapshot: Snapshot = response.json().map_err(|e| {
                CheckError::source_unavailable(format!("invalid inventory snapshot: {}", e))
            })?;
            let latency = start.elapsed().as_secs_f64();
            log::debug!("inventory fetched in {:.3}s", latency);

            self.fetched = Some((snapshot, latency));
        }

        self.fetched
            .as_ref()
            .ok_or_else(|| CheckError::source_unavailable("inventory was not fetched"))
    }
}

impl MetricSource for HttpSource {
    fn latency_seconds(&mut self) -> Result<f64> {
        Ok(self.fetch()?.1)
    }

    fn host_statuses(&mut self) -> Result<Vec<HostStatusRecord>> {
        Ok(self.fetch()?.0.host_records())
    }

    fn datastores(&mut self) -> Result<Vec<DatastoreRecord>> {
        Ok(self.fetch()?.0.datastore_records())
    }
}

/// A bare host name maps to `https://HOST/inventory`; full URLs are used as given
fn inventory_url(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}/inventory", host.trim_end_matches('/'))
    }
}
