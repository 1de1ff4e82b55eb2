//! Seams between the resolver and the outside world: how devices are found
//! and what time it is.

use std::time::{SystemTime, UNIX_EPOCH};

use roku_discovery::{Candidate, DiscoveryClient, DiscoveryError};
use tracing::debug;

use crate::config::DiscoveryMode;

/// Finds devices on the network.
///
/// `Ok` carries the devices in order of arrival. An implementation that
/// finds nothing should return an error rather than an empty list.
pub trait DeviceLocator {
    fn locate(&self) -> Result<Vec<Candidate>, DiscoveryError>;
}

/// Source of the current Unix time in seconds
pub trait Clock {
    fn now(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

/// [`DeviceLocator`] backed by SSDP discovery
#[derive(Debug, Clone)]
pub struct NetworkLocator {
    client: DiscoveryClient,
    mode: DiscoveryMode,
}

impl NetworkLocator {
    pub fn new(client: DiscoveryClient, mode: DiscoveryMode) -> Self {
        Self { client, mode }
    }
}

impl DeviceLocator for NetworkLocator {
    fn locate(&self) -> Result<Vec<Candidate>, DiscoveryError> {
        match self.mode {
            DiscoveryMode::Collect => self.client.discover_all(),
            DiscoveryMode::First => {
                let address = self.client.discover_first()?;
                let name = self
                    .client
                    .fetch_device_info(&address)
                    .inspect_err(|e| debug!(%address, error = %e, "could not name device"))
                    .ok()
                    .and_then(|info| info.display_name().map(str::to_string));

                Ok(vec![Candidate { address, name }])
            }
        }
    }
}
