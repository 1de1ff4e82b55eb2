//! Core discovery logic and iterator implementation.
//!
//! This module implements the discovery algorithm that:
//! 1. Sends one SSDP M-SEARCH request for the configured service type
//! 2. Reads replies until the listening window closes
//! 3. De-duplicates reply locations in order of arrival
//! 4. Optionally names each location by querying its device-info endpoint

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::DiscoveryConfig;
use crate::device::DeviceInfo;
use crate::error::{DiscoveryError, Result};
use crate::ssdp::{SsdpClient, SsdpResponseIterator};
use crate::Candidate;

/// Iterator over distinct control-base-URLs answering one probe.
///
/// Yields each address at most once, in order of arrival, and ends when the
/// listening window closes. The probe socket is owned by the iterator, so
/// dropping it early (for example after the first address) releases the
/// socket immediately.
pub struct DiscoveryIterator {
    responses: SsdpResponseIterator,
    seen_locations: HashSet<String>,
}

impl Iterator for DiscoveryIterator {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let location = match self.responses.next()? {
                Ok(location) => location,
                Err(e) => return Some(Err(e)),
            };

            if self.seen_locations.insert(location.clone()) {
                return Some(Ok(location));
            }
        }
    }
}

/// Client that locates ECP devices with SSDP.
///
/// # Examples
///
/// ```no_run
/// use roku_discovery::{DiscoveryClient, DiscoveryConfig};
///
/// let client = DiscoveryClient::new(DiscoveryConfig::default())?;
/// let address = client.discover_first()?;
/// println!("Found device at {}", address);
/// # Ok::<(), roku_discovery::DiscoveryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    config: DiscoveryConfig,
    http_client: reqwest::blocking::Client,
}

impl DiscoveryClient {
    /// Create a client for the given configuration
    pub fn new(config: DiscoveryConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::blocking::Client::builder()
            .timeout(config.http_timeout)
            .no_proxy()
            .build()
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Send a probe and return the stream of distinct reply addresses
    pub fn iter(&self) -> Result<DiscoveryIterator> {
        let responses = SsdpClient::new()?.search(&self.config)?;

        Ok(DiscoveryIterator {
            responses,
            seen_locations: HashSet::new(),
        })
    }

    /// Return the first well-formed address, stopping as soon as it arrives.
    ///
    /// # Errors
    ///
    /// `DiscoveryError::Timeout` if the window closes without a usable reply.
    pub fn discover_first(&self) -> Result<String> {
        match self.iter()?.next() {
            Some(result) => result,
            None => Err(DiscoveryError::Timeout(self.config.window)),
        }
    }

    /// Listen for the whole window and return every distinct device found.
    ///
    /// Each candidate is named from its device-info document. A device whose
    /// document cannot be fetched or parsed is still returned, unnamed.
    pub fn discover_all(&self) -> Result<Vec<Candidate>> {
        let mut addresses = Vec::new();

        for result in self.iter()? {
            match result {
                Ok(address) => addresses.push(address),
                Err(e) if addresses.is_empty() => return Err(e),
                Err(e) => {
                    warn!(error = %e, "discovery stopped early");
                    break;
                }
            }
        }

        if addresses.is_empty() {
            return Err(DiscoveryError::Timeout(self.config.window));
        }

        Ok(addresses
            .into_iter()
            .map(|address| {
                let name = match self.fetch_device_info(&address) {
                    Ok(info) => info.display_name().map(str::to_string),
                    Err(e) => {
                        debug!(%address, error = %e, "device-info query failed, leaving device unnamed");
                        None
                    }
                };
                Candidate { address, name }
            })
            .collect())
    }

    /// Fetch and parse `<address>query/device-info`
    pub fn fetch_device_info(&self, address: &str) -> Result<DeviceInfo> {
        let url = format!("{}query/device-info", address);

        let response = self
            .http_client
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to fetch device-info: {}", e)))?;

        let xml = response
            .text()
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to read response body: {}", e)))?;

        DeviceInfo::from_xml(&xml)
    }
}
