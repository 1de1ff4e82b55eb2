//! Discovery configuration.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use crate::error::{DiscoveryError, Result};

/// SSDP multicast group and port.
pub const SSDP_MULTICAST_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(239, 255, 255, 250), 1900));

/// Search target advertised by Roku players.
pub const ROKU_SERVICE_TYPE: &str = "roku:ecp";

/// Settings for a single discovery session.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Where the M-SEARCH datagram is sent
    /// Default: 239.255.255.250:1900
    pub search_addr: SocketAddr,

    /// Value of the `ST` header
    /// Default: "roku:ecp"
    pub service_type: String,

    /// How long replies are collected after the probe is sent
    /// Default: 3 seconds
    pub window: Duration,

    /// Value of the `MX` header (seconds devices may delay their answer)
    /// Default: 3
    pub mx: u8,

    /// Timeout for the device-info request used to name candidates
    /// Default: 2 seconds
    pub http_timeout: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_addr: SSDP_MULTICAST_ADDR,
            service_type: ROKU_SERVICE_TYPE.to_string(),
            window: Duration::from_secs(3),
            mx: 3,
            http_timeout: Duration::from_secs(2),
        }
    }
}

impl DiscoveryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn with_search_addr(mut self, addr: SocketAddr) -> Self {
        self.search_addr = addr;
        self
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<()> {
        if self.window == Duration::ZERO {
            return Err(DiscoveryError::InvalidConfig(
                "Listening window must be greater than 0".to_string(),
            ));
        }

        if self.service_type.trim().is_empty() {
            return Err(DiscoveryError::InvalidConfig(
                "Service type must not be empty".to_string(),
            ));
        }

        if !(1..=5).contains(&self.mx) {
            return Err(DiscoveryError::InvalidConfig(format!(
                "MX must be between 1 and 5, got {}",
                self.mx
            )));
        }

        Ok(())
    }

    /// Render the M-SEARCH datagram for this configuration.
    pub(crate) fn search_request(&self) -> String {
        format!(
            "M-SEARCH * HTTP/1.1\r\n\
             HOST: 239.255.255.250:1900\r\n\
             MAN: \"ssdp:discover\"\r\n\
             ST: {}\r\n\
             MX: {}\r\n\
             \r\n",
            self.service_type, self.mx
        )
    }
}
