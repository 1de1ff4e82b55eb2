//! Roku device discovery library
//!
//! Locates ECP (External Control Protocol) devices on the local network with
//! a single SSDP M-SEARCH probe and a bounded listening window.
//!
//! # Quick Start
//!
//! ```no_run
//! use roku_discovery::{DiscoveryClient, DiscoveryConfig};
//! use std::time::Duration;
//!
//! let client = DiscoveryClient::new(DiscoveryConfig::new().with_window(Duration::from_secs(5)))?;
//! for candidate in client.discover_all()? {
//!     println!("{} at {}", candidate.name.as_deref().unwrap_or("(unnamed)"), candidate.address);
//! }
//! # Ok::<(), roku_discovery::DiscoveryError>(())
//! ```

mod config;
pub mod device;
mod discovery;
mod error;
mod ssdp;

pub use config::{DiscoveryConfig, ROKU_SERVICE_TYPE, SSDP_MULTICAST_ADDR};
pub use device::DeviceInfo;
pub use discovery::{DiscoveryClient, DiscoveryIterator};
pub use error::{DiscoveryError, Result};

/// A device that answered discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Control-base-URL with trailing slash, e.g. "http://192.168.1.134:8060/"
    pub address: String,
    /// Name from the device-info document, if it could be fetched
    pub name: Option<String>,
}
