//! # roku-resolver
//!
//! Finds the control-base-URL of the Roku player a command should talk to,
//! without paying for SSDP discovery on every run:
//!
//! - [`AddressCache`] persists the last discovered address, its name and
//!   when it was confirmed, plus every device the last discovery saw
//! - [`DeviceResolver`] returns the cached address while it is fresh and
//!   rediscovers (then re-persists) when it is missing, stale or corrupt
//!
//! ```rust,no_run
//! use roku_resolver::{DeviceResolver, ResolverConfig};
//! use std::time::Duration;
//!
//! let config = ResolverConfig::default().with_max_age(Duration::from_secs(60));
//! let resolver = DeviceResolver::from_config(config)?;
//!
//! let current = resolver.resolve_address()?;
//! let bedroom = resolver.resolve_named("bedroom")?;
//! # Ok::<(), roku_resolver::ResolveError>(())
//! ```

pub mod cache;
mod config;
mod error;
mod locator;
pub mod logging;
mod resolver;

pub use cache::{AddressCache, CacheRecord, KnownDevice};
pub use config::{default_cache_path, DiscoveryMode, ResolverConfig};
pub use error::{ResolveError, Result};
pub use locator::{Clock, DeviceLocator, NetworkLocator, SystemClock};
pub use resolver::DeviceResolver;

pub use roku_discovery::{Candidate, DiscoveryConfig, DiscoveryError};
