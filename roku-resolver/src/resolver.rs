//! DeviceResolver - the entry point commands use to get an address
//!
//! ```text
//! resolve_address()
//!     ↓
//! AddressCache::load ──fresh──→ cached address
//!     ↓ stale / missing / corrupt
//! DeviceLocator::locate
//!     ↓
//! AddressCache::save ──────────→ refreshed address
//! ```

use std::io;

use roku_discovery::DiscoveryClient;
use tracing::{debug, info, warn};

use crate::cache::{AddressCache, CacheRecord, KnownDevice};
use crate::config::ResolverConfig;
use crate::error::{ResolveError, Result};
use crate::locator::{Clock, DeviceLocator, NetworkLocator, SystemClock};

/// Resolves the control-base-URL of the device commands should talk to.
///
/// One resolver serves one process run; nothing is shared between
/// concurrent callers beyond the cache file itself (last write wins).
///
/// # Example
///
/// ```rust,no_run
/// use roku_resolver::{DeviceResolver, ResolverConfig};
///
/// let resolver = DeviceResolver::from_config(ResolverConfig::default())?;
/// let address = resolver.resolve_address()?;
/// println!("keypress URL: {}keypress/Home", address);
/// # Ok::<(), roku_resolver::ResolveError>(())
/// ```
#[derive(Debug)]
pub struct DeviceResolver<L, C = SystemClock> {
    cache: AddressCache,
    locator: L,
    clock: C,
}

impl DeviceResolver<NetworkLocator> {
    /// Build a resolver that discovers over the network with the system clock
    pub fn from_config(config: ResolverConfig) -> Result<Self> {
        config.validate()?;

        let client = DiscoveryClient::new(config.discovery)
            .map_err(|e| ResolveError::Configuration(e.to_string()))?;

        Ok(Self::new(
            AddressCache::new(config.cache_path, config.max_age),
            NetworkLocator::new(client, config.mode),
            SystemClock,
        ))
    }
}

impl<L: DeviceLocator, C: Clock> DeviceResolver<L, C> {
    pub fn new(cache: AddressCache, locator: L, clock: C) -> Self {
        Self {
            cache,
            locator,
            clock,
        }
    }

    pub fn cache(&self) -> &AddressCache {
        &self.cache
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Address of the current device, rediscovering if the cache is stale
    pub fn resolve_address(&self) -> Result<String> {
        Ok(self.current_record()?.address)
    }

    /// The current device, rediscovering if the cache is stale
    pub fn current(&self) -> Result<KnownDevice> {
        Ok(self.current_record()?.current())
    }

    /// Address of the known device called `name` (case-insensitive)
    pub fn resolve_named(&self, name: &str) -> Result<String> {
        let (_, device) = self.find_named(name)?;
        Ok(device.address)
    }

    /// Make the device called `name` the current one for later runs
    pub fn use_device(&self, name: &str) -> Result<KnownDevice> {
        let (mut record, device) = self.find_named(name)?;

        record.address = device.address.clone();
        record.display_name = device.name.clone();
        record.preferred_name = device.name.clone();
        self.cache.save(&record);

        info!(name = %device.name, address = %device.address, "selected device");
        Ok(device)
    }

    /// Devices seen by the last discovery, rediscovering if the cache is stale
    pub fn known_devices(&self) -> Result<Vec<KnownDevice>> {
        Ok(self.current_record()?.devices)
    }

    /// Rediscover regardless of cache freshness
    pub fn refresh(&self) -> Result<CacheRecord> {
        let record = self.cache.load();
        self.rediscover(record, self.clock.now())
    }

    /// Drop the persisted record so the next run starts cold
    pub fn forget(&self) -> io::Result<()> {
        self.cache.forget()
    }

    fn current_record(&self) -> Result<CacheRecord> {
        let record = self.cache.load();
        let now = self.clock.now();

        if self.cache.is_valid(&record, now) {
            debug!(address = %record.address, "using cached device address");
            return Ok(record);
        }

        debug!(last_refresh = record.last_refresh, "device cache missing or stale");
        self.rediscover(record, now)
    }

    fn find_named(&self, name: &str) -> Result<(CacheRecord, KnownDevice)> {
        let record = self.current_record()?;

        let device = record
            .devices
            .iter()
            .find(|device| device.is_named(name))
            .cloned()
            .ok_or_else(|| ResolveError::DeviceNotFound(name.to_string()))?;

        Ok((record, device))
    }

    fn rediscover(&self, mut record: CacheRecord, now: i64) -> Result<CacheRecord> {
        let devices: Vec<KnownDevice> = self
            .locator
            .locate()?
            .into_iter()
            .map(KnownDevice::from)
            .collect();

        let preferred = if record.preferred_name.is_empty() {
            None
        } else {
            let found = devices.iter().find(|d| d.is_named(&record.preferred_name));
            if found.is_none() {
                warn!(
                    preferred = %record.preferred_name,
                    "previously used device not found anymore, falling back to the first one"
                );
            }
            found
        };

        let current = preferred
            .or_else(|| devices.first())
            .cloned()
            .ok_or(ResolveError::NoDevices)?;

        info!(address = %current.address, name = %current.name, found = devices.len(), "discovered device");

        record.address = current.address;
        record.display_name = current.name;
        record.last_refresh = now;
        record.devices = devices;
        self.cache.save(&record);

        Ok(record)
    }
}
