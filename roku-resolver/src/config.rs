//! Configuration for device resolution
//!
//! Everything the resolver needs (cache location, freshness threshold and
//! the discovery settings) is carried in one value built by the caller.

use std::path::PathBuf;
use std::time::Duration;

use roku_discovery::DiscoveryConfig;

use crate::error::{ResolveError, Result};

/// How the resolver runs discovery when the cache cannot be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    /// Stop at the first device that answers
    First,
    /// Listen for the whole window and remember every device
    Collect,
}

/// Configuration for [`DeviceResolver`](crate::DeviceResolver)
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Discovery settings (window, search target, service type)
    pub discovery: DiscoveryConfig,

    /// Where the cache record is persisted
    /// Default: `<user cache dir>/roku-remote/device.json`
    pub cache_path: PathBuf,

    /// Age after which a cached address is rediscovered
    /// Default: 60 seconds
    pub max_age: Duration,

    /// Discovery strategy on cache miss
    /// Default: Collect
    pub mode: DiscoveryMode,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            discovery: DiscoveryConfig::default(),
            cache_path: default_cache_path(),
            max_age: Duration::from_secs(60),
            mode: DiscoveryMode::Collect,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve using only the first device to answer
    pub fn single_device() -> Self {
        Self {
            mode: DiscoveryMode::First,
            ..Default::default()
        }
    }

    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.discovery.window = window;
        self
    }

    pub fn with_mode(mut self, mode: DiscoveryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<()> {
        if self.cache_path.as_os_str().is_empty() {
            return Err(ResolveError::Configuration(
                "Cache path must not be empty".to_string(),
            ));
        }

        self.discovery
            .validate()
            .map_err(|e| ResolveError::Configuration(e.to_string()))
    }
}

/// Per-user cache file location, falling back to the system temp dir
pub fn default_cache_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("roku-remote")
        .join("device.json")
}
