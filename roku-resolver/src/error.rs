use roku_discovery::DiscoveryError;
use thiserror::Error;

/// Errors surfaced by device resolution.
///
/// Cache read and write problems never show up here: an unreadable cache is
/// a miss and an unwritable one only costs a rediscovery next run.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("device not found: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("device not found: discovery returned no devices")]
    NoDevices,

    #[error("cannot find device named {0}")]
    DeviceNotFound(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
