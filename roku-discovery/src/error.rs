//! Error types for the discovery system.

use std::fmt;
use std::time::Duration;

/// Error type for discovery operations.
///
/// Malformed replies are handled inside the client and never reach callers
/// directly; a session that only saw malformed replies ends in `Timeout`.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Network-related errors (socket creation, HTTP requests, etc.)
    NetworkError(String),
    /// Parsing errors (XML, SSDP response, etc.)
    ParseError(String),
    /// No usable reply arrived before the listening window closed
    Timeout(Duration),
    /// Configuration values that cannot produce a working probe
    InvalidConfig(String),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DiscoveryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DiscoveryError::Timeout(window) => write!(
                f,
                "no device answered discovery within {:.1}s",
                window.as_secs_f64()
            ),
            DiscoveryError::InvalidConfig(msg) => write!(f, "Invalid discovery config: {}", msg),
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
