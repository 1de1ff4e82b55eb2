//! Error types for the ECP client

use thiserror::Error;

/// Errors that can occur while talking to a device
#[derive(Debug, Error)]
pub enum EcpError {
    /// Network or HTTP communication error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The device answered with a document we could not read
    #[error("XML parsing error: {0}")]
    Parse(String),
}

impl From<roku_discovery::DiscoveryError> for EcpError {
    fn from(error: roku_discovery::DiscoveryError) -> Self {
        match error {
            roku_discovery::DiscoveryError::ParseError(msg) => EcpError::Parse(msg),
            other => EcpError::Network(other.to_string()),
        }
    }
}
