//! Error types for the XML client

use thiserror::Error;

/// Errors that can occur while talking to the receiver over HTTP
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection failure, DNS failure or request timeout
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The response arrived but its body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}
