//! Private XML-over-HTTP client for receiver communication
//!
//! This crate provides the minimal transport used by `yamaha-api`: every
//! command is one blocking HTTP POST carrying an XML document, bounded by a
//! fixed timeout. Non-200 responses are not treated as failures here; the
//! status and body are handed back so callers can decode them best-effort.

mod error;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use error::TransportError;

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

/// Timeout applied to every request unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Raw response returned by a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Build a response with status 200
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the device answered with HTTP 200
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// A synchronous `POST(url, body) -> (status, body)` collaborator
///
/// The production implementation is [`XmlClient`]; tests substitute a
/// scripted transport.
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response
    fn post(&self, url: &str, body: &str) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post(&self, url: &str, body: &str) -> Result<HttpResponse, TransportError> {
        (**self).post(url, body)
    }
}

/// Blocking HTTP client for the receiver's XML control endpoint
#[derive(Debug, Clone)]
pub struct XmlClient {
    agent: ureq::Agent,
    timeout: Duration,
}

impl XmlClient {
    /// Create a new client with the default 5 second timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests time out after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            timeout,
        }
    }

    /// The timeout applied to each request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for XmlClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for XmlClient {
    fn post(&self, url: &str, body: &str) -> Result<HttpResponse, TransportError> {
        let result = self
            .agent
            .post(url)
            .set("Content-Type", "text/xml; charset=\"utf-8\"")
            .send_string(body);

        // ureq reports 4xx/5xx as errors but still hands over the response
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(e)) => {
                return Err(TransportError::Network(e.to_string()));
            }
        };

        let status = response.status();
        let text = response
            .into_string()
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(status, "HTTP exchange finished");

        Ok(HttpResponse { status, body: text })
    }
}
