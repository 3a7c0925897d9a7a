use thiserror::Error;
use xml_client::TransportError;

/// High-level API errors for receiver operations
///
/// This enum abstracts away the underlying HTTP transport and gives callers
/// one error type for every way an exchange with the receiver can fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// Network communication error
    ///
    /// Connection failures, timeouts, or a response body that could not be read.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response parsing error
    ///
    /// The device answered, but the document was malformed or an expected
    /// element was absent.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The device reported a non-zero `RC` return code
    #[error("Device returned error code {0}")]
    ResponseCode(u16),

    /// Invalid parameter value
    ///
    /// Raised before any request is sent, e.g. a volume outside `[0, 1]`.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// Shorthand for a parse error about a missing element
    pub fn missing(element: &str) -> Self {
        Self::ParseError(format!("Missing {} element", element))
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Network(msg) => ApiError::NetworkError(msg),
            TransportError::Body(msg) => ApiError::NetworkError(msg),
        }
    }
}

impl From<xmltree::ParseError> for ApiError {
    fn from(error: xmltree::ParseError) -> Self {
        ApiError::ParseError(error.to_string())
    }
}
