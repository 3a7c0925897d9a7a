use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};
use xml_client::{HttpResponse, Transport, XmlClient};

use crate::command::{control_url, encode_envelope};
use crate::operation::{QueryOperation, YamahaOperation};
use crate::xml;
use crate::Result;

/// A client for executing receiver operations against an actual device
///
/// This client bridges the stateless operation definitions and the network.
/// It wraps each command fragment in the request envelope, posts it through
/// a [`Transport`], and decodes query responses.
///
/// # Example
/// ```rust,no_run
/// use yamaha_api::YamahaClient;
/// use yamaha_api::operations::system::{GetBasicStatusOperation, GetBasicStatusRequest};
///
/// let client = YamahaClient::new("192.168.1.20");
/// let status = client.execute::<GetBasicStatusOperation>(&GetBasicStatusRequest)?;
/// println!("volume: {:?}", status.volume);
/// # Ok::<(), yamaha_api::ApiError>(())
/// ```
#[derive(Clone)]
pub struct YamahaClient {
    transport: Arc<dyn Transport>,
    url: String,
}

impl YamahaClient {
    /// Create a client for `host` using the default HTTP transport
    pub fn new(host: &str) -> Self {
        Self::with_transport(host, Arc::new(XmlClient::new()))
    }

    /// Create a client whose requests time out after `timeout`
    pub fn with_timeout(host: &str, timeout: Duration) -> Self {
        Self::with_transport(host, Arc::new(XmlClient::with_timeout(timeout)))
    }

    /// Create a client with a custom transport (for tests and advanced use cases)
    pub fn with_transport(host: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            url: control_url(host),
        }
    }

    /// The control URL requests are posted to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send an operation and return the raw response
    ///
    /// Non-200 responses are logged but still returned. Only connection level
    /// failures are errors.
    pub fn send<Op: YamahaOperation>(&self, request: &Op::Request) -> Result<HttpResponse> {
        let document = encode_envelope(Op::COMMAND, &Op::build_body(request));
        debug!(operation = Op::NAME, request = %document, "Request");

        let response = self.transport.post(&self.url, &document)?;
        if !response.is_success() {
            error!(
                operation = Op::NAME,
                status = response.status,
                request = %document,
                "Error doing API request"
            );
        }
        debug!(operation = Op::NAME, response = %response.body, "Response");

        Ok(response)
    }

    /// Execute a query and decode its response
    ///
    /// The body is decoded even when the status was not 200, so a device that
    /// reports errors with a valid document still yields a typed result.
    pub fn execute<Op: QueryOperation>(&self, request: &Op::Request) -> Result<Op::Response> {
        let response = self.send::<Op>(request)?;
        let root = xml::parse_document(&response.body)?;
        xml::check_return_code(&root)?;
        Op::parse_response(&root)
    }
}

impl fmt::Debug for YamahaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamahaClient").field("url", &self.url).finish()
    }
}
