//! Scripted transport for tests
//!
//! Records every request body and answers through a caller-supplied
//! responder, so higher layers can be exercised without a device.

use parking_lot::Mutex;

use crate::{HttpResponse, Transport, TransportError};

type Responder = Box<dyn FnMut(&str) -> Result<HttpResponse, TransportError> + Send>;

/// A [`Transport`] that answers from a closure and records requests
pub struct MockTransport {
    responder: Mutex<Responder>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Answer every request through `responder`
    pub fn new<F>(responder: F) -> Self
    where
        F: FnMut(&str) -> Result<HttpResponse, TransportError> + Send + 'static,
    {
        Self {
            responder: Mutex::new(Box::new(responder)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with the same 200 body
    pub fn always(body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(move |_| Ok(HttpResponse::ok(body.clone())))
    }

    /// Fail every request with a network error
    pub fn unreachable() -> Self {
        Self::new(|_| Err(TransportError::Network("connection refused".to_string())))
    }

    /// All request bodies sent so far, oldest first
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Number of requests whose body contains `needle`
    pub fn count_containing(&self, needle: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|body| body.contains(needle))
            .count()
    }
}

impl Transport for MockTransport {
    fn post(&self, _url: &str, body: &str) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(body.to_string());
        let mut responder = self.responder.lock();
        (&mut **responder)(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_requests() {
        let transport = MockTransport::always("<ok/>");
        transport.post("http://receiver", "<a/>").unwrap();
        transport.post("http://receiver", "<b/>").unwrap();

        assert_eq!(transport.requests(), vec!["<a/>".to_string(), "<b/>".to_string()]);
        assert_eq!(transport.count_containing("<b/>"), 1);
    }

    #[test]
    fn test_mock_unreachable() {
        let transport = MockTransport::unreachable();
        assert!(matches!(
            transport.post("http://receiver", "<a/>"),
            Err(TransportError::Network(_))
        ));
        assert_eq!(transport.requests().len(), 1);
    }
}
