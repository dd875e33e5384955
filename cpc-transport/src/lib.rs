//! Private HTTP transport for Canada Post web service calls
//!
//! This crate provides the minimal request/response plumbing the service
//! clients need: a POST with a byte body, custom headers and HTTP basic
//! authentication, returning the status code and the raw body. The
//! [`Transport`] trait is the seam service clients are written against, so
//! that tests can substitute canned responses for the network.

mod error;

pub use error::TransportError;

use std::fmt;
use std::time::Duration;

/// Default timeout for a whole request/response exchange
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for establishing the connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Username/password pair sent with HTTP basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An outgoing POST request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL including scheme
    pub url: String,
    /// Header name/value pairs, sent in order
    pub headers: Vec<(String, String)>,
    /// Raw request body
    pub body: Vec<u8>,
    /// Optional basic authentication credentials
    pub basic_auth: Option<BasicAuth>,
}

impl HttpRequest {
    /// Create a POST request for `url` carrying `body`
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
            basic_auth: None,
        }
    }

    /// Append a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach basic authentication credentials
    pub fn basic_auth(mut self, auth: BasicAuth) -> Self {
        self.basic_auth = Some(auth);
        self
    }

    /// Look up a header value by case-insensitive name
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response received from the server, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, with invalid sequences replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Something that can perform a single blocking POST exchange
///
/// Implementations must return non-2xx responses as `Ok`; only failures to
/// complete the exchange are errors.
pub trait Transport: Send + Sync {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).post(request)
    }
}

/// Blocking HTTP(S) transport backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport with the default timeouts
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeouts(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a transport with explicit request and connect timeouts
    pub fn with_timeouts(
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.post(&request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(auth) = &request.basic_auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        tracing::trace!("POST {} ({} bytes)", request.url, request.body.len());

        let response = builder.body(request.body.clone()).send()?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_http_transport_creation() {
        assert!(HttpTransport::new().is_ok());
        assert!(HttpTransport::with_timeouts(Duration::from_secs(1), Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_request_builder_keeps_header_order() {
        let request = HttpRequest::post("https://example.test/path", b"<a/>".to_vec())
            .header("Accept", "text/xml")
            .header("Content-Type", "text/xml")
            .basic_auth(BasicAuth::new("user", "secret"));

        assert_eq!(request.headers[0].0, "Accept");
        assert_eq!(request.headers[1].0, "Content-Type");
        assert_eq!(request.header_value("content-type"), Some("text/xml"));
        assert_eq!(request.header_value("Accept-Language"), None);
        assert_eq!(request.basic_auth.as_ref().map(|a| a.username.as_str()), Some("user"));
    }

    #[test]
    fn test_basic_auth_debug_hides_password() {
        let auth = BasicAuth::new("user", "hunter2");
        let printed = format!("{:?}", auth);
        assert!(printed.contains("user"));
        assert!(!printed.contains("hunter2"));
    }

    #[rstest]
    #[case(200, true)]
    #[case(204, true)]
    #[case(299, true)]
    #[case(199, false)]
    #[case(300, false)]
    #[case(400, false)]
    #[case(500, false)]
    fn test_response_success_range(#[case] status: u16, #[case] expected: bool) {
        assert_eq!(HttpResponse::new(status, Vec::new()).is_success(), expected);
    }

    #[test]
    fn test_response_text_is_lossy() {
        let response = HttpResponse::new(200, vec![b'o', b'k', 0xff]);
        assert!(response.text().starts_with("ok"));
    }
}
