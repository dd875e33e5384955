use cpc_transport::{BasicAuth, HttpRequest, HttpResponse, HttpTransport, Transport};

use crate::config::ClientConfig;
use crate::error::ErrorCode;
use crate::model::{Destination, Origin, Parcel};
use crate::services::rating::{GetRatesOperation, RateRequest, ServiceQuote};
use crate::xml::{find_descendant, parse_document};
use crate::{ApiError, CanadaPostOperation, Result};

/// Language requested for human readable messages
pub const ACCEPT_LANGUAGE: &str = "en-CA";

/// A client for calling Canada Post web services
///
/// The client owns its configuration and a transport. Both are read-only
/// after construction, so one client can serve concurrent calls from
/// several threads; every call builds and parses its own documents.
///
/// ```rust,no_run
/// use canada_post::{CanadaPostClient, ClientConfig, Credentials, Destination, Origin, Parcel};
///
/// let config = ClientConfig::new(Credentials::new("2004381", "api-user", "api-pass"));
/// let client = CanadaPostClient::new(config)?;
///
/// let quotes = client.get_rates(
///     &Parcel::new(1.5).with_dimensions(20.0, 10.0, 5.0),
///     &Origin::new("K2B8J6"),
///     &Destination::domestic("J0E1X0"),
/// )?;
/// for quote in &quotes {
///     println!("{:?}: {:?}", quote.service_name, quote.price_details);
/// }
/// # Ok::<(), canada_post::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CanadaPostClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl CanadaPostClient<HttpTransport> {
    /// Create a client backed by the HTTPS transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_timeouts(config.timeout, config.connect_timeout)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> CanadaPostClient<T> {
    /// Create a client with a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute HTTPS URL of a resource path on the configured server
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("https://{}{}", self.config.server.host(), path)
    }

    /// Price a parcel between two points
    ///
    /// Returns one quote per service Canada Post offers for the scenario, in
    /// the order they were returned. An empty vector is a valid answer.
    pub fn get_rates(
        &self,
        parcel: &Parcel,
        origin: &Origin,
        destination: &Destination,
    ) -> Result<Vec<ServiceQuote>> {
        tracing::info!(
            "Getting rates for parcel: {}, from {} to {}",
            parcel,
            origin,
            destination
        );

        let request = RateRequest::new(*parcel, origin.clone(), destination.clone());
        self.execute::<GetRatesOperation>(&request)
    }

    /// Execute a Canada Post operation
    ///
    /// Builds the request document, POSTs it with the operation's media type
    /// and basic authentication, then either parses the response or maps
    /// the error envelope to [`ApiError::Rate`].
    pub fn execute<Op: CanadaPostOperation>(&self, request: &Op::Request) -> Result<Op::Response> {
        let url = self.endpoint_url(Op::PATH);
        let body = Op::build_payload(request, &self.config)?;

        tracing::info!("Using url {}", url);
        tracing::debug!("Request xml: {}", String::from_utf8_lossy(&body));

        let credentials = &self.config.credentials;
        let http_request = HttpRequest::post(url, body)
            .header("Accept", Op::MEDIA_TYPE)
            .header("Content-Type", Op::MEDIA_TYPE)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .basic_auth(BasicAuth::new(
                credentials.username.as_str(),
                credentials.password.as_str(),
            ));

        let response = self.transport.post(&http_request).map_err(|e| {
            tracing::info!("Request failed: {}", e);
            ApiError::from(e)
        })?;

        tracing::info!("Request returned with status {}", response.status);
        tracing::debug!("Request returned content: {}", response.text());

        if !response.is_success() {
            let err = error_from_response(&response);
            tracing::info!("{}", err);
            return Err(err);
        }

        let root = parse_document(&response.body)?;
        Op::parse_response(&root)
    }
}

/// Map a non-2xx response to a rate error, or a protocol error when the
/// body is not a Canada Post error envelope
fn error_from_response(response: &HttpResponse) -> ApiError {
    let root = match parse_document(&response.body) {
        Ok(root) => root,
        Err(_) => {
            return ApiError::Protocol(format!(
                "HTTP {} with a body that is not XML",
                response.status
            ))
        }
    };

    // Text is kept as sent: a padded code such as " 12345" is not numeric
    let code = find_descendant(&root, "code")
        .and_then(|e| e.get_text())
        .map(|text| text.into_owned())
        .filter(|text| !text.trim().is_empty());
    let message = find_descendant(&root, "description")
        .map(|e| e.get_text().map(|text| text.into_owned()).unwrap_or_default());

    match (code, message) {
        (Some(code), Some(message)) => ApiError::Rate {
            code: ErrorCode::parse(&code),
            message,
        },
        (None, _) => ApiError::Protocol(format!(
            "HTTP {} error response has no code",
            response.status
        )),
        (_, None) => ApiError::Protocol(format!(
            "HTTP {} error response has no description",
            response.status
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, Server};

    fn config() -> ClientConfig {
        ClientConfig::new(Credentials::new("2004381", "user", "pass"))
    }

    #[test]
    fn test_client_creation() {
        assert!(CanadaPostClient::new(config()).is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ClientConfig::new(Credentials::new("", "user", "pass"));
        assert!(matches!(CanadaPostClient::new(config), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_endpoint_url_per_server() {
        let client = CanadaPostClient::new(config()).unwrap();
        assert_eq!(
            client.endpoint_url("/rs/ship/price"),
            "https://soa-gw.canadapost.ca/rs/ship/price"
        );

        let client = CanadaPostClient::new(config().with_server(Server::Development)).unwrap();
        assert_eq!(
            client.endpoint_url("/rs/ship/price"),
            "https://ct.soa-gw.canadapost.ca/rs/ship/price"
        );
    }

    #[test]
    fn test_error_envelope_with_namespace() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
            <messages xmlns="http://www.canadapost.ca/ws/messages">
                <message>
                    <code>9111</code>
                    <description>From Postal Code is invalid</description>
                </message>
            </messages>"#;
        let err = error_from_response(&HttpResponse::new(400, body));

        match err {
            ApiError::Rate { code, message } => {
                assert_eq!(code, ErrorCode::Numeric(9111));
                assert_eq!(message, "From Postal Code is invalid");
            }
            other => panic!("Expected rate error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_envelope_empty_description() {
        let body = "<messages><message><code>E1</code><description/></message></messages>";
        match error_from_response(&HttpResponse::new(500, body)) {
            ApiError::Rate { code, message } => {
                assert_eq!(code, ErrorCode::Text("E1".to_string()));
                assert_eq!(message, "");
            }
            other => panic!("Expected rate error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_envelope_padded_code_stays_text() {
        let body = "<messages><message><code> 12345\n</code><description>Bad postal code</description></message></messages>";
        match error_from_response(&HttpResponse::new(400, body)) {
            ApiError::Rate { code, message } => {
                assert_eq!(code, ErrorCode::Text(" 12345\n".to_string()));
                assert_eq!(message, "Bad postal code");
            }
            other => panic!("Expected rate error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_envelope_missing_fields_is_protocol_error() {
        let no_code = "<messages><message><description>x</description></message></messages>";
        let empty_code = "<messages><message><code> </code><description>x</description></message></messages>";
        let no_description = "<messages><message><code>1</code></message></messages>";

        for body in [no_code, empty_code, no_description] {
            assert!(matches!(
                error_from_response(&HttpResponse::new(400, body)),
                ApiError::Protocol(_)
            ));
        }
    }

    #[test]
    fn test_error_body_not_xml_is_protocol_error() {
        let err = error_from_response(&HttpResponse::new(502, "<html>Bad Gateway"));
        match err {
            ApiError::Protocol(msg) => assert!(msg.contains("502")),
            other => panic!("Expected protocol error, got {:?}", other),
        }
    }
}
