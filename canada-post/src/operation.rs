//! Operation trait implemented by each Canada Post web service call

use xmltree::Element;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Base trait for Canada Post REST operations
///
/// Each operation knows its resource path and versioned media type, how to
/// turn a typed request into the XML body, and how to turn the root element
/// of a successful response into a typed response. Transport, URL
/// resolution and error envelopes are handled once by
/// [`CanadaPostClient::execute`](crate::CanadaPostClient::execute).
pub trait CanadaPostOperation {
    /// The request type for this operation
    type Request;

    /// The parsed response type for this operation
    type Response;

    /// Resource path on the gateway, starting with `/`
    const PATH: &'static str;

    /// Versioned media type used for both `Accept` and `Content-Type`
    const MEDIA_TYPE: &'static str;

    /// Build the UTF-8 XML request body
    ///
    /// Must be a pure function of its arguments: identical inputs produce
    /// identical bytes.
    fn build_payload(request: &Self::Request, config: &ClientConfig) -> Result<Vec<u8>, ApiError>;

    /// Parse the root element of a 2xx response
    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError>;
}
