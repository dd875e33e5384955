//! Exercises the reqwest-backed transport against a local mock server

use cpc_transport::{BasicAuth, HttpRequest, HttpTransport, Transport, TransportError};
use mockito::{Matcher, Server};

const MEDIA_TYPE: &str = "application/vnd.cpc.ship.rate-v2+xml";

fn rate_request(url: String) -> HttpRequest {
    HttpRequest::post(url, b"<mailing-scenario/>".to_vec())
        .header("Accept", MEDIA_TYPE)
        .header("Content-Type", MEDIA_TYPE)
        .header("Accept-Language", "en-CA")
        .basic_auth(BasicAuth::new("user", "pass"))
}

#[test]
fn test_post_sends_headers_auth_and_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/rs/ship/price")
        .match_header("accept", MEDIA_TYPE)
        .match_header("content-type", MEDIA_TYPE)
        .match_header("accept-language", "en-CA")
        // base64("user:pass")
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .match_body(Matcher::Exact("<mailing-scenario/>".to_string()))
        .with_status(200)
        .with_body("<price-quotes/>")
        .create();

    let transport = HttpTransport::new().unwrap();
    let response = transport
        .post(&rate_request(format!("{}/rs/ship/price", server.url())))
        .unwrap();

    mock.assert();
    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(response.text(), "<price-quotes/>");
}

#[test]
fn test_error_status_is_returned_as_response() {
    let mut server = Server::new();
    let body = "<messages><message><code>9111</code><description>Bad</description></message></messages>";
    let mock = server
        .mock("POST", "/rs/ship/price")
        .with_status(400)
        .with_body(body)
        .create();

    let transport = HttpTransport::new().unwrap();
    let response = transport
        .post(&rate_request(format!("{}/rs/ship/price", server.url())))
        .expect("non-2xx must not be a transport error");

    mock.assert();
    assert_eq!(response.status, 400);
    assert!(!response.is_success());
    assert_eq!(response.text(), body);
}

#[test]
fn test_unreachable_host_is_network_error() {
    let transport = HttpTransport::new().unwrap();
    // Port 9 on localhost is the discard service and is essentially never listening
    let result = transport.post(&rate_request("http://127.0.0.1:9/rs/ship/price".to_string()));

    match result {
        Err(TransportError::Network(_)) | Err(TransportError::Timeout(_)) => {}
        other => panic!("Expected network failure, got {:?}", other),
    }
}
