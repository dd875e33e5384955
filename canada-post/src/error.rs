use cpc_transport::TransportError;
use std::fmt;
use thiserror::Error;

/// Error code reported by the Canada Post error envelope
///
/// Canada Post codes are usually numeric, but some services report symbolic
/// codes. Numeric codes are only produced when the text is made entirely of
/// ASCII digits and fits in a `u64`; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Numeric(u64),
    Text(String),
}

impl ErrorCode {
    /// Interpret the text of a `<code>` element
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(code) = raw.parse::<u64>() {
                return ErrorCode::Numeric(code);
            }
        }
        ErrorCode::Text(raw.to_string())
    }

    pub fn as_numeric(&self) -> Option<u64> {
        match self {
            ErrorCode::Numeric(code) => Some(*code),
            ErrorCode::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Numeric(code) => write!(f, "{}", code),
            ErrorCode::Text(code) => f.write_str(code),
        }
    }
}

/// High-level errors for Canada Post service calls
///
/// The variants separate the failure modes a caller may want to handle
/// differently: a business rejection from Canada Post, a failure to reach
/// the service at all, and a response that does not follow the protocol.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Canada Post rejected the request
    ///
    /// Returned for non-2xx responses carrying a well-formed error envelope,
    /// e.g. an invalid postal code or an unsupported service.
    #[error("Canada Post error {code}: {message}")]
    Rate { code: ErrorCode, message: String },

    /// The HTTP exchange itself failed (connection, TLS, timeout)
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body was not valid XML or lacked required elements
    #[error("Protocol violation: {0}")]
    Protocol(String),

    /// A request parameter is out of range or missing
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid or missing client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request document could not be written
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn is_rate_error(&self) -> bool {
        matches!(self, ApiError::Rate { .. })
    }

    /// The vendor error code, if this is a rate error
    pub fn rate_code(&self) -> Option<&ErrorCode> {
        match self {
            ApiError::Rate { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for ApiError {
    fn from(err: quick_xml::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12345", ErrorCode::Numeric(12345))]
    #[case("0", ErrorCode::Numeric(0))]
    #[case("007", ErrorCode::Numeric(7))]
    #[case("INVALID_ADDR", ErrorCode::Text("INVALID_ADDR".to_string()))]
    #[case("-12", ErrorCode::Text("-12".to_string()))]
    #[case("12 34", ErrorCode::Text("12 34".to_string()))]
    #[case("", ErrorCode::Text(String::new()))]
    #[case("99999999999999999999999", ErrorCode::Text("99999999999999999999999".to_string()))]
    fn test_error_code_parse(#[case] raw: &str, #[case] expected: ErrorCode) {
        assert_eq!(ErrorCode::parse(raw), expected);
    }

    #[test]
    fn test_rate_error_display() {
        let err = ApiError::Rate {
            code: ErrorCode::Numeric(12345),
            message: "Bad postal code".to_string(),
        };
        assert_eq!(err.to_string(), "Canada Post error 12345: Bad postal code");
        assert!(err.is_rate_error());
        assert_eq!(err.rate_code().and_then(ErrorCode::as_numeric), Some(12345));
    }

    #[test]
    fn test_transport_error_is_not_rate_error() {
        let err: ApiError = TransportError::Network("connection refused".to_string()).into();
        assert!(!err.is_rate_error());
        assert!(err.rate_code().is_none());
        assert!(err.to_string().contains("connection refused"));
    }
}
