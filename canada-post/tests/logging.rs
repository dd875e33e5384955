//! Global subscriber installation, isolated in its own test binary

use canada_post::logging::{init_logging, init_logging_for, LoggingError, LoggingMode};
use canada_post::{ClientConfig, Credentials};

#[test]
fn test_global_subscriber_installs_once() {
    let config = ClientConfig::new(Credentials::new("2004381", "api-user", "api-pass"));

    assert!(init_logging(LoggingMode::Silent).is_ok());
    assert!(init_logging_for(&config).is_ok());
    assert!(matches!(
        init_logging(LoggingMode::Wire),
        Err(LoggingError::TracingInit(_))
    ));
}
