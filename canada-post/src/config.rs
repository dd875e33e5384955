//! Client configuration
//!
//! Everything a client needs to talk to Canada Post lives in an explicit
//! [`ClientConfig`] handed to the client at construction. The config is not
//! modified after that, so a client can be shared between threads.

use crate::{ApiError, Result};
use std::fmt;
use std::time::Duration;

/// Production gateway host
pub const PRODUCTION_HOST: &str = "soa-gw.canadapost.ca";

/// Development (customer testing) gateway host
pub const DEVELOPMENT_HOST: &str = "ct.soa-gw.canadapost.ca";

/// Default timeout for a full request
pub const DEFAULT_TIMEOUT: Duration = cpc_transport::DEFAULT_TIMEOUT;

/// Default timeout for opening the connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = cpc_transport::DEFAULT_CONNECT_TIMEOUT;

/// Which Canada Post gateway requests are sent to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Server {
    #[default]
    Production,
    Development,
    /// Any other host name, without scheme or path
    Custom(String),
}

impl Server {
    pub fn host(&self) -> &str {
        match self {
            Server::Production => PRODUCTION_HOST,
            Server::Development => DEVELOPMENT_HOST,
            Server::Custom(host) => host,
        }
    }

    /// Parse `production`, `development` (or `dev`), or a host name
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "production" | "prod" => Server::Production,
            "development" | "dev" => Server::Development,
            _ => Server::Custom(name.trim().to_string()),
        }
    }
}

/// Account credentials issued by Canada Post
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Customer number, sent in every mailing scenario
    pub customer_number: String,
    /// Contract number for negotiated rates
    pub contract_number: Option<String>,
    /// API key user name
    pub username: String,
    /// API key password
    pub password: String,
}

impl Credentials {
    pub fn new(
        customer_number: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            customer_number: customer_number.into(),
            contract_number: None,
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn with_contract_number(mut self, contract_number: impl Into<String>) -> Self {
        self.contract_number = Some(contract_number.into());
        self
    }

    /// The contract number to send, if one is meaningfully configured
    ///
    /// Empty, blank and all-zero values are treated as "no contract". Any
    /// other value is returned exactly as configured.
    pub fn contract_id(&self) -> Option<&str> {
        self.contract_number.as_deref().filter(|id| {
            let id = id.trim();
            !id.is_empty() && !id.bytes().all(|b| b == b'0')
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("customer_number", &self.customer_number)
            .field("contract_number", &self.contract_number)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration for a [`CanadaPostClient`](crate::CanadaPostClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,

    /// Target gateway
    /// Default: production
    pub server: Server,

    /// Pretty-print outgoing XML documents
    /// Default: false
    pub debug: bool,

    /// Timeout for a full request/response exchange
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Timeout for establishing the connection
    /// Default: 10 seconds
    pub connect_timeout: Duration,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            server: Server::default(),
            debug: false,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.server = server;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Load configuration from `CPC_*` environment variables
    ///
    /// - `CPC_CUSTOMER_NUMBER`, `CPC_USERNAME`, `CPC_PASSWORD` (required)
    /// - `CPC_CONTRACT_NUMBER` (optional)
    /// - `CPC_SERVER`: `production`, `development` or a host name
    /// - `CPC_DEBUG`: `1`, `true` or `yes` to pretty-print requests
    /// - `CPC_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ApiError::Config(format!("Missing environment variable {}", key)))
        };

        let mut credentials = Credentials::new(
            required("CPC_CUSTOMER_NUMBER")?,
            required("CPC_USERNAME")?,
            required("CPC_PASSWORD")?,
        );
        if let Some(contract) = lookup("CPC_CONTRACT_NUMBER") {
            credentials = credentials.with_contract_number(contract);
        }

        let mut config = Self::new(credentials);

        if let Some(server) = lookup("CPC_SERVER") {
            config.server = Server::from_name(&server);
        }

        if let Some(debug) = lookup("CPC_DEBUG") {
            config.debug = matches!(
                debug.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }

        if let Some(secs) = lookup("CPC_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                ApiError::Config(format!("CPC_TIMEOUT_SECS is not a number of seconds: {}", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<()> {
        if self.credentials.customer_number.trim().is_empty() {
            return Err(ApiError::Config("Customer number must not be empty".to_string()));
        }

        if self.credentials.username.is_empty() {
            return Err(ApiError::Config("Username must not be empty".to_string()));
        }

        let host = self.server.host();
        if host.is_empty() {
            return Err(ApiError::Config("Server host must not be empty".to_string()));
        }
        if host.contains("://") || host.contains('/') || host.chars().any(char::is_whitespace) {
            return Err(ApiError::Config(format!(
                "Server must be a bare host name, got '{}'",
                host
            )));
        }

        if self.timeout == Duration::ZERO || self.connect_timeout == Duration::ZERO {
            return Err(ApiError::Config("Timeouts must be greater than 0".to_string()));
        }

        Ok(())
    }
}
