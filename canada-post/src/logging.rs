//! Logging setup for applications using the Canada Post client
//!
//! The client only emits `tracing` events under the `canada_post` and
//! `cpc_transport` targets. Applications that do not install their own
//! subscriber can use [`init_logging`] to print those events on stderr.
//!
//! [`LoggingMode::Wire`] includes full request and response bodies, which
//! carry the customer number and contract id. Avoid it where logs are
//! shipped off the machine.

use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::ClientConfig;

/// Environment variable holding a filter directive that replaces the
/// mode's default, e.g. `canada_post=debug`
pub const LOG_FILTER_ENV: &str = "CPC_LOG";

/// How much of the client's activity is logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber is installed
    Silent,
    /// Call start, URL, status and errors
    Info,
    /// Everything in `Info` plus request and response bodies and
    /// transport traces
    Wire,
}

impl LoggingMode {
    /// `Wire` when the client is configured for debugging, `Info` otherwise
    pub fn for_config(config: &ClientConfig) -> Self {
        if config.debug {
            LoggingMode::Wire
        } else {
            LoggingMode::Info
        }
    }

    /// Parse `silent`, `info`, `wire` or `debug` (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "silent" | "off" => Some(LoggingMode::Silent),
            "info" => Some(LoggingMode::Info),
            "wire" | "debug" => Some(LoggingMode::Wire),
            _ => None,
        }
    }

    /// Filter directive scoped to the client's targets
    pub fn filter_directive(self) -> Option<&'static str> {
        match self {
            LoggingMode::Silent => None,
            LoggingMode::Info => Some("canada_post=info,cpc_transport=info"),
            LoggingMode::Wire => Some("canada_post=debug,cpc_transport=trace"),
        }
    }
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Install a global stderr subscriber for `mode`
///
/// `CPC_LOG` replaces the mode's filter directive when set. Fails if a
/// global subscriber is already installed.
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    let filter_override = std::env::var(LOG_FILTER_ENV).ok();
    match build_subscriber(mode, filter_override.as_deref(), std::io::stderr, true) {
        Some(subscriber) => tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| LoggingError::TracingInit(e.to_string())),
        None => Ok(()),
    }
}

/// Install a global subscriber matching the client configuration's debug flag
pub fn init_logging_for(config: &ClientConfig) -> Result<(), LoggingError> {
    init_logging(LoggingMode::for_config(config))
}

/// Directive used for `mode`, letting a non-blank override win
fn effective_directive(mode: LoggingMode, filter_override: Option<&str>) -> Option<String> {
    let default = mode.filter_directive()?;
    match filter_override.map(str::trim) {
        Some(directive) if !directive.is_empty() => Some(directive.to_string()),
        _ => Some(default.to_string()),
    }
}

fn build_subscriber<W>(
    mode: LoggingMode,
    filter_override: Option<&str>,
    make_writer: W,
    ansi: bool,
) -> Option<Box<dyn Subscriber + Send + Sync>>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let directive = effective_directive(mode, filter_override)?;
    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .with_writer(make_writer)
                .with_ansi(ansi)
                .with_target(true)
                .compact(),
        )
        .with(EnvFilter::new(directive));

    Some(Box::new(subscriber))
}
