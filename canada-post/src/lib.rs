//! # Canada Post
//!
//! A typed, blocking client for the Canada Post shipping web services.
//!
//! The rating service prices a parcel between an origin and a destination
//! and returns one [`ServiceQuote`] per available service:
//!
//! ```rust,no_run
//! use canada_post::{CanadaPostClient, ClientConfig, Destination, Origin, Parcel};
//!
//! let client = CanadaPostClient::new(ClientConfig::from_env()?)?;
//! let quotes = client.get_rates(
//!     &Parcel::new(2.0),
//!     &Origin::new("K2B8J6"),
//!     &Destination::new("90210", "US"),
//! )?;
//! println!("{} services available", quotes.len());
//! # Ok::<(), canada_post::ApiError>(())
//! ```
//!
//! Failures come back as [`ApiError`]: `Rate` when Canada Post rejects the
//! request, `Transport` when it could not be reached, and `Protocol` when it
//! answered with something other than the documented XML.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod operation;
pub mod services;
pub mod xml;

pub use client::CanadaPostClient;
pub use config::{ClientConfig, Credentials, Server};
pub use error::{ApiError, ErrorCode};
pub use model::{Destination, DestinationKind, Origin, Parcel};
pub use operation::CanadaPostOperation;
pub use services::rating::{GetRatesOperation, RateRequest, ServiceQuote};

pub use cpc_transport::{HttpRequest, HttpResponse, HttpTransport, Transport, TransportError};

pub type Result<T> = std::result::Result<T, ApiError>;
