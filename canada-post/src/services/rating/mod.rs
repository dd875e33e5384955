//! Rating service: GetRates
//!
//! Prices a parcel between two points. The request is a `mailing-scenario`
//! document; the response lists one `price-quote` per available service.

mod quote;

pub use quote::{Adjustment, PriceDetails, PriceOption, ServiceQuote, ServiceStandard, Taxes};

use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::io::Write;
use xmltree::Element;

use crate::config::{ClientConfig, Credentials};
use crate::model::{Destination, DestinationKind, Origin, Parcel};
use crate::xml::{self, write_leaf};
use crate::{ApiError, CanadaPostOperation};

/// Namespace of rating request and response documents
pub const RATE_NAMESPACE: &str = "http://www.canadapost.ca/ws/ship/rate-v2";

/// Media type for rating requests and responses
pub const RATE_MEDIA_TYPE: &str = "application/vnd.cpc.ship.rate-v2+xml";

/// GetRates operation
pub struct GetRatesOperation;

/// Request for GetRates operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRequest {
    pub parcel: Parcel,
    pub origin: Origin,
    pub destination: Destination,
}

impl RateRequest {
    pub fn new(parcel: Parcel, origin: Origin, destination: Destination) -> Self {
        Self {
            parcel,
            origin,
            destination,
        }
    }

    /// Check the fields Canada Post always requires
    pub fn validate(&self) -> Result<(), ApiError> {
        if !self.parcel.weight.is_finite() || self.parcel.weight <= 0.0 {
            return Err(ApiError::InvalidParameter(format!(
                "Parcel weight must be a positive number, got {}",
                self.parcel.weight
            )));
        }
        if self.origin.postal_code.trim().is_empty() {
            return Err(ApiError::InvalidParameter(
                "Origin postal code is required".to_string(),
            ));
        }
        if self.destination.country_code.trim().is_empty() {
            return Err(ApiError::InvalidParameter(
                "Destination country code is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl CanadaPostOperation for GetRatesOperation {
    type Request = RateRequest;
    type Response = Vec<ServiceQuote>;

    const PATH: &'static str = "/rs/ship/price";
    const MEDIA_TYPE: &'static str = RATE_MEDIA_TYPE;

    fn build_payload(request: &Self::Request, config: &ClientConfig) -> Result<Vec<u8>, ApiError> {
        request.validate()?;

        let mut writer = xml::writer(config.debug);
        writer
            .create_element("mailing-scenario")
            .with_attribute(("xmlns", RATE_NAMESPACE))
            .write_inner_content(|w| write_mailing_scenario(w, request, &config.credentials))?;

        Ok(writer.into_inner())
    }

    fn parse_response(root: &Element) -> Result<Self::Response, ApiError> {
        Ok(xml::children_named(root, "price-quote")
            .map(ServiceQuote::from_element)
            .collect())
    }
}

// Element order matters to Canada Post's validator
fn write_mailing_scenario<W: Write>(
    w: &mut Writer<W>,
    request: &RateRequest,
    credentials: &Credentials,
) -> quick_xml::Result<()> {
    write_leaf(w, "customer-number", &credentials.customer_number)?;
    if let Some(contract_id) = credentials.contract_id() {
        write_leaf(w, "contract-id", contract_id)?;
    }

    w.create_element("parcel-characteristics")
        .write_inner_content(|w| write_parcel(w, &request.parcel))?;

    write_leaf(w, "origin-postal-code", &request.origin.postal_code)?;

    w.create_element("destination")
        .write_inner_content(|w| write_destination(w, &request.destination))?;

    Ok(())
}

fn write_parcel<W: Write>(w: &mut Writer<W>, parcel: &Parcel) -> quick_xml::Result<()> {
    write_leaf(w, "weight", &parcel.weight.to_string())?;

    if let Some((length, width, height)) = parcel.dimensions() {
        w.create_element("dimensions").write_inner_content(|w| {
            write_leaf(w, "length", &length.to_string())?;
            write_leaf(w, "width", &width.to_string())?;
            write_leaf(w, "height", &height.to_string())
        })?;
    }

    Ok(())
}

fn write_destination<W: Write>(w: &mut Writer<W>, destination: &Destination) -> quick_xml::Result<()> {
    let (wrapper, leaf, value) = match destination.kind() {
        DestinationKind::Domestic => ("domestic", "postal-code", &destination.postal_code),
        DestinationKind::UnitedStates => ("united-states", "zip-code", &destination.postal_code),
        DestinationKind::International => ("international", "country-code", &destination.country_code),
    };

    w.create_element(wrapper)
        .write_inner_content(|w| write_leaf(w, leaf, value))?;

    Ok(())
}
