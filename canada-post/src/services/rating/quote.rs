//! Price quotes returned by the rating service

use xmltree::Element;

use crate::xml::{child_text, children_named};

/// One `<price-quote>` from a rating response
///
/// The full subtree is kept as returned by Canada Post and can be reached
/// through [`ServiceQuote::element`]. The fields most callers need are
/// extracted up front; any of them may be missing without the quote being
/// rejected. Amounts are kept as the decimal strings Canada Post sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceQuote {
    /// Service code, e.g. `DOM.EP`
    pub service_code: Option<String>,
    /// Human readable service name, e.g. `Expedited Parcel`
    pub service_name: Option<String>,
    pub price_details: Option<PriceDetails>,
    pub service_standard: Option<ServiceStandard>,
    element: Element,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceDetails {
    /// Base price before taxes, options and adjustments
    pub base: Option<String>,
    /// Total amount due
    pub due: Option<String>,
    pub taxes: Taxes,
    pub options: Vec<PriceOption>,
    pub adjustments: Vec<Adjustment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxes {
    pub gst: Option<String>,
    pub pst: Option<String>,
    pub hst: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceOption {
    pub code: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjustment {
    pub code: Option<String>,
    pub name: Option<String>,
    pub cost: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceStandard {
    pub am_delivery: Option<bool>,
    pub guaranteed_delivery: Option<bool>,
    /// Business days in transit
    pub expected_transit_time: Option<u32>,
    /// `YYYY-MM-DD`
    pub expected_delivery_date: Option<String>,
}

impl ServiceQuote {
    pub fn from_element(element: &Element) -> Self {
        Self {
            service_code: child_text(element, "service-code"),
            service_name: child_text(element, "service-name"),
            price_details: element.get_child("price-details").map(PriceDetails::from_element),
            service_standard: element
                .get_child("service-standard")
                .map(ServiceStandard::from_element),
            element: element.clone(),
        }
    }

    /// The raw `<price-quote>` subtree
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Text of any direct child of the quote, for fields not extracted above
    pub fn field(&self, name: &str) -> Option<String> {
        child_text(&self.element, name)
    }
}

impl PriceDetails {
    fn from_element(element: &Element) -> Self {
        let taxes = element
            .get_child("taxes")
            .map(|taxes| Taxes {
                gst: child_text(taxes, "gst"),
                pst: child_text(taxes, "pst"),
                hst: child_text(taxes, "hst"),
            })
            .unwrap_or_default();

        let options = element
            .get_child("options")
            .map(|options| {
                children_named(options, "option")
                    .map(|option| PriceOption {
                        code: child_text(option, "option-code"),
                        name: child_text(option, "option-name"),
                        price: child_text(option, "option-price"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let adjustments = element
            .get_child("adjustments")
            .map(|adjustments| {
                children_named(adjustments, "adjustment")
                    .map(|adjustment| Adjustment {
                        code: child_text(adjustment, "adjustment-code"),
                        name: child_text(adjustment, "adjustment-name"),
                        cost: child_text(adjustment, "adjustment-cost"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            base: child_text(element, "base"),
            due: child_text(element, "due"),
            taxes,
            options,
            adjustments,
        }
    }
}

impl ServiceStandard {
    fn from_element(element: &Element) -> Self {
        let flag = |name: &str| child_text(element, name).and_then(|v| v.parse::<bool>().ok());

        Self {
            am_delivery: flag("am-delivery"),
            guaranteed_delivery: flag("guaranteed-delivery"),
            expected_transit_time: child_text(element, "expected-transit-time")
                .and_then(|v| v.parse().ok()),
            expected_delivery_date: child_text(element, "expected-delivery-date"),
        }
    }
}
