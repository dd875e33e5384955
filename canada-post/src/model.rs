//! Value objects describing what is shipped and where

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parcel to be rated
///
/// Weight is in kilograms and dimensions in centimetres, as Canada Post
/// expects them. Dimensions are only sent when all three are present and
/// strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub weight: f64,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl Parcel {
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            length: None,
            width: None,
            height: None,
        }
    }

    pub fn with_dimensions(mut self, length: f64, width: f64, height: f64) -> Self {
        self.length = Some(length);
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// `(length, width, height)` when every dimension is known and positive
    pub fn dimensions(&self) -> Option<(f64, f64, f64)> {
        match (self.length, self.width, self.height) {
            (Some(l), Some(w), Some(h)) if l > 0.0 && w > 0.0 && h > 0.0 => Some((l, w, h)),
            _ => None,
        }
    }
}

impl fmt::Display for Parcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kg", self.weight)?;
        if let Some((l, w, h)) = self.dimensions() {
            write!(f, " {}x{}x{}cm", l, w, h)?;
        }
        Ok(())
    }
}

/// Where the parcel is mailed from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub postal_code: String,
}

impl Origin {
    pub fn new(postal_code: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.postal_code)
    }
}

/// Where the parcel is going
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub postal_code: String,
    /// Two-letter ISO 3166 country code
    pub country_code: String,
}

/// How a destination is described in a mailing scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationKind {
    /// Canada, identified by postal code
    Domestic,
    /// United States, identified by zip code
    UnitedStates,
    /// Any other country, identified by country code only
    International,
}

impl Destination {
    pub fn new(postal_code: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
            country_code: country_code.into(),
        }
    }

    /// A Canadian destination
    pub fn domestic(postal_code: impl Into<String>) -> Self {
        Self::new(postal_code, "CA")
    }

    pub fn kind(&self) -> DestinationKind {
        match self.country_code.as_str() {
            "CA" => DestinationKind::Domestic,
            "US" => DestinationKind::UnitedStates,
            _ => DestinationKind::International,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.postal_code.is_empty() {
            f.write_str(&self.country_code)
        } else {
            write!(f, "{} {}", self.postal_code, self.country_code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(10.0), Some(20.0), Some(5.0), true)]
    #[case(Some(0.5), Some(0.5), Some(0.5), true)]
    #[case(Some(0.0), Some(20.0), Some(5.0), false)]
    #[case(Some(10.0), Some(-1.0), Some(5.0), false)]
    #[case(Some(10.0), Some(20.0), None, false)]
    #[case(None, None, None, false)]
    fn test_dimensions_require_all_positive(
        #[case] length: Option<f64>,
        #[case] width: Option<f64>,
        #[case] height: Option<f64>,
        #[case] expected: bool,
    ) {
        let parcel = Parcel {
            weight: 1.0,
            length,
            width,
            height,
        };
        assert_eq!(parcel.dimensions().is_some(), expected);
    }

    #[rstest]
    #[case("CA", DestinationKind::Domestic)]
    #[case("US", DestinationKind::UnitedStates)]
    #[case("FR", DestinationKind::International)]
    #[case("ZZ", DestinationKind::International)]
    #[case("ca", DestinationKind::International)]
    #[case("", DestinationKind::International)]
    fn test_destination_kind(#[case] country: &str, #[case] expected: DestinationKind) {
        assert_eq!(Destination::new("", country).kind(), expected);
    }

    #[test]
    fn test_display_for_logging() {
        let parcel = Parcel::new(1.5).with_dimensions(20.0, 10.0, 5.0);
        assert_eq!(parcel.to_string(), "1.5kg 20x10x5cm");
        assert_eq!(Parcel::new(2.0).to_string(), "2kg");
        assert_eq!(Origin::new("K2B8J6").to_string(), "K2B8J6");
        assert_eq!(Destination::domestic("J0E1X0").to_string(), "J0E1X0 CA");
        assert_eq!(Destination::new("", "FR").to_string(), "FR");
    }

    #[test]
    fn test_parcel_deserializes_without_dimensions() {
        let parcel: Parcel = serde_json::from_str(r#"{"weight": 1.2}"#).unwrap();
        assert_eq!(parcel, Parcel::new(1.2));
    }
}
