//! Fuel station records.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Number of characters in a state code.
const STATE_CODE_LEN: usize = 2;

/// A physical fuel retail location.
///
/// Required fields must be present in a payload; optional fields default
/// to `None`, lists to empty and `open_24_hours` to `false`.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::Station;
///
/// let station: Station = serde_json::from_str(
///     r#"{"name":"Shell","address":"1 Main St","city":"Austin","state":"TX"}"#,
/// ).unwrap();
///
/// assert!(station.validate().is_ok());
/// assert!(station.fuel_types.is_empty());
/// assert!(!station.open_24_hours);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station name
    pub name: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// Two-character state code
    pub state: String,

    /// ZIP or postal code
    #[serde(default)]
    pub zip_code: Option<String>,

    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Available fuel types, e.g. "regular", "midgrade", "premium", "diesel"
    #[serde(default)]
    pub fuel_types: Vec<String>,

    /// Amenities like "car_wash", "air_pump", "atm", "restroom"
    #[serde(default)]
    pub amenities: Vec<String>,

    /// Whether the station never closes
    #[serde(default)]
    pub open_24_hours: bool,

    /// Free-text opening hours
    #[serde(default)]
    pub hours: Option<String>,
}

impl Station {
    /// Create a station with the required fields and defaults elsewhere.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            city: city.into(),
            state: state.into(),
            zip_code: None,
            latitude: None,
            longitude: None,
            phone: None,
            fuel_types: Vec::new(),
            amenities: Vec::new(),
            open_24_hours: false,
            hours: None,
        }
    }

    /// Set the available fuel types.
    pub fn with_fuel_types<I, S>(mut self, fuel_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fuel_types = fuel_types.into_iter().map(Into::into).collect();
        self
    }

    /// Check the field constraints, reporting the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let state_len = self.state.chars().count();
        if state_len != STATE_CODE_LEN {
            return Err(ValidationError::WrongLength {
                field: "state",
                expected: STATE_CODE_LEN,
                actual: state_len,
            });
        }

        for (field, value) in [("latitude", self.latitude), ("longitude", self.longitude)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ValidationError::NotFinite { field });
            }
        }

        Ok(())
    }
}
