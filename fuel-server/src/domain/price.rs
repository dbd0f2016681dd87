//! Fuel price reports.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A single fuel price observation at a station.
///
/// `station_id` is kept as the text that was submitted; the web layer
/// checks it is a well-formed [`RecordId`](super::RecordId) naming an
/// existing station before the report is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Identifier of the station the price was seen at
    pub station_id: String,

    /// Fuel type: regular | midgrade | premium | diesel
    pub fuel_type: String,

    /// Price per gallon
    pub price: f64,

    /// Where the price came from (user, web, sign)
    #[serde(default)]
    pub source: Option<String>,
}

impl Price {
    /// Create a price report with no source.
    pub fn new(station_id: impl Into<String>, fuel_type: impl Into<String>, price: f64) -> Self {
        Self {
            station_id: station_id.into(),
            fuel_type: fuel_type.into(),
            price,
            source: None,
        }
    }

    /// Check the field constraints, reporting the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.price.is_finite() {
            return Err(ValidationError::NotFinite { field: "price" });
        }
        if self.price <= 0.0 {
            return Err(ValidationError::NotGreaterThan {
                field: "price",
                bound: 0.0,
                actual: self.price,
            });
        }
        Ok(())
    }
}
