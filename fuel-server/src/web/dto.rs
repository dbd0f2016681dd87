//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ServerConfig;
use crate::domain::RecordId;
use crate::store::{Document, Filter};

/// Default number of stations returned by a listing.
const DEFAULT_STATION_LIMIT: usize = 50;

/// Default number of price reports returned for a station.
const DEFAULT_PRICE_LIMIT: usize = 20;

/// Maximum number of collection names in a diagnostic report.
const MAX_REPORTED_COLLECTIONS: usize = 10;

/// Maximum length of an error excerpt in a diagnostic report.
const MAX_ERROR_EXCERPT: usize = 50;

/// Query parameters for listing stations.
#[derive(Debug, Deserialize)]
pub struct StationQuery {
    /// City, matched case-insensitively
    pub city: Option<String>,

    /// State code, matched after uppercasing
    pub state: Option<String>,

    /// Fuel type the station must offer, matched after lowercasing
    pub fuel_type: Option<String>,

    /// Maximum number of results
    #[serde(default = "default_station_limit")]
    pub limit: usize,
}

fn default_station_limit() -> usize {
    DEFAULT_STATION_LIMIT
}

impl StationQuery {
    /// Build the store filter for this query.
    ///
    /// Empty parameters are ignored.
    pub fn filter(&self) -> Filter {
        let present = |p: &Option<String>| {
            p.as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };

        let mut filter = Filter::new();
        if let Some(city) = present(&self.city) {
            filter = filter.equals_ignore_case("city", city);
        }
        if let Some(state) = present(&self.state) {
            filter = filter.equals("state", state.to_uppercase());
        }
        if let Some(fuel_type) = present(&self.fuel_type) {
            filter = filter.contains("fuel_types", fuel_type.to_lowercase());
        }
        filter
    }
}

/// Query parameters for listing a station's prices.
#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    /// Maximum number of results
    #[serde(default = "default_price_limit")]
    pub limit: usize,
}

fn default_price_limit() -> usize {
    DEFAULT_PRICE_LIMIT
}

/// Response for a created record.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Identifier of the new record
    pub id: String,
}

impl From<RecordId> for CreatedResponse {
    fn from(id: RecordId) -> Self {
        Self { id: id.to_string() }
    }
}

/// Liveness message.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub detail: String,
}

/// Convert a stored document to its public form.
///
/// The record id is exposed as an `id` string; every other field passes
/// through unchanged.
pub fn public_document(doc: Document) -> Map<String, Value> {
    let mut out = doc.fields;
    if let Some(id) = doc.id {
        out.insert("id".to_string(), Value::String(id.to_string()));
    }
    out
}

/// Store diagnostic report served by `/test`.
///
/// Building it never fails; problems are written into the status strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl DiagnosticReport {
    /// Start a report for a store that has not been checked yet.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: set_or_not(&config.database_url),
            database_name: set_or_not(&config.database_name),
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }

    /// Record that no store is connected.
    pub fn not_initialized(mut self) -> Self {
        self.database = "⚠️  Available but not initialized".to_string();
        self
    }

    /// Record a successful collection listing.
    pub fn working(mut self, collections: Vec<String>) -> Self {
        self.connection_status = "Connected".to_string();
        self.database = "✅ Connected & Working".to_string();
        self.collections = collections
            .into_iter()
            .take(MAX_REPORTED_COLLECTIONS)
            .collect();
        self
    }

    /// Record a store that is connected but failed to answer.
    pub fn failing(mut self, error: &str) -> Self {
        let excerpt: String = error.chars().take(MAX_ERROR_EXCERPT).collect();
        self.connection_status = "Connected".to_string();
        self.database = format!("⚠️  Connected but Error: {excerpt}");
        self
    }
}

fn set_or_not(value: &Option<String>) -> String {
    let status = if value.is_some() { "✅ Set" } else { "❌ Not Set" };
    status.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Condition;
    use serde_json::json;

    fn query(city: Option<&str>, state: Option<&str>, fuel_type: Option<&str>) -> StationQuery {
        StationQuery {
            city: city.map(String::from),
            state: state.map(String::from),
            fuel_type: fuel_type.map(String::from),
            limit: DEFAULT_STATION_LIMIT,
        }
    }

    #[test]
    fn no_parameters_means_no_conditions() {
        assert!(query(None, None, None).filter().is_empty());
        assert!(query(Some(""), Some(""), Some("")).filter().is_empty());
    }

    #[test]
    fn city_matches_ignoring_case() {
        let filter = query(Some("AuStIn"), None, None).filter();
        assert_eq!(
            filter.clauses(),
            &[(
                "city".to_string(),
                Condition::EqualsIgnoreCase("AuStIn".to_string())
            )]
        );
    }

    #[test]
    fn state_is_uppercased() {
        let filter = query(None, Some("tx"), None).filter();
        assert_eq!(
            filter.clauses(),
            &[("state".to_string(), Condition::Equals(json!("TX")))]
        );
    }

    #[test]
    fn fuel_type_is_lowercased_membership() {
        let filter = query(None, None, Some("DIESEL")).filter();
        assert_eq!(
            filter.clauses(),
            &[("fuel_types".to_string(), Condition::Contains(json!("diesel")))]
        );
    }

    #[test]
    fn limits_default() {
        let q: StationQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(q.limit, 50);

        let q: PriceQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(q.limit, 20);
    }

    #[test]
    fn public_document_renames_id() {
        let id = RecordId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let Value::Object(fields) = json!({"name": "Shell", "city": "Austin"}) else {
            unreachable!()
        };

        let out = public_document(Document {
            id: Some(id),
            fields,
        });

        assert_eq!(
            Value::Object(out),
            json!({"id": "65a1f0c2e4b0a1b2c3d4e5f6", "name": "Shell", "city": "Austin"})
        );
    }

    #[test]
    fn public_document_without_record_id() {
        let Value::Object(fields) = json!({"_id": "custom", "name": "Shell"}) else {
            unreachable!()
        };

        let out = public_document(Document { id: None, fields });
        assert!(!out.contains_key("id"));
        assert_eq!(out["_id"], "custom");
    }

    #[test]
    fn report_for_unconfigured_server() {
        let report = DiagnosticReport::new(&ServerConfig::default()).not_initialized();

        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "⚠️  Available but not initialized");
        assert_eq!(report.database_url, "❌ Not Set");
        assert_eq!(report.database_name, "❌ Not Set");
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.collections.is_empty());
    }

    #[test]
    fn report_caps_collections() {
        let names = (0..15).map(|n| format!("c{n}")).collect();
        let report = DiagnosticReport::new(&ServerConfig::default()).working(names);

        assert_eq!(report.collections.len(), 10);
        assert_eq!(report.collections[0], "c0");
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
    }

    #[test]
    fn report_truncates_errors() {
        let long = "x".repeat(80);
        let report = DiagnosticReport::new(&ServerConfig::default()).failing(&long);

        assert_eq!(
            report.database,
            format!("⚠️  Connected but Error: {}", "x".repeat(50))
        );
    }

    #[test]
    fn report_marks_configured_variables() {
        let config = ServerConfig {
            database_url: Some("mongodb://localhost".into()),
            database_name: Some("fuel".into()),
            port: 8000,
        };
        let report = DiagnosticReport::new(&config);

        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database_name, "✅ Set");
    }
}
