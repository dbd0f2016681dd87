//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Map, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::domain::{Price, RecordId, Station};
use crate::store::{Document, DocumentStore, Filter, PRICES, STATIONS};

use super::dto::*;
use super::error::AppError;
use super::state::AppState;

/// Create the application router.
///
/// Cross-origin requests are allowed from any origin, with credentials.
pub fn create_router<S: DocumentStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/stations", get(list_stations::<S>).post(create_station::<S>))
        .route("/api/prices", post(add_price::<S>))
        .route("/api/prices/:station_id", get(get_prices::<S>))
        .route("/test", get(diagnostics::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Liveness message.
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Gas Station Info API is running",
    })
}

/// Create a station.
async fn create_station<S: DocumentStore>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let station: Station = serde_json::from_slice(&body)?;
    station.validate()?;

    let store = state.store()?;
    let id = store
        .insert(STATIONS, Document::fields_of(&station)?)
        .await?;

    info!(%id, name = %station.name, city = %station.city, "station created");
    Ok((StatusCode::CREATED, Json(id.into())))
}

/// List stations, optionally filtered by city, state and fuel type.
async fn list_stations<S: DocumentStore>(
    State(state): State<AppState<S>>,
    query: Result<Query<StationQuery>, QueryRejection>,
) -> Result<Json<Vec<Map<String, Value>>>, AppError> {
    let Query(query) = query?;
    let filter = query.filter();
    debug!(?filter, limit = query.limit, "listing stations");

    let docs = state.store()?.find(STATIONS, &filter, query.limit).await?;
    Ok(Json(docs.into_iter().map(public_document).collect()))
}

/// Record a price report for an existing station.
async fn add_price<S: DocumentStore>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let price: Price = serde_json::from_slice(&body)?;
    let station_id =
        RecordId::parse(&price.station_id).map_err(|_| AppError::invalid_station_id())?;

    let store = state.store()?;
    if store.find_by_id(STATIONS, station_id).await?.is_none() {
        return Err(AppError::NotFound {
            message: "Station not found".to_string(),
        });
    }

    price.validate()?;
    let id = store.insert(PRICES, Document::fields_of(&price)?).await?;

    info!(%id, %station_id, fuel_type = %price.fuel_type, price = price.price, "price recorded");
    Ok((StatusCode::CREATED, Json(id.into())))
}

/// List price reports for a station.
///
/// An unknown station yields an empty list rather than an error.
async fn get_prices<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(station_id): Path<String>,
    query: Result<Query<PriceQuery>, QueryRejection>,
) -> Result<Json<Vec<Map<String, Value>>>, AppError> {
    let Query(query) = query?;
    if !RecordId::is_valid(&station_id) {
        return Err(AppError::invalid_station_id());
    }

    // Prices store the station id as submitted, so match the raw text.
    let filter = Filter::new().equals("station_id", station_id);
    let docs = state.store()?.find(PRICES, &filter, query.limit).await?;
    Ok(Json(docs.into_iter().map(public_document).collect()))
}

/// Report process liveness and store connectivity.
///
/// Never fails: store errors are written into the report.
async fn diagnostics<S: DocumentStore>(State(state): State<AppState<S>>) -> Json<DiagnosticReport> {
    let report = DiagnosticReport::new(&state.config);

    let report = match state.store() {
        Err(_) => report.not_initialized(),
        Ok(store) => match store.collection_names().await {
            Ok(names) => report.working(names),
            Err(e) => report.failing(&e.to_string()),
        },
    };

    Json(report)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod routes_tests;
