//! HTTP error mapping.
//!
//! Handlers return `Result<_, AppError>`; this is the one place where an
//! error kind becomes a status code and a JSON body.

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::error::Category;
use tracing::{error, warn};

use crate::domain::ValidationError;
use crate::store::StoreError;

use super::dto::ErrorResponse;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request, e.g. an invalid identifier or non-JSON body
    BadRequest { message: String },

    /// Referenced record does not exist
    NotFound { message: String },

    /// Well-formed payload that violates a record constraint
    Unprocessable { message: String },

    /// Store or other server-side failure
    Internal { message: String },
}

impl AppError {
    /// Status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message for the client.
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Unprocessable { message }
            | AppError::Internal { message } => message,
        }
    }

    pub(crate) fn invalid_station_id() -> Self {
        AppError::BadRequest {
            message: "Invalid station_id".to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Unprocessable {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            Category::Data => AppError::Unprocessable {
                message: e.to_string(),
            },
            Category::Syntax | Category::Eof | Category::Io => AppError::BadRequest {
                message: format!("Invalid JSON: {e}"),
            },
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(%status, message = self.message(), "request failed");
        } else {
            warn!(%status, message = self.message(), "request rejected");
        }

        let body = Json(ErrorResponse {
            detail: self.message().to_string(),
        });
        (status, body).into_response()
    }
}
