//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geopoints::GeoPointsError;
use thiserror::Error;

use crate::handlers::ErrorResponse;

/// Everything a handler can fail with.
///
/// Store failures display only their route-level message; the underlying
/// error is logged, never returned to the client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// One or more required query parameters are absent or empty.
    #[error("{0}")]
    MissingParameters(&'static str),

    /// A query parameter is present but not a finite number.
    #[error("invalid value for '{name}': {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// The request body or path could not be decoded.
    #[error("{0}")]
    InvalidRequest(String),

    /// No active point has the requested id.
    #[error("Point not found")]
    NotFound,

    /// The point store failed.
    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: GeoPointsError,
    },
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameters(_)
            | ApiError::InvalidParameter { .. }
            | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
            }
            _ => {
                tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
            }
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Attach a route-level message to store results.
pub trait StoreResultExt<T> {
    /// Turn a store error into [`ApiError::Store`] carrying `message`.
    fn or_fail(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for geopoints::Result<T> {
    fn or_fail(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|source| ApiError::Store { message, source })
    }
}
