//! HTTP request handlers for the points service.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use geopoints::{distance_km, find_within_radius, NewPoint, Point, PointSummary, WithDistance};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, StoreResultExt};
use crate::AppState;

/// Message for a proximity query with missing parameters.
pub const NEARBY_PARAMS_REQUIRED: &str = "lat, long, and radius are required query params";

/// Message for a distance query with missing parameters.
pub const DISTANCE_PARAMS_REQUIRED: &str =
    "lat1, long1, lat2, and long2 are required query params";

/// Query parameters for the nearby endpoint.
///
/// Values arrive as raw strings so that absence and bad numbers can be told
/// apart and reported as JSON errors.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyQuery {
    /// Reference latitude in decimal degrees.
    pub lat: Option<String>,
    /// Reference longitude in decimal degrees.
    pub long: Option<String>,
    /// Search radius in kilometers (exclusive).
    pub radius: Option<String>,
}

/// Query parameters for the distance endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DistanceQuery {
    /// Latitude of the first point.
    pub lat1: Option<String>,
    /// Longitude of the first point.
    pub long1: Option<String>,
    /// Latitude of the second point.
    pub lat2: Option<String>,
    /// Longitude of the second point.
    pub long2: Option<String>,
}

/// Pairwise distance response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DistanceResponse {
    /// Great-circle distance in kilometers.
    pub distance_km: f64,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// A nearby point: every stored field plus `distance_km`.
pub type NearbyPoint = WithDistance<Point>;

/// Add a point.
///
/// # Returns
///
/// - `201 Created` with the stored point
/// - `400 Bad Request` if the body is not a valid point
/// - `500 Internal Server Error` if the store fails
#[utoipa::path(
    post,
    path = "/api/points/add",
    tag = "points",
    request_body = NewPoint,
    responses(
        (status = 201, description = "Point created", body = Point),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn add_point(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewPoint>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new) = body.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    tracing::debug!(name = %new.name, lat = new.latitude, long = new.longitude, "Add point");

    let point = state
        .store
        .insert(new)
        .await
        .or_fail("Something went wrong")?;

    tracing::info!(id = point.id, name = %point.name, "Point added");

    Ok((StatusCode::CREATED, Json(point)))
}

/// List all active points.
#[utoipa::path(
    get,
    path = "/api/points/getall",
    tag = "points",
    responses(
        (status = 200, description = "All active points", body = [PointSummary]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_all_points(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PointSummary>>, ApiError> {
    let points = state
        .store
        .list_active()
        .await
        .or_fail("Failed to fetch points")?;

    tracing::debug!(count = points.len(), "Fetched points");

    Ok(Json(points.into_iter().map(PointSummary::from).collect()))
}

/// Overwrite an active point.
///
/// # Returns
///
/// - `200 OK` with the updated point
/// - `400 Bad Request` if the id or body is malformed
/// - `404 Not Found` if no active point has this id
/// - `500 Internal Server Error` if the store fails
#[utoipa::path(
    put,
    path = "/api/points/update/{id}",
    tag = "points",
    params(("id" = i64, Path, description = "Point id")),
    request_body = NewPoint,
    responses(
        (status = 200, description = "Point updated", body = Point),
        (status = 400, description = "Malformed id or body", body = ErrorResponse),
        (status = 404, description = "No active point with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn update_point(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<NewPoint>, JsonRejection>,
) -> Result<Json<Point>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let Json(update) = body.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    tracing::debug!(id, name = %update.name, "Update point");

    let point = state
        .store
        .update(id, update)
        .await
        .or_fail("Failed to update point")?
        .ok_or(ApiError::NotFound)?;

    tracing::info!(id, "Point updated");

    Ok(Json(point))
}

/// Active points strictly within `radius` km of (`lat`, `long`), nearest first.
///
/// # Returns
///
/// - `200 OK` with the matching points, each carrying `distance_km`
/// - `400 Bad Request` if a parameter is missing, repeated or not a number
/// - `500 Internal Server Error` if the store fails
#[utoipa::path(
    get,
    path = "/api/points/nearby",
    tag = "points",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Matching points ordered by distance, each with a `distance_km` field", body = [Point]),
        (status = 400, description = "Missing, repeated or non-numeric parameter", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_nearby(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Json<Vec<NearbyPoint>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    tracing::debug!(?query, "Nearby query");

    let (Some(lat), Some(long), Some(radius)) = (
        present(&query.lat),
        present(&query.long),
        present(&query.radius),
    ) else {
        return Err(ApiError::MissingParameters(NEARBY_PARAMS_REQUIRED));
    };

    let lat = parse_param("lat", lat)?;
    let long = parse_param("long", long)?;
    let radius = parse_param("radius", radius)?;

    let points = state
        .store
        .list_active()
        .await
        .or_fail("Failed to fetch nearby points")?;
    let candidates = points.len();

    let nearby = find_within_radius(lat, long, radius, points);

    tracing::info!(
        lat,
        long,
        radius,
        candidates,
        matches = nearby.len(),
        "Nearby points found"
    );

    Ok(Json(nearby))
}

/// Great-circle distance between two coordinates.
///
/// # Returns
///
/// - `200 OK` with `{"distance_km": n}`
/// - `400 Bad Request` if a parameter is missing, repeated or not a number
#[utoipa::path(
    get,
    path = "/api/points/distance",
    tag = "points",
    params(DistanceQuery),
    responses(
        (status = 200, description = "Distance in kilometers", body = DistanceResponse),
        (status = 400, description = "Missing, repeated or non-numeric parameter", body = ErrorResponse)
    )
)]
pub async fn get_distance(
    query: Result<Query<DistanceQuery>, QueryRejection>,
) -> Result<Json<DistanceResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    tracing::debug!(?query, "Distance query");

    let (Some(lat1), Some(long1), Some(lat2), Some(long2)) = (
        present(&query.lat1),
        present(&query.long1),
        present(&query.lat2),
        present(&query.long2),
    ) else {
        return Err(ApiError::MissingParameters(DISTANCE_PARAMS_REQUIRED));
    };

    let lat1 = parse_param("lat1", lat1)?;
    let long1 = parse_param("long1", long1)?;
    let lat2 = parse_param("lat2", lat2)?;
    let long2 = parse_param("long2", long2)?;

    let distance_km = distance_km(lat1, long1, lat2, long2);

    tracing::info!(lat1, long1, lat2, long2, distance_km, "Distance calculated");

    Ok(Json(DistanceResponse { distance_km }))
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// A parameter counts as given only if it is non-empty.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Parse a query parameter as a finite number.
fn parse_param(name: &'static str, raw: &str) -> Result<f64, ApiError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ApiError::InvalidParameter {
            name,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param_accepts_numbers() {
        assert_eq!(parse_param("lat", "12.97").unwrap(), 12.97);
        assert_eq!(parse_param("lat", " -33.5 ").unwrap(), -33.5);
        assert_eq!(parse_param("radius", "5").unwrap(), 5.0);
    }

    #[test]
    fn test_parse_param_rejects_non_numeric() {
        for raw in ["abc", "12.3.4", "NaN", "inf", "-infinity", "1e999"] {
            let err = parse_param("lat", raw).unwrap_err();
            assert!(
                matches!(err, ApiError::InvalidParameter { name: "lat", .. }),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_present_treats_empty_as_missing() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&Some("0".to_string())), Some("0"));
    }

    #[test]
    fn test_distance_response_serialize() {
        let json = serde_json::to_string(&DistanceResponse { distance_km: 12.5 }).unwrap();
        assert_eq!(json, r#"{"distance_km":12.5}"#);
    }

    #[test]
    fn test_health_response_serialize() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("0.1.0"));
    }
}
