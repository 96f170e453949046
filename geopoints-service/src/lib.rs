//! Geopoints Service Library
//!
//! HTTP handlers, routing and configuration for the points service.
//! This library is used by both the geopoints-service binary and integration tests.

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use geopoints::PointStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Application state shared across handlers.
pub struct AppState {
    /// Backing store for points.
    pub store: Arc<dyn PointStore>,
}

impl AppState {
    /// Wrap a store for sharing across handlers.
    pub fn new(store: Arc<dyn PointStore>) -> Arc<Self> {
        Arc::new(Self { store })
    }
}

/// OpenAPI documentation for the points service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geopoints Service",
        version = "0.1.0",
        description = "Create, read and update named geographic points, and query them by great-circle distance.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::add_point,
        handlers::get_all_points,
        handlers::update_point,
        handlers::get_nearby,
        handlers::get_distance,
        handlers::health_check,
    ),
    components(
        schemas(
            geopoints::Point,
            geopoints::NewPoint,
            geopoints::PointSummary,
            handlers::DistanceResponse,
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "points", description = "Point storage and proximity endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Routes mounted under `/api/points`.
fn point_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add", post(handlers::add_point))
        .route("/getall", get(handlers::get_all_points))
        .route("/update/:id", put(handlers::update_point))
        .route("/nearby", get(handlers::get_nearby))
        .route("/distance", get(handlers::get_distance))
}

/// Build the application router with tracing and CORS layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api/points", point_routes())
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

/// The OpenAPI document as served at `/api-docs/openapi.json`.
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

// Re-export commonly used types for convenience
pub use config::ServiceConfig;
pub use error::ApiError;
pub use handlers::{DistanceResponse, ErrorResponse, HealthResponse, NearbyQuery};
