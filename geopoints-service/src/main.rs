//! Geopoints Service - HTTP microservice for named geographic points.
//!
//! A REST API for storing points and querying them by great-circle distance.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GEOPOINTS_PORT` | HTTP server port | 3000 |
//! | `GEOPOINTS_DATABASE_URL` | PostgreSQL connection URL | None (in-memory store) |
//! | `RUST_LOG` | Log filter (e.g., "debug") | "geopoints_service=info,tower_http=info" |
//!
//! ## Endpoints
//!
//! - `POST /api/points/add` - Add a point
//! - `GET /api/points/getall` - List active points
//! - `PUT /api/points/update/{id}` - Overwrite an active point
//! - `GET /api/points/nearby?lat=X&long=Y&radius=R` - Points within R km, nearest first
//! - `GET /api/points/distance?lat1=..&long1=..&lat2=..&long2=..` - Pairwise distance
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use anyhow::Context;
use axum::Router;
use geopoints_service::{openapi, router, AppState, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geopoints_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env();

    tracing::info!(
        port = config.port,
        database = config.database_url.is_some(),
        "Starting geopoints service"
    );

    let store = config
        .open_store()
        .await
        .context("Failed to open point store")?;

    let state = AppState::new(store);

    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi()))
        .merge(router(state));

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
