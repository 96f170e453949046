//! Service configuration from environment variables.
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GEOPOINTS_PORT` | HTTP server port | 3000 |
//! | `GEOPOINTS_DATABASE_URL` | PostgreSQL connection URL | None (in-memory store) |

use std::net::SocketAddr;
use std::sync::Arc;

use geopoints::{MemoryStore, PgStore, PointStore};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable holding the HTTP port.
pub const PORT_VAR: &str = "GEOPOINTS_PORT";

/// Environment variable holding the PostgreSQL URL.
pub const DATABASE_URL_VAR: &str = "GEOPOINTS_DATABASE_URL";

/// Runtime configuration for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Port to listen on, on all interfaces.
    pub port: u16,
    /// PostgreSQL URL. The in-memory store is used when unset.
    pub database_url: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    ///
    /// An unparseable port falls back to the default; an empty database URL
    /// counts as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup(PORT_VAR) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_PORT,
                    "Invalid {}, using default",
                    PORT_VAR
                );
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let database_url = lookup(DATABASE_URL_VAR).filter(|url| !url.trim().is_empty());

        Self { port, database_url }
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Open the configured point store.
    ///
    /// # Errors
    ///
    /// Returns an error if a database URL is configured but the connection or
    /// schema bootstrap fails.
    pub async fn open_store(&self) -> geopoints::Result<Arc<dyn PointStore>> {
        match &self.database_url {
            Some(url) => {
                let store = PgStore::connect(url).await?;
                tracing::info!("Connected to PostgreSQL point store");
                Ok(Arc::new(store))
            }
            None => {
                tracing::warn!(
                    "{} not set, using in-memory store (points are lost on restart)",
                    DATABASE_URL_VAR
                );
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}
