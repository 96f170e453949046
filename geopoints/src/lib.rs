//! # geopoints - Named Geographic Points
//!
//! Great-circle distance engine and storage for named geographic points
//! (latitude/longitude plus address metadata).
//!
//! ## Features
//!
//! - **Pure distance engine**: spherical-law-of-cosines distance that never
//!   returns NaN, and a radius search that filters and orders any candidate
//!   type exposing coordinates
//! - **Soft delete**: deleted points are invisible to every read path
//! - **Pluggable storage**: in-memory store out of the box, PostgreSQL with the
//!   `postgres` feature
//! - **GeoJSON**: Point features as search candidates with the `geojson` feature
//!
//! ## Quick Start
//!
//! ```ignore
//! use geopoints::{find_within_radius, MemoryStore, NewPoint, PointStore};
//!
//! let store = MemoryStore::new();
//! store.insert(NewPoint::new("Cubbon Park", 12.9763, 77.5929)).await?;
//! store.insert(NewPoint::new("Mysore Palace", 12.3052, 76.6552)).await?;
//!
//! // Points within 10 km of MG Road, nearest first
//! let nearby = find_within_radius(12.9756, 77.6066, 10.0, store.list_active().await?);
//! assert_eq!(nearby.len(), 1);
//! println!("{}: {:.2} km", nearby[0].item.name, nearby[0].distance_km);
//! ```
//!
//! ## Distance Model
//!
//! Distances are computed on a sphere of radius 6371 km. Results are accurate
//! to within about 0.5% of the ellipsoidal distance, which is plenty for
//! proximity search.

pub mod distance;
pub mod error;
pub mod point;
pub mod store;

#[cfg(feature = "geojson")]
pub mod geojson;

#[cfg(feature = "postgres")]
pub mod pg;

// Re-export main types at crate root for convenience
pub use distance::{
    distance_between, distance_km, find_within_radius, Coordinates, LatLon, WithDistance,
    EARTH_RADIUS_KM,
};
pub use error::{GeoPointsError, Result};
pub use point::{NewPoint, Point, PointSummary};
pub use store::{MemoryStore, PointStore};

#[cfg(feature = "postgres")]
pub use pg::PgStore;
