//! Error types for the geopoints library.

use thiserror::Error;

/// Errors that can occur when storing or loading points.
#[derive(Error, Debug)]
pub enum GeoPointsError {
    /// The database rejected a statement or the pool is unavailable.
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A GeoJSON feature could not be read as a located point.
    #[error("Invalid feature at index {index}: {message}")]
    InvalidFeature { index: usize, message: String },

    /// The store's id sequence has no more values to hand out.
    #[error("Point id sequence exhausted")]
    IdExhausted,
}

/// Result type alias using [`GeoPointsError`].
pub type Result<T> = std::result::Result<T, GeoPointsError>;
