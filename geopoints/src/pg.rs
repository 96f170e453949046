//! PostgreSQL point store.
//!
//! Enable the `postgres` feature to use this module. Points live in
//! `spatials.spatialdata`; the schema and table are created on connect if
//! missing.

use async_trait::async_trait;
use sqlx::{Executor, FromRow, PgPool};

use crate::error::Result;
use crate::point::{NewPoint, Point};
use crate::store::PointStore;

/// Schema bootstrap, safe to run on every start.
pub const SCHEMA: &str = r#"
CREATE SCHEMA IF NOT EXISTS spatials;

CREATE TABLE IF NOT EXISTS spatials.spatialdata (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    lat DOUBLE PRECISION NOT NULL,
    long DOUBLE PRECISION NOT NULL,
    state TEXT,
    city TEXT,
    pincode TEXT,
    deleted BOOLEAN NOT NULL DEFAULT FALSE
);
"#;

#[derive(Debug, Clone, FromRow)]
struct PointRow {
    id: i64,
    name: String,
    description: Option<String>,
    lat: f64,
    long: f64,
    state: Option<String>,
    city: Option<String>,
    pincode: Option<String>,
    deleted: bool,
}

impl From<PointRow> for Point {
    fn from(row: PointRow) -> Self {
        Point {
            id: row.id,
            name: row.name,
            description: row.description,
            latitude: row.lat,
            longitude: row.long,
            state: row.state,
            city: row.city,
            pincode: row.pincode,
            deleted: row.deleted,
        }
    }
}

/// Point store backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to `database_url` and make sure the table exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeoPointsError::Database`] if the connection or the
    /// schema bootstrap fails.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        pool.execute(SCHEMA).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool. The schema is assumed to be in place.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PointStore for PgStore {
    async fn insert(&self, new: NewPoint) -> Result<Point> {
        let row: PointRow = sqlx::query_as(
            "
            INSERT INTO spatials.spatialdata (name, description, lat, long, state, city, pincode)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
            ",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.latitude)
        .bind(new.longitude)
        .bind(&new.state)
        .bind(&new.city)
        .bind(&new.pincode)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_active(&self) -> Result<Vec<Point>> {
        let rows: Vec<PointRow> = sqlx::query_as(
            "
            SELECT id, name, description, lat, long, state, city, pincode, deleted
            FROM spatials.spatialdata
            WHERE deleted = FALSE
            ORDER BY id;
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Point::from).collect())
    }

    async fn update(&self, id: i64, update: NewPoint) -> Result<Option<Point>> {
        let row: Option<PointRow> = sqlx::query_as(
            "
            UPDATE spatials.spatialdata
            SET name = $1,
                description = $2,
                lat = $3,
                long = $4,
                state = $5,
                city = $6,
                pincode = $7
            WHERE id = $8 AND deleted = FALSE
            RETURNING *;
            ",
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.latitude)
        .bind(update.longitude)
        .bind(&update.state)
        .bind(&update.city)
        .bind(&update.pincode)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Point::from))
    }

    async fn mark_deleted(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "
            UPDATE spatials.spatialdata
            SET deleted = TRUE
            WHERE id = $1 AND deleted = FALSE;
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
