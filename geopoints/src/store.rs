//! Point persistence.
//!
//! [`PointStore`] is the seam between the HTTP layer and whatever holds the
//! records. [`MemoryStore`] keeps everything in process; with the `postgres`
//! feature, [`crate::pg::PgStore`] talks to PostgreSQL.
//!
//! Every read honours the soft-delete flag: deleted points are never listed
//! and cannot be updated.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{GeoPointsError, Result};
use crate::point::{NewPoint, Point};

/// Storage backend for points.
#[async_trait]
pub trait PointStore: Send + Sync {
    /// Insert a new active point and return it with its assigned id.
    async fn insert(&self, new: NewPoint) -> Result<Point>;

    /// All active points, ordered by id.
    async fn list_active(&self) -> Result<Vec<Point>>;

    /// Overwrite the mutable fields of an active point.
    ///
    /// Returns `Ok(None)` if no active point has this id.
    async fn update(&self, id: i64, update: NewPoint) -> Result<Option<Point>>;

    /// Set the soft-delete flag on an active point.
    ///
    /// Returns `Ok(false)` if no active point has this id.
    async fn mark_deleted(&self, id: i64) -> Result<bool>;
}

/// In-process point store.
///
/// # Example
///
/// ```ignore
/// use geopoints::{MemoryStore, NewPoint, PointStore};
///
/// let store = MemoryStore::new();
/// let point = store.insert(NewPoint::new("Gateway", 18.922, 72.8347)).await?;
/// assert_eq!(point.id, 1);
/// assert_eq!(store.list_active().await?.len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    /// Points keyed by id, deleted ones included.
    points: RwLock<BTreeMap<i64, Point>>,
    /// Next id to hand out.
    next_id: AtomicI64,
}

impl MemoryStore {
    /// Create an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            points: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored points, deleted ones included.
    pub async fn len(&self) -> usize {
        self.points.read().await.len()
    }

    /// Whether the store holds no points at all.
    pub async fn is_empty(&self) -> bool {
        self.points.read().await.is_empty()
    }

    fn allocate_id(&self) -> Result<i64> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if id <= 0 {
            return Err(GeoPointsError::IdExhausted);
        }
        Ok(id)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PointStore for MemoryStore {
    async fn insert(&self, new: NewPoint) -> Result<Point> {
        let id = self.allocate_id()?;
        let point = Point::from_new(id, new);
        self.points.write().await.insert(id, point.clone());
        Ok(point)
    }

    async fn list_active(&self) -> Result<Vec<Point>> {
        let points = self.points.read().await;
        Ok(points.values().filter(|p| !p.deleted).cloned().collect())
    }

    async fn update(&self, id: i64, update: NewPoint) -> Result<Option<Point>> {
        let mut points = self.points.write().await;
        match points.get_mut(&id) {
            Some(point) if !point.deleted => {
                point.apply(update);
                Ok(Some(point.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn mark_deleted(&self, id: i64) -> Result<bool> {
        let mut points = self.points.write().await;
        match points.get_mut(&id) {
            Some(point) if !point.deleted => {
                point.deleted = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
