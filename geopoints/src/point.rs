//! Point records and their request/response projections.
//!
//! The JSON field names follow the `spatials.spatialdata` table columns, so
//! coordinates travel as `lat`/`long` everywhere except the "fetch all"
//! projection, which spells them out as `latitude`/`longitude`.

use serde::{Deserialize, Serialize};

use crate::distance::Coordinates;

/// A stored geographic point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Point {
    /// Identifier assigned by the store.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Latitude in decimal degrees (-90 to 90).
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180).
    #[serde(rename = "long")]
    pub longitude: f64,
    /// State or province.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Postal code.
    pub pincode: Option<String>,
    /// Soft-delete flag. Deleted points are invisible to every read path.
    #[serde(default)]
    pub deleted: bool,
}

impl Point {
    /// Build an active point from its id and field values.
    pub fn from_new(id: i64, new: NewPoint) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            latitude: new.latitude,
            longitude: new.longitude,
            state: new.state,
            city: new.city,
            pincode: new.pincode,
            deleted: false,
        }
    }

    /// Overwrite every mutable field. The id and deleted flag are kept.
    pub fn apply(&mut self, update: NewPoint) {
        self.name = update.name;
        self.description = update.description;
        self.latitude = update.latitude;
        self.longitude = update.longitude;
        self.state = update.state;
        self.city = update.city;
        self.pincode = update.pincode;
    }
}

impl Coordinates for Point {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Field values for inserting or fully overwriting a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewPoint {
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[serde(rename = "long")]
    pub longitude: f64,
    /// State or province.
    #[serde(default)]
    pub state: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub pincode: Option<String>,
}

impl NewPoint {
    /// Create field values with only the required fields set.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            latitude,
            longitude,
            state: None,
            city: None,
            pincode: None,
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set state, city and pincode in one go.
    pub fn address(
        mut self,
        state: impl Into<String>,
        city: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Self {
        self.state = Some(state.into());
        self.city = Some(city.into());
        self.pincode = Some(pincode.into());
        self
    }
}

/// The "fetch all" projection of a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PointSummary {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-text description, if any.
    pub description: Option<String>,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl From<&Point> for PointSummary {
    fn from(point: &Point) -> Self {
        Self {
            id: point.id,
            name: point.name.clone(),
            description: point.description.clone(),
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

impl From<Point> for PointSummary {
    fn from(point: Point) -> Self {
        Self {
            id: point.id,
            name: point.name,
            description: point.description,
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}
