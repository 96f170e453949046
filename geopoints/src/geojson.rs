//! GeoJSON candidates for radius search.
//!
//! This module turns Point features into [`Coordinates`] candidates and writes
//! search results back as a FeatureCollection. Enable the `geojson` feature to
//! use this module.
//!
//! # Example
//!
//! ```ignore
//! use geopoints::distance::find_within_radius;
//! use geopoints::geojson::{located_features, nearby_feature_collection};
//! use geojson::FeatureCollection;
//!
//! let collection: FeatureCollection = std::fs::read_to_string("points.geojson")?.parse()?;
//! let candidates = located_features(collection)?;
//!
//! let nearby = find_within_radius(12.97, 77.59, 5.0, candidates);
//! let output = nearby_feature_collection(nearby);
//! // Each feature now carries a "distance_km" property
//! ```

use geojson::{Feature, FeatureCollection, JsonValue, Value as GeoJsonValue};

use crate::distance::{Coordinates, WithDistance};
use crate::error::{GeoPointsError, Result};

/// Property that marks a feature as soft-deleted.
pub const DELETED_PROPERTY: &str = "deleted";

/// Property written onto each result feature.
pub const DISTANCE_PROPERTY: &str = "distance_km";

/// A GeoJSON feature with a resolved Point position.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedFeature {
    /// The original feature, untouched.
    pub feature: Feature,
    /// Latitude taken from the geometry.
    pub lat: f64,
    /// Longitude taken from the geometry.
    pub lon: f64,
}

impl Coordinates for LocatedFeature {
    fn latitude(&self) -> f64 {
        self.lat
    }

    fn longitude(&self) -> f64 {
        self.lon
    }
}

/// Resolve every active Point feature of a collection.
///
/// GeoJSON positions are `[longitude, latitude, ...]`. Features whose
/// `deleted` property is `true` are skipped.
///
/// # Errors
///
/// Returns [`GeoPointsError::InvalidFeature`] if a feature has no geometry,
/// a geometry other than Point, or a position with fewer than 2 elements.
pub fn located_features(collection: FeatureCollection) -> Result<Vec<LocatedFeature>> {
    collection
        .features
        .into_iter()
        .enumerate()
        .filter(|(_, feature)| !is_deleted(feature))
        .map(|(index, feature)| locate(index, feature))
        .collect()
}

/// Build a FeatureCollection from search results.
///
/// Each feature gets a `distance_km` property; features keep the result order.
pub fn nearby_feature_collection(results: Vec<WithDistance<LocatedFeature>>) -> FeatureCollection {
    let features = results
        .into_iter()
        .map(|result| {
            let mut feature = result.item.feature;
            feature.set_property(DISTANCE_PROPERTY, result.distance_km);
            feature
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn is_deleted(feature: &Feature) -> bool {
    matches!(
        feature.property(DELETED_PROPERTY),
        Some(JsonValue::Bool(true))
    )
}

fn locate(index: usize, feature: Feature) -> Result<LocatedFeature> {
    let position = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(GeoJsonValue::Point(position)) => position,
        Some(_) => {
            return Err(GeoPointsError::InvalidFeature {
                index,
                message: "only Point geometries are supported".to_string(),
            })
        }
        None => {
            return Err(GeoPointsError::InvalidFeature {
                index,
                message: "missing geometry".to_string(),
            })
        }
    };

    if position.len() < 2 {
        return Err(GeoPointsError::InvalidFeature {
            index,
            message: "Coordinate must have at least 2 elements (lon, lat)".to_string(),
        });
    }

    let lon = position[0];
    let lat = position[1];

    Ok(LocatedFeature { feature, lat, lon })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::find_within_radius;
    use geojson::Geometry;

    fn point_feature(name: &str, lon: f64, lat: f64) -> Feature {
        let mut feature = Feature::from(Geometry::new(GeoJsonValue::Point(vec![lon, lat])));
        feature.set_property("name", name);
        feature
    }

    fn collection(features: Vec<Feature>) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    #[test]
    fn test_located_features_reads_lon_lat_order() {
        let located = located_features(collection(vec![point_feature("a", 77.59, 12.97)])).unwrap();

        assert_eq!(located.len(), 1);
        assert_eq!(located[0].lat, 12.97);
        assert_eq!(located[0].lon, 77.59);
    }

    #[test]
    fn test_located_features_skips_deleted() {
        let mut deleted = point_feature("gone", 1.0, 1.0);
        deleted.set_property(DELETED_PROPERTY, true);
        let mut kept = point_feature("kept", 2.0, 2.0);
        kept.set_property(DELETED_PROPERTY, false);

        let located = located_features(collection(vec![deleted, kept])).unwrap();

        assert_eq!(located.len(), 1);
        assert_eq!(
            located[0].feature.property("name"),
            Some(&JsonValue::from("kept"))
        );
    }

    #[test]
    fn test_located_features_rejects_other_geometries() {
        let line = Feature::from(Geometry::new(GeoJsonValue::LineString(vec![
            vec![0.0, 0.0],
            vec![1.0, 1.0],
        ])));

        let err = located_features(collection(vec![point_feature("ok", 0.0, 0.0), line]))
            .unwrap_err();

        assert!(matches!(err, GeoPointsError::InvalidFeature { index: 1, .. }));
    }

    #[test]
    fn test_located_features_rejects_short_position() {
        let short = Feature::from(Geometry::new(GeoJsonValue::Point(vec![1.0])));
        assert!(located_features(collection(vec![short])).is_err());
    }

    #[test]
    fn test_located_features_rejects_missing_geometry() {
        let empty = Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        let err = located_features(collection(vec![empty])).unwrap_err();
        assert!(err.to_string().contains("missing geometry"));
    }

    #[test]
    fn test_nearby_feature_collection_adds_distance() {
        let candidates = located_features(collection(vec![
            point_feature("far", 0.0, 1.0),
            point_feature("near", 0.0, 0.1),
            point_feature("outside", 0.0, 5.0),
        ]))
        .unwrap();

        let results = find_within_radius(0.0, 0.0, 200.0, candidates);
        let output = nearby_feature_collection(results);

        assert_eq!(output.features.len(), 2);
        assert_eq!(
            output.features[0].property("name"),
            Some(&JsonValue::from("near"))
        );

        let first = output.features[0]
            .property(DISTANCE_PROPERTY)
            .and_then(JsonValue::as_f64)
            .unwrap();
        let second = output.features[1]
            .property(DISTANCE_PROPERTY)
            .and_then(JsonValue::as_f64)
            .unwrap();
        assert!(first < second);
        assert!((second - 111.19).abs() < 0.1);
    }
}
