//! Great-circle distance and radius search.
//!
//! This module provides the two pure operations every proximity query is built
//! from:
//!
//! - [`distance_km`]: spherical-law-of-cosines distance between two coordinates
//! - [`find_within_radius`]: filter and order candidates by distance from a
//!   reference coordinate
//!
//! Both are stateless and safe to call from any number of tasks at once.
//!
//! # Example
//!
//! ```
//! use geopoints::distance::{distance_km, find_within_radius, LatLon};
//!
//! // Quarter of a great circle along the equator
//! let d = distance_km(0.0, 0.0, 0.0, 90.0);
//! assert!((d - 10_007.543).abs() < 0.01);
//!
//! let candidates = vec![LatLon::new(0.0, 0.1), LatLon::new(0.0, 1.0)];
//! let nearby = find_within_radius(0.0, 0.0, 50.0, candidates);
//! assert_eq!(nearby.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Anything that sits at a latitude/longitude in decimal degrees.
///
/// Implemented by stored points and by the CLI's file-backed candidates, so
/// the same radius search serves both.
pub trait Coordinates {
    /// Latitude in decimal degrees.
    fn latitude(&self) -> f64;
    /// Longitude in decimal degrees.
    fn longitude(&self) -> f64;
}

impl<T: Coordinates + ?Sized> Coordinates for &T {
    fn latitude(&self) -> f64 {
        (**self).latitude()
    }

    fn longitude(&self) -> f64 {
        (**self).longitude()
    }
}

/// A bare coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

impl LatLon {
    /// Create a new coordinate pair.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl Coordinates for LatLon {
    fn latitude(&self) -> f64 {
        self.lat
    }

    fn longitude(&self) -> f64 {
        self.lon
    }
}

/// A candidate together with its distance from a reference coordinate.
///
/// Serializes as the candidate's own fields plus `distance_km`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithDistance<T> {
    /// The candidate that matched.
    #[serde(flatten)]
    pub item: T,
    /// Great-circle distance from the reference, in kilometers.
    pub distance_km: f64,
}

/// Great-circle distance between two coordinates, in kilometers.
///
/// Uses the spherical law of cosines:
///
/// ```text
/// R · acos( cos φ1 · cos φ2 · cos(λ2 − λ1) + sin φ1 · sin φ2 )
/// ```
///
/// with `R` = [`EARTH_RADIUS_KM`]. The acos argument is clamped to `[-1, 1]`,
/// so identical and antipodal points yield `0` and `R·π` instead of NaN.
///
/// No range validation is performed; any finite input yields a finite,
/// non-negative result.
///
/// # Arguments
///
/// * `lat1`, `lon1` - First coordinate in decimal degrees
/// * `lat2`, `lon2` - Second coordinate in decimal degrees
///
/// # Example
///
/// ```
/// use geopoints::distance::distance_km;
///
/// // North Pole to South Pole
/// let d = distance_km(90.0, 0.0, -90.0, 0.0);
/// assert!((d - 20_015.087).abs() < 0.01);
/// ```
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // cos²φ + sin²φ rounds to 1 - ε, which acos turns into ~1e-4 km
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = lon2.to_radians() - lon1.to_radians();

    let cos_angle = phi1.cos() * phi2.cos() * delta_lambda.cos() + phi1.sin() * phi2.sin();

    EARTH_RADIUS_KM * cos_angle.clamp(-1.0, 1.0).acos()
}

/// Distance between two [`Coordinates`] values, in kilometers.
pub fn distance_between<A: Coordinates, B: Coordinates>(a: &A, b: &B) -> f64 {
    distance_km(a.latitude(), a.longitude(), b.latitude(), b.longitude())
}

/// Find every candidate strictly closer than `radius_km` to the reference.
///
/// Results are ordered by ascending distance. The sort is stable, so
/// candidates at equal distance keep their input order. A candidate exactly
/// on the boundary (`distance == radius_km`) is excluded.
///
/// # Arguments
///
/// * `reference_lat`, `reference_lon` - Reference coordinate in decimal degrees
/// * `radius_km` - Exclusive search radius in kilometers
/// * `candidates` - Points to test; callers pass only active points
///
/// # Returns
///
/// The matching candidates, each wrapped with its computed distance. Empty
/// input, or no match, yields an empty vector.
pub fn find_within_radius<T, I>(
    reference_lat: f64,
    reference_lon: f64,
    radius_km: f64,
    candidates: I,
) -> Vec<WithDistance<T>>
where
    T: Coordinates,
    I: IntoIterator<Item = T>,
{
    let mut matches: Vec<WithDistance<T>> = candidates
        .into_iter()
        .filter_map(|item| {
            let distance_km = distance_km(
                reference_lat,
                reference_lon,
                item.latitude(),
                item.longitude(),
            );
            (distance_km < radius_km).then_some(WithDistance { item, distance_km })
        })
        .collect();

    matches.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    /// Offset east along the equator that lands `km` kilometers from (0, 0).
    fn equator_offset(km: f64) -> LatLon {
        LatLon::new(0.0, (km / EARTH_RADIUS_KM).to_degrees())
    }

    #[test]
    fn test_identical_points_are_zero() {
        let coords = [
            (0.0, 0.0),
            (35.3606, 138.7274),
            (-33.8688, 151.2093),
            (89.9999, -179.9999),
            (-90.0, 0.0),
            (12.971599, 77.594566),
        ];

        for (lat, lon) in coords {
            let d = distance_km(lat, lon, lat, lon);
            assert!(!d.is_nan(), "NaN for ({lat}, {lon})");
            assert!(d.abs() < TOLERANCE, "expected 0 for ({lat}, {lon}), got {d}");
        }
    }

    #[test]
    fn test_near_identical_points_are_finite() {
        let d = distance_km(19.0760, 72.8777, 19.0760, 72.877_700_000_001);
        assert!(d.is_finite());
        assert!(d >= 0.0);
        assert!(d < 0.01);
    }

    #[test]
    fn test_quarter_great_circle() {
        let d = distance_km(0.0, 0.0, 0.0, 90.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;
        assert!((d - expected).abs() < 1e-6);
        assert!((d - 10_007.5).abs() < 0.1);
    }

    #[test]
    fn test_pole_to_pole() {
        let d = distance_km(90.0, 0.0, -90.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI;
        assert!(!d.is_nan());
        assert!((d - expected).abs() < 1e-6);
        assert!((d - 20_015.1).abs() < 0.1);
    }

    #[test]
    fn test_antipodal_points_do_not_nan() {
        let d = distance_km(10.0, 20.0, -10.0, -160.0);
        assert!(!d.is_nan());
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 0.01);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ((12.9716, 77.5946), (28.7041, 77.1025)),
            ((-33.8688, 151.2093), (51.5074, -0.1278)),
            ((0.0, 179.9), (0.0, -179.9)),
            ((45.0, 45.0), (45.0000001, 45.0)),
        ];

        for ((lat1, lon1), (lat2, lon2)) in pairs {
            let forward = distance_km(lat1, lon1, lat2, lon2);
            let backward = distance_km(lat2, lon2, lat1, lon1);
            assert!((forward - backward).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_known_city_distance() {
        // Bengaluru to New Delhi is roughly 1750 km
        let d = distance_km(12.9716, 77.5946, 28.7041, 77.1025);
        assert!((d - 1750.0).abs() < 20.0, "got {d}");
    }

    #[test]
    fn test_dateline_wraps() {
        let d = distance_km(0.0, 179.9, 0.0, -179.9);
        assert!(d < 25.0, "got {d}");
    }

    #[test]
    fn test_distance_between() {
        let a = LatLon::new(0.0, 0.0);
        let b = LatLon::new(0.0, 90.0);
        assert_eq!(distance_between(&a, &b), distance_km(0.0, 0.0, 0.0, 90.0));
    }

    #[test]
    fn test_find_within_radius_scenario() {
        let origin = LatLon::new(0.0, 0.0);
        let boundary = equator_offset(20.0);
        let radius = distance_between(&origin, &boundary);
        assert!((radius - 20.0).abs() < 1e-6);

        let candidates = vec![
            equator_offset(25.0),
            equator_offset(12.0),
            boundary,
            equator_offset(5.0),
            equator_offset(19.9),
        ];

        let result = find_within_radius(0.0, 0.0, radius, candidates);

        let distances: Vec<f64> = result.iter().map(|r| r.distance_km).collect();
        assert_eq!(distances.len(), 3);
        assert!((distances[0] - 5.0).abs() < 1e-6);
        assert!((distances[1] - 12.0).abs() < 1e-6);
        assert!((distances[2] - 19.9).abs() < 1e-6);
    }

    #[test]
    fn test_find_within_radius_excludes_boundary() {
        let on_boundary = LatLon::new(0.0, 1.0);
        let radius = distance_km(0.0, 0.0, 0.0, 1.0);

        let result = find_within_radius(0.0, 0.0, radius, vec![on_boundary]);
        assert!(result.is_empty());

        let result = find_within_radius(0.0, 0.0, radius + 1e-9, vec![on_boundary]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_find_within_radius_never_returns_outside() {
        let candidates: Vec<LatLon> = (0..200)
            .map(|i| LatLon::new((i as f64 * 0.37) % 10.0 - 5.0, (i as f64 * 0.53) % 10.0 - 5.0))
            .collect();

        let radius = 300.0;
        let result = find_within_radius(1.0, 1.0, radius, candidates.iter());

        assert!(!result.is_empty());
        for r in &result {
            assert!(r.distance_km < radius);
            let recomputed = distance_km(1.0, 1.0, r.item.lat, r.item.lon);
            assert_eq!(recomputed, r.distance_km);
        }
    }

    #[test]
    fn test_find_within_radius_is_ordered() {
        let candidates: Vec<LatLon> = (0..100)
            .map(|i| {
                let lat = ((i * 7919) % 100) as f64 / 10.0;
                let lon = ((i * 104729) % 100) as f64 / 10.0;
                LatLon::new(lat, lon)
            })
            .collect();

        let result = find_within_radius(5.0, 5.0, 10_000.0, candidates);

        assert_eq!(result.len(), 100);
        assert!(result
            .windows(2)
            .all(|pair| pair[0].distance_km <= pair[1].distance_km));
    }

    #[test]
    fn test_find_within_radius_stable_ties() {
        let candidates = vec![
            ("north", LatLon::new(1.0, 0.0)),
            ("south", LatLon::new(-1.0, 0.0)),
            ("origin", LatLon::new(0.0, 0.0)),
        ];

        struct Named(&'static str, LatLon);
        impl Coordinates for Named {
            fn latitude(&self) -> f64 {
                self.1.lat
            }
            fn longitude(&self) -> f64 {
                self.1.lon
            }
        }

        let result = find_within_radius(
            0.0,
            0.0,
            500.0,
            candidates.into_iter().map(|(n, c)| Named(n, c)),
        );

        let names: Vec<&str> = result.iter().map(|r| r.item.0).collect();
        assert_eq!(names, vec!["origin", "north", "south"]);
    }

    #[test]
    fn test_find_within_radius_empty() {
        let result = find_within_radius(0.0, 0.0, 100.0, Vec::<LatLon>::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_find_within_radius_zero_radius() {
        // Even the reference itself is not strictly inside a zero radius
        let result = find_within_radius(10.0, 10.0, 0.0, vec![LatLon::new(10.0, 10.0)]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_with_distance_serializes_flat() {
        let entry = WithDistance {
            item: LatLon::new(1.5, 2.5),
            distance_km: 3.25,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["lat"], 1.5);
        assert_eq!(json["lon"], 2.5);
        assert_eq!(json["distance_km"], 3.25);
    }
}
