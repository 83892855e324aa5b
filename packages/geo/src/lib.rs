#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! WGS84 coordinate handling and great-circle distance.
//!
//! Coordinates are validated at construction, so every [`Coordinate`]
//! held anywhere in the system is finite and in range. Distance is the
//! Haversine great-circle approximation with a spherical Earth radius
//! of 6371 km, which is accurate to well under 1% at donation-delivery
//! scales.

mod index;

pub use index::PointIndex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Errors that can occur constructing or operating on coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    /// Latitude or longitude was non-finite or out of range.
    #[error("invalid coordinate: lat={lat}, lng={lng} (expected finite, lat in -90..=90, lng in -180..=180)")]
    InvalidCoordinate {
        /// The offending latitude in degrees.
        lat: f64,
        /// The offending longitude in degrees.
        lng: f64,
    },
}

/// A validated WGS84 coordinate in decimal degrees.
///
/// Serializes as `{ "lat": ..., "lng": ... }`. Deserialized values are
/// *not* re-validated by serde; boundary code that accepts untrusted
/// payloads should round-trip through [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, -90..=90.
    pub lat: f64,
    /// Longitude in degrees, -180..=180.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate, validating that both components are finite
    /// and within WGS84 range.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidCoordinate`] if either component is
    /// non-finite or out of range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        if lat.is_finite() && lng.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Ok(Self { lat, lng })
        } else {
            Err(GeoError::InvalidCoordinate { lat, lng })
        }
    }
}

/// Great-circle distance between two coordinates in kilometers
/// (Haversine formula).
///
/// Symmetric in its arguments and zero for identical points. Inputs are
/// already validated by [`Coordinate::new`], so no error path exists
/// here.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, 181.0).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn accepts_boundary_values() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn identical_points_are_zero_distance() {
        let a = coord(40.8176, -73.9282);
        assert_relative_eq!(distance_km(a, a), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = coord(40.8176, -73.9282);
        let b = coord(41.8781, -87.6298);
        assert_relative_eq!(distance_km(a, b), distance_km(b, a), epsilon = 1e-9);
    }

    #[test]
    fn south_bronx_pair_is_about_1_7_km() {
        // The canonical donation/desert pair from the matchmaking fixtures.
        let donor = coord(40.8176, -73.9282);
        let desert = coord(40.8176, -73.9482);
        let d = distance_km(donor, desert);
        assert!((1.5..2.0).contains(&d), "distance was {d}");
    }

    #[test]
    fn nyc_to_chicago_is_about_1145_km() {
        let nyc = coord(40.7128, -74.0060);
        let chicago = coord(41.8781, -87.6298);
        let d = distance_km(nyc, chicago);
        assert!((1130.0..1160.0).contains(&d), "distance was {d}");
    }

    #[test]
    fn triangle_inequality_holds() {
        let a = coord(40.8176, -73.9282);
        let b = coord(41.4993, -81.6944);
        let c = coord(33.7490, -84.3880);
        let eps = 1e-9;
        assert!(distance_km(a, c) <= distance_km(a, b) + distance_km(b, c) + eps);
        assert!(distance_km(a, b) <= distance_km(a, c) + distance_km(c, b) + eps);
        assert!(distance_km(b, c) <= distance_km(b, a) + distance_km(a, c) + eps);
    }
}
