//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude in decimal degrees.  Inputs are
//! expected at ~5-decimal precision (~1 m); the extra width keeps cumulative
//! route sums free of rounding drift across long legs.
//!
//! All distances are great-circle distances on a sphere of radius
//! [`EARTH_RADIUS_KM`].  Accuracy is ~0.5 % below 1000 km, which is
//! sufficient for passage planning but not for navigation.

use crate::{CalcResult, CalculationError};

/// Mean Earth radius, kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// `true` if latitude is in `[-90, 90]` and longitude is in
    /// `[-180, 360)`.  Either longitude convention passes; mixing them is
    /// checked at the graph level.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..360.0).contains(&self.lon)
    }

    /// `true` if the longitude can only be read in the 0–360 convention.
    #[inline]
    pub fn uses_positive_longitudes(self) -> bool {
        self.lon > 180.0
    }

    /// `true` if the longitude can only be read in the ±180 convention.
    #[inline]
    pub fn uses_signed_longitudes(self) -> bool {
        self.lon < 0.0
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}

/// Great-circle distance between two points, in kilometres.
#[inline]
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    a.distance_km(b)
}

/// Sum of consecutive haversine segments along `waypoints`, in kilometres.
///
/// Fewer than two waypoints yield `0.0`.  This, not the endpoint-to-endpoint
/// distance, is the authoritative length of a line operation.
pub fn route_distance(waypoints: &[GeoPoint]) -> f64 {
    waypoints
        .windows(2)
        .map(|pair| pair[0].distance_km(pair[1]))
        .sum()
}

/// Arithmetic mean of the polygon corners.
///
/// The mean can fall outside an irregular (concave) polygon.  That is fine
/// for routing into and out of an area; do not use it as a navigation fix.
pub fn centroid(corners: &[GeoPoint]) -> CalcResult<GeoPoint> {
    if corners.len() < 3 {
        return Err(CalculationError::DegeneratePolygon { corners: corners.len() });
    }
    let n = corners.len() as f64;
    let (lat, lon) = corners
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    Ok(GeoPoint::new(lat / n, lon / n))
}
