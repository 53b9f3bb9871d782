//! Speed and distance unit conversions.
//!
//! Vessel speeds are configured in knots; every internal distance is in
//! kilometres.  Nautical miles appear only in output.

/// Kilometres per nautical mile (exact by definition).
pub const KM_PER_NM: f64 = 1.852;

#[inline]
pub fn km_to_nm(km: f64) -> f64 {
    km / KM_PER_NM
}

#[inline]
pub fn nm_to_km(nm: f64) -> f64 {
    nm * KM_PER_NM
}

/// Knots → km/h.
#[inline]
pub fn knots_to_kmh(knots: f64) -> f64 {
    knots * KM_PER_NM
}

/// Minutes needed to cover `distance_km` at `speed_knots`.
///
/// Returns `None` for a non-positive or non-finite speed so callers decide
/// whether that is an error.
pub fn travel_minutes(distance_km: f64, speed_knots: f64) -> Option<f64> {
    if !(speed_knots.is_finite() && speed_knots > 0.0) {
        return None;
    }
    Some(distance_km / knots_to_kmh(speed_knots) * 60.0)
}
