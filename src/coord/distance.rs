//! Great-circle distance
//!
//! Haversine distance on a sphere with the mean Earth radius. Inputs are not
//! range-checked here; callers validate coordinates at the boundary.

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::coord::Coordinates;

/// Calculate the distance between two points in meters (Haversine formula)
///
/// Identical inputs yield exactly `0.0`, and the result does not depend on
/// argument order.
pub fn distance_meters(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h just past 1.0 for antipodal pairs
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Check if a point lies within `radius_meters` of `center`
pub fn is_within_radius(point: Coordinates, center: Coordinates, radius_meters: f64) -> bool {
    distance_meters(point, center) <= radius_meters
}
