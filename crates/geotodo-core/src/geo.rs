//! Great-circle distance on a spherical earth.

use crate::models::Coordinate;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in meters.
///
/// Out-of-range coordinates are not rejected; the result is then just a
/// number with no geographic meaning.
///
/// # Examples
///
/// ```rust
/// use geotodo_core::{geo::distance_meters, models::Coordinate};
///
/// let origin = Coordinate::new(0.0, 0.0);
/// let east = Coordinate::new(0.0, 0.01);
///
/// assert_eq!(distance_meters(origin, origin), 0.0);
/// assert_eq!(distance_meters(origin, east).round(), 1112.0);
/// ```
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_METERS * c
}
