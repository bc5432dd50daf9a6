use crate::zones::Coordinate;

/// Mean Earth radius used for the spherical model
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate great-circle distance between two coordinates using the Haversine formula.
/// Returns distance in kilometers.
///
/// Inputs are decimal degrees and are not range-checked: callers supply
/// latitude in [-90, 90] and longitude in [-180, 180]. Out-of-range values
/// still produce a number, just not a meaningful one.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Check if a point lies inside a circular geofence. The boundary counts as inside.
/// A non-positive or non-finite radius never contains anything.
pub fn is_within_radius(point: Coordinate, center: Coordinate, radius_km: f64) -> bool {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return false;
    }
    haversine_distance(point, center) <= radius_km
}
