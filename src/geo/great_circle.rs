use super::geodetic::EARTH_RADIUS_KM;
use super::point::GeoPoint;

/// Great-circle distance between two surface points in kilometers,
/// haversine form.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.latitude_deg - a.latitude_deg).to_radians();
    let dlon = (b.longitude_deg - a.longitude_deg).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Initial bearing from `from` toward `to`, degrees clockwise from
/// north in [0, 360).
///
/// Coincident points have no defined bearing; this returns 0.0 for them
/// rather than leaving atan2(0, 0) to decide.
pub fn initial_bearing_deg(from: GeoPoint, to: GeoPoint) -> f64 {
    if from == to {
        return 0.0;
    }
    let dlon = (to.longitude_deg - from.longitude_deg).to_radians();
    let y = dlon.sin() * to.lat_rad().cos();
    let x = from.lat_rad().cos() * to.lat_rad().sin()
        - from.lat_rad().sin() * to.lat_rad().cos() * dlon.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}
