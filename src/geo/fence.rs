use serde::{Deserialize, Serialize};

use super::great_circle::haversine_km;
use super::point::GeoPoint;

/// Circular or annular region around a reference point.
///
/// The plain circle is the annulus with `min_radius_km` left at zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Geofence {
    pub center: GeoPoint,
    #[serde(default)]
    pub min_radius_km: f64,
    pub max_radius_km: f64,
}

impl Geofence {
    pub fn circle(center: GeoPoint, max_radius_km: f64) -> Self {
        Self {
            center,
            min_radius_km: 0.0,
            max_radius_km,
        }
    }

    #[allow(dead_code)]
    pub fn annulus(center: GeoPoint, min_radius_km: f64, max_radius_km: f64) -> Self {
        Self {
            center,
            min_radius_km,
            max_radius_km,
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        let d = haversine_km(self.center, point);
        self.min_radius_km <= d && d <= self.max_radius_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEOUL: GeoPoint = GeoPoint {
        latitude_deg: 37.5665,
        longitude_deg: 126.978,
    };

    #[test]
    fn circle_includes_center_and_nearby() {
        let fence = Geofence::circle(SEOUL, 3000.0);
        assert!(fence.contains(SEOUL));
        // Tokyo, roughly 1160 km out
        assert!(fence.contains(GeoPoint::new(35.6762, 139.6503)));
        // Sydney, far outside
        assert!(!fence.contains(GeoPoint::new(-33.8688, 151.2093)));
    }

    #[test]
    fn annulus_excludes_inner_disc() {
        let fence = Geofence::annulus(SEOUL, 500.0, 3000.0);
        assert!(!fence.contains(SEOUL));
        assert!(fence.contains(GeoPoint::new(35.6762, 139.6503)));
    }
}
