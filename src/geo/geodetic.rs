use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the spherical conversion and by the
/// great-circle formulas.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// WGS-84 semi-major axis and first eccentricity squared.
const WGS84_A_KM: f64 = 6378.137;
const WGS84_E2: f64 = 0.00669437999014;

/// Which Earth figure to use when converting a position vector to a
/// surface point.
///
/// `Spherical` reproduces the legacy behavior: geocentric latitude and
/// altitude above a 6371 km sphere, no oblateness correction. `Wgs84`
/// computes geodetic latitude and height above the reference ellipsoid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarthModel {
    #[default]
    Spherical,
    Wgs84,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subpoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

/// Convert an Earth-centered position vector in kilometers to the
/// surface point directly beneath it.
///
/// Longitude is normalized to (-180, 180]. With `EarthModel::Spherical`
/// the latitude is geocentric, matching the legacy output this engine
/// is validated against.
pub fn subpoint(position_km: [f64; 3], model: EarthModel) -> Subpoint {
    let [x, y, z] = position_km;
    let p = (x * x + y * y).sqrt();
    let longitude_deg = normalize_longitude(y.atan2(x).to_degrees());

    match model {
        EarthModel::Spherical => {
            let r = (p * p + z * z).sqrt();
            Subpoint {
                latitude_deg: z.atan2(p).to_degrees(),
                longitude_deg,
                altitude_km: r - EARTH_RADIUS_KM,
            }
        }
        EarthModel::Wgs84 => {
            if p < 1e-9 {
                // On the polar axis the iteration below divides by cos(lat).
                let b = WGS84_A_KM * (1.0 - WGS84_E2).sqrt();
                return Subpoint {
                    latitude_deg: 90.0_f64.copysign(z),
                    longitude_deg,
                    altitude_km: z.abs() - b,
                };
            }
            // Iterative geodetic latitude; converges in a few rounds for
            // any orbital altitude.
            let mut lat = z.atan2(p * (1.0 - WGS84_E2));
            let mut alt = 0.0;
            for _ in 0..5 {
                let sin_lat = lat.sin();
                let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
                alt = p / lat.cos() - n;
                lat = z.atan2(p * (1.0 - WGS84_E2 * n / (n + alt)));
            }
            Subpoint {
                latitude_deg: lat.to_degrees(),
                longitude_deg,
                altitude_km: alt,
            }
        }
    }
}

fn normalize_longitude(mut deg: f64) -> f64 {
    while deg <= -180.0 {
        deg += 360.0;
    }
    while deg > 180.0 {
        deg -= 360.0;
    }
    deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equatorial_point_has_zero_latitude() {
        let sp = subpoint([7000.0, 0.0, 0.0], EarthModel::Spherical);
        assert!(sp.latitude_deg.abs() < 1e-12);
        assert!(sp.longitude_deg.abs() < 1e-12);
        assert!((sp.altitude_km - 629.0).abs() < 1e-9);
    }

    #[test]
    fn polar_point_has_ninety_latitude() {
        let sp = subpoint([0.0, 0.0, 6871.0], EarthModel::Spherical);
        assert!((sp.latitude_deg - 90.0).abs() < 1e-9);
        assert!((sp.altitude_km - 500.0).abs() < 1e-9);
    }

    #[test]
    fn longitude_stays_in_half_open_range() {
        for &(x, y) in &[(1.0, 0.0), (-1.0, 0.0), (0.0, -1.0), (-1.0, -1e-9)] {
            let sp = subpoint([x * 7000.0, y * 7000.0, 0.0], EarthModel::Spherical);
            assert!(sp.longitude_deg > -180.0 && sp.longitude_deg <= 180.0);
        }
    }

    #[test]
    fn latitude_bounded_for_arbitrary_vectors() {
        for &v in &[
            [6500.0, 1200.0, -3000.0],
            [-400.0, 42.0, 6800.0],
            [-7000.0, -7000.0, -7000.0],
        ] {
            let sp = subpoint(v, EarthModel::Spherical);
            assert!((-90.0..=90.0).contains(&sp.latitude_deg));
        }
    }

    #[test]
    fn wgs84_polar_altitude_above_spherical() {
        // The ellipsoid is flattened: a polar pass sits higher above it
        // than above the mean sphere.
        let spherical = subpoint([0.0, 0.0, 6871.0], EarthModel::Spherical);
        let geodetic = subpoint([0.0, 0.0, 6871.0], EarthModel::Wgs84);
        assert!(geodetic.altitude_km > spherical.altitude_km);
        assert!((geodetic.latitude_deg - 90.0).abs() < 0.01);
    }
}
