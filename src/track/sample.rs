use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::geo::GeoPoint;

/// One point of a ground track.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GeodeticSample {
    pub timestamp: DateTime<Utc>,
    pub altitude_km: f64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeodeticSample {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude_deg, self.longitude_deg)
    }
}
