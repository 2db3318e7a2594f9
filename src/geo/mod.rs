mod fence;
mod geodetic;
mod great_circle;
mod point;

pub use fence::Geofence;
pub use geodetic::{subpoint, EarthModel, Subpoint, EARTH_RADIUS_KM};
pub use great_circle::{haversine_km, initial_bearing_deg};
pub use point::GeoPoint;
