use chrono::{DateTime, Duration, Utc};

use super::propagator::Propagator;
use super::sample::GeodeticSample;
use crate::geo::{subpoint, EarthModel};

/// Lazy ground track for one object: samples the propagator every
/// `step` across the horizon and converts each position to a surface
/// point.
///
/// Epochs the propagator rejects are skipped, not fatal; the iterator
/// simply moves to the next step. Timestamps of yielded samples are
/// strictly increasing and bounded by `start + horizon`.
pub struct GroundTrack<'a, P: Propagator> {
    propagator: &'a P,
    start: DateTime<Utc>,
    step: Duration,
    steps: u32,
    index: u32,
    model: EarthModel,
}

impl<'a, P: Propagator> GroundTrack<'a, P> {
    pub fn new(
        propagator: &'a P,
        start: DateTime<Utc>,
        horizon_hours: u32,
        step_minutes: u32,
        model: EarthModel,
    ) -> Self {
        Self {
            propagator,
            start,
            step: Duration::minutes(i64::from(step_minutes)),
            steps: horizon_hours * 60 / step_minutes,
            index: 0,
            model,
        }
    }
}

impl<P: Propagator> Iterator for GroundTrack<'_, P> {
    type Item = GeodeticSample;

    fn next(&mut self) -> Option<GeodeticSample> {
        while self.index < self.steps {
            let at = self.start + self.step * self.index as i32;
            self.index += 1;

            let position = match self.propagator.position_km(at) {
                Ok(p) => p,
                Err(e) => {
                    log::debug!("skipping sample at {}: {}", at, e);
                    continue;
                }
            };

            // The spherical model keeps the legacy convention of reading
            // the inertial vector directly; the WGS-84 model rotates into
            // the Earth-fixed frame first.
            let position = match self.model {
                EarthModel::Spherical => position,
                EarthModel::Wgs84 => {
                    let gmst = sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(
                        &at.naive_utc(),
                    ));
                    teme_to_ecef(position, gmst)
                }
            };

            let sp = subpoint(position, self.model);
            return Some(GeodeticSample {
                timestamp: at,
                altitude_km: sp.altitude_km,
                latitude_deg: sp.latitude_deg,
                longitude_deg: sp.longitude_deg,
            });
        }
        None
    }
}

fn teme_to_ecef(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}
