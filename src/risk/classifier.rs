use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sgp4::Elements;
use strum_macros::Display;

use super::policy::{DynamicThresholds, StaticThresholds};
use crate::geo::{subpoint, EarthModel};
use crate::track::Propagator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskLevel {
    Stable,
    Elevated,
    Imminent,
}

/// A risk level together with the signal values that produced it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RiskVerdict {
    pub level: RiskLevel,
    pub static_signals: Option<StaticSignals>,
    pub dynamic_signals: Option<DynamicSignals>,
}

/// Element-derived signals; no propagation involved.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StaticSignals {
    pub drag_term: f64,
    pub mean_motion_rev_per_day: f64,
    pub epoch_age_days: f64,
}

impl StaticSignals {
    pub fn from_elements(elements: &Elements, now: DateTime<Utc>) -> Self {
        let age = now.naive_utc() - elements.datetime;
        Self {
            drag_term: elements.drag_term,
            mean_motion_rev_per_day: elements.mean_motion,
            epoch_age_days: age.num_seconds() as f64 / 86_400.0,
        }
    }
}

/// True when the element-only heuristic flags the object: a large drag
/// term, or a fast low orbit on a reasonably fresh element set.
pub fn assess_static(signals: &StaticSignals, thresholds: &StaticThresholds) -> bool {
    if signals.drag_term >= thresholds.drag_term {
        return true;
    }
    (0.0..=thresholds.max_epoch_age_days).contains(&signals.epoch_age_days)
        && signals.mean_motion_rev_per_day > thresholds.mean_motion_rev_per_day
}

/// Altitude pair probed `lookahead` apart.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DynamicSignals {
    pub first_altitude_km: f64,
    pub later_altitude_km: f64,
    pub drop_km: f64,
}

/// Probe the altitude trend at `at` and `at + lookahead`.
///
/// Returns `None` when either epoch is outside the propagation domain;
/// the caller treats that the same as any other skipped sample.
pub fn probe_dynamic<P: Propagator>(
    propagator: &P,
    at: DateTime<Utc>,
    model: EarthModel,
    thresholds: &DynamicThresholds,
) -> Option<DynamicSignals> {
    let lookahead = Duration::hours(i64::from(thresholds.lookahead_hours));
    let first = altitude_km(propagator, at, model)?;
    let later = altitude_km(propagator, at + lookahead, model)?;
    Some(DynamicSignals {
        first_altitude_km: first,
        later_altitude_km: later,
        drop_km: first - later,
    })
}

fn altitude_km<P: Propagator>(
    propagator: &P,
    at: DateTime<Utc>,
    model: EarthModel,
) -> Option<f64> {
    match propagator.position_km(at) {
        Ok(position) => Some(subpoint(position, model).altitude_km),
        Err(e) => {
            log::debug!("dynamic probe failed at {}: {}", at, e);
            None
        }
    }
}

/// Level implied by a probed altitude pair.
pub fn dynamic_level(signals: &DynamicSignals, thresholds: &DynamicThresholds) -> RiskLevel {
    if signals.later_altitude_km < thresholds.imminent_km {
        RiskLevel::Imminent
    } else if signals.first_altitude_km > thresholds.floor_km
        && signals.drop_km > thresholds.drop_km
    {
        RiskLevel::Elevated
    } else {
        RiskLevel::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::TrackError;
    use chrono::TimeZone;

    fn signals(drag: f64, mean_motion: f64, age_days: f64) -> StaticSignals {
        StaticSignals {
            drag_term: drag,
            mean_motion_rev_per_day: mean_motion,
            epoch_age_days: age_days,
        }
    }

    #[test]
    fn drag_term_at_threshold_flags() {
        let t = StaticThresholds::default();
        assert!(assess_static(&signals(1e-4, 14.0, 10.0), &t));
        assert!(!assess_static(&signals(9.9e-5, 14.0, 10.0), &t));
    }

    #[test]
    fn fast_fresh_orbit_flags() {
        let t = StaticThresholds::default();
        assert!(assess_static(&signals(0.0, 15.5, 30.0), &t));
        // stale epoch: mean-motion rule does not apply
        assert!(!assess_static(&signals(0.0, 15.5, 181.0), &t));
        // epoch in the future falls outside the age window
        assert!(!assess_static(&signals(0.0, 15.5, -1.0), &t));
    }

    #[test]
    fn dynamic_drop_above_floor_is_elevated() {
        let t = DynamicThresholds::default();
        let s = DynamicSignals {
            first_altitude_km: 260.0,
            later_altitude_km: 220.0,
            drop_km: 40.0,
        };
        assert_eq!(dynamic_level(&s, &t), RiskLevel::Elevated);
    }

    #[test]
    fn small_drop_above_imminent_floor_is_stable() {
        let t = DynamicThresholds::default();
        let s = DynamicSignals {
            first_altitude_km: 260.0,
            later_altitude_km: 245.0,
            drop_km: 15.0,
        };
        assert_eq!(dynamic_level(&s, &t), RiskLevel::Stable);
        // the same pair becomes risky if the already-low floor is raised
        let raised = DynamicThresholds {
            imminent_km: 250.0,
            ..t
        };
        assert_eq!(dynamic_level(&s, &raised), RiskLevel::Imminent);
    }

    #[test]
    fn below_imminent_floor_wins_over_drop_rule() {
        let t = DynamicThresholds::default();
        let s = DynamicSignals {
            first_altitude_km: 260.0,
            later_altitude_km: 190.0,
            drop_km: 70.0,
        };
        assert_eq!(dynamic_level(&s, &t), RiskLevel::Imminent);
    }

    struct FixedDescent {
        start: DateTime<Utc>,
        start_altitude_km: f64,
        rate_km_per_hour: f64,
    }

    impl Propagator for FixedDescent {
        fn position_km(&self, at: DateTime<Utc>) -> Result<[f64; 3], TrackError> {
            let hours = (at - self.start).num_minutes() as f64 / 60.0;
            let alt = self.start_altitude_km - self.rate_km_per_hour * hours;
            Ok([crate::geo::EARTH_RADIUS_KM + alt, 0.0, 0.0])
        }
    }

    #[test]
    fn probe_reads_samples_lookahead_apart() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let prop = FixedDescent {
            start,
            start_altitude_km: 300.0,
            rate_km_per_hour: 5.0,
        };
        let s = probe_dynamic(
            &prop,
            start,
            EarthModel::Spherical,
            &DynamicThresholds::default(),
        )
        .unwrap();
        assert!((s.first_altitude_km - 300.0).abs() < 1e-9);
        assert!((s.later_altitude_km - 270.0).abs() < 1e-9);
        assert!((s.drop_km - 30.0).abs() < 1e-9);
    }
}
