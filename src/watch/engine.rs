use chrono::{DateTime, Utc};
use serde::Serialize;

use super::config::WatchConfig;
use super::event::{DecayEvent, StaticRisk};
use crate::elements::{ElementSet, ObjectInfo};
use crate::geo::initial_bearing_deg;
use crate::risk::{
    assess_static, dynamic_level, probe_dynamic, RiskLevel, RiskPolicy, RiskVerdict, StaticSignals,
};
use crate::track::{GroundTrack, Propagator};

/// Distinguishes "nothing to analyze" from "analyzed, nothing matched".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    NoInput,
    Analyzed { objects: usize },
}

#[derive(Debug, Serialize)]
pub struct WatchReport {
    pub outcome: BatchOutcome,
    /// Ranked by predicted timestamp, earliest warning first.
    pub events: Vec<DecayEvent>,
    /// Flagged by the element-only heuristic; independent of `events`.
    pub static_risks: Vec<StaticRisk>,
    pub skipped_records: usize,
}

/// Run the engine over one snapshot: the per-object first-match scan
/// plus the propagation-free static watchlist.
pub fn watch_all(
    sets: &[ElementSet],
    cfg: &WatchConfig,
    now: DateTime<Utc>,
    skipped_records: usize,
) -> WatchReport {
    if sets.is_empty() {
        return WatchReport {
            outcome: BatchOutcome::NoInput,
            events: Vec::new(),
            static_risks: Vec::new(),
            skipped_records,
        };
    }

    let mut events = Vec::new();
    let mut static_risks = Vec::new();

    for set in sets {
        let signals = StaticSignals::from_elements(&set.elements, now);
        if assess_static(&signals, &cfg.static_thresholds) {
            static_risks.push(StaticRisk {
                catalog_id: set.info.catalog_id,
                name: set.info.name.clone(),
                signals,
            });
        }

        let propagator = set.propagator();
        if let Some(event) = first_match(&propagator, &set.info, signals, cfg, now) {
            events.push(event);
        }
    }

    events.sort_by_key(|e| e.predicted_at);

    WatchReport {
        outcome: BatchOutcome::Analyzed {
            objects: sets.len(),
        },
        events,
        static_risks,
        skipped_records,
    }
}

/// Scan one object's ground track in time order and commit the first
/// sample that passes every active filter. Later, possibly closer,
/// passes are not considered; this bounds per-object cost.
pub fn first_match<P: Propagator>(
    propagator: &P,
    info: &ObjectInfo,
    static_signals: StaticSignals,
    cfg: &WatchConfig,
    now: DateTime<Utc>,
) -> Option<DecayEvent> {
    let track = GroundTrack::new(
        propagator,
        now,
        cfg.horizon_hours,
        cfg.step_minutes,
        cfg.earth_model,
    );
    let mut prev = None;

    for sample in track {
        let qualifies = cfg.fence.contains(sample.point())
            && cfg
                .decay_altitude_km
                .map_or(true, |gate| sample.altitude_km <= gate);

        if !qualifies {
            prev = Some(sample);
            continue;
        }

        let bearing_deg = match prev {
            Some(p) => initial_bearing_deg(p.point(), sample.point()),
            None => 0.0,
        };

        return Some(DecayEvent {
            catalog_id: info.catalog_id,
            name: info.name.clone(),
            predicted_at: sample.timestamp,
            latitude_deg: sample.latitude_deg,
            longitude_deg: sample.longitude_deg,
            bearing_deg,
            verdict: build_verdict(propagator, static_signals, sample.timestamp, cfg),
        });
    }
    None
}

// The altitude gate has already run by the time this is called, so the
// propagation-costing dynamic probe only fires for qualifying samples.
fn build_verdict<P: Propagator>(
    propagator: &P,
    static_signals: StaticSignals,
    at: DateTime<Utc>,
    cfg: &WatchConfig,
) -> RiskVerdict {
    let static_level = |fired: bool| {
        if fired {
            RiskLevel::Elevated
        } else {
            RiskLevel::Stable
        }
    };

    match cfg.policy {
        RiskPolicy::Static => RiskVerdict {
            level: static_level(assess_static(&static_signals, &cfg.static_thresholds)),
            static_signals: Some(static_signals),
            dynamic_signals: None,
        },
        RiskPolicy::Dynamic => {
            let dynamic = probe_dynamic(propagator, at, cfg.earth_model, &cfg.dynamic_thresholds);
            RiskVerdict {
                level: dynamic
                    .map_or(RiskLevel::Stable, |s| dynamic_level(&s, &cfg.dynamic_thresholds)),
                static_signals: None,
                dynamic_signals: dynamic,
            }
        }
        RiskPolicy::Both => {
            let dynamic = probe_dynamic(propagator, at, cfg.earth_model, &cfg.dynamic_thresholds);
            let level = dynamic
                .map_or(RiskLevel::Stable, |s| dynamic_level(&s, &cfg.dynamic_thresholds))
                .max(static_level(assess_static(
                    &static_signals,
                    &cfg.static_thresholds,
                )));
            RiskVerdict {
                level,
                static_signals: Some(static_signals),
                dynamic_signals: dynamic,
            }
        }
    }
}
