use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::risk::{RiskVerdict, StaticSignals};

// The primary service region displays times at UTC+9.
const DISPLAY_OFFSET_SECONDS: i32 = 9 * 3600;

/// The one committed prediction for an object: where and when its track
/// first qualifies inside the fence.
#[derive(Debug, Clone, Serialize)]
pub struct DecayEvent {
    pub catalog_id: u64,
    pub name: String,
    pub predicted_at: DateTime<Utc>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub bearing_deg: f64,
    pub verdict: RiskVerdict,
}

impl DecayEvent {
    /// Predicted time in the +9h display convention.
    pub fn local_time(&self) -> DateTime<FixedOffset> {
        self.predicted_at
            .with_timezone(&FixedOffset::east_opt(DISPLAY_OFFSET_SECONDS).unwrap())
    }
}

/// An object flagged by the element-only heuristic, independent of any
/// geofence match.
#[derive(Debug, Clone, Serialize)]
pub struct StaticRisk {
    pub catalog_id: u64,
    pub name: String,
    pub signals: StaticSignals,
}
