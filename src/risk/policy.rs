use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Which decay-risk heuristic the engine runs.
///
/// `Static` inspects element fields only and costs no propagation;
/// `Dynamic` probes the altitude trend with two extra propagator calls;
/// `Both` runs the two and keeps the more severe outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskPolicy {
    Static,
    Dynamic,
    #[default]
    Both,
}

/// Thresholds for the element-only heuristic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StaticThresholds {
    /// Drag term at or above this flags the object outright.
    #[serde(default = "default_drag_term")]
    pub drag_term: f64,
    /// Mean motion above this flags the object when the epoch is fresh.
    #[serde(default = "default_mean_motion")]
    pub mean_motion_rev_per_day: f64,
    /// Epoch age window (days) inside which the mean-motion rule applies.
    #[serde(default = "default_epoch_age")]
    pub max_epoch_age_days: f64,
}

fn default_drag_term() -> f64 {
    1e-4
}

fn default_mean_motion() -> f64 {
    15.0
}

fn default_epoch_age() -> f64 {
    180.0
}

impl Default for StaticThresholds {
    fn default() -> Self {
        Self {
            drag_term: default_drag_term(),
            mean_motion_rev_per_day: default_mean_motion(),
            max_epoch_age_days: default_epoch_age(),
        }
    }
}

/// Thresholds for the two-sample altitude-trend heuristic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DynamicThresholds {
    /// The drop rule only applies to objects starting above this.
    #[serde(default = "default_floor_km")]
    pub floor_km: f64,
    /// Altitude loss over the lookahead that counts as decaying.
    #[serde(default = "default_drop_km")]
    pub drop_km: f64,
    /// An object already below this is classified imminent.
    #[serde(default = "default_imminent_km")]
    pub imminent_km: f64,
    #[serde(default = "default_lookahead_hours")]
    pub lookahead_hours: u32,
}

fn default_floor_km() -> f64 {
    250.0
}

fn default_drop_km() -> f64 {
    30.0
}

fn default_imminent_km() -> f64 {
    200.0
}

fn default_lookahead_hours() -> u32 {
    6
}

impl Default for DynamicThresholds {
    fn default() -> Self {
        Self {
            floor_km: default_floor_km(),
            drop_km: default_drop_km(),
            imminent_km: default_imminent_km(),
            lookahead_hours: default_lookahead_hours(),
        }
    }
}
