use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{EarthModel, GeoPoint, Geofence};
use crate::risk::{DynamicThresholds, RiskPolicy, StaticThresholds};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything one analysis run is parameterized by. The engine holds no
/// state of its own between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_horizon_hours")]
    pub horizon_hours: u32,
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
    pub fence: Geofence,
    /// Samples above this altitude never qualify as decay events; `null`
    /// disables the gate.
    #[serde(default = "default_decay_altitude_km")]
    pub decay_altitude_km: Option<f64>,
    #[serde(default)]
    pub policy: RiskPolicy,
    #[serde(default)]
    pub static_thresholds: StaticThresholds,
    #[serde(default)]
    pub dynamic_thresholds: DynamicThresholds,
    #[serde(default)]
    pub earth_model: EarthModel,
}

fn default_horizon_hours() -> u32 {
    48
}

fn default_step_minutes() -> u32 {
    30
}

fn default_decay_altitude_km() -> Option<f64> {
    Some(200.0)
}

impl WatchConfig {
    /// Default analysis around a reference point.
    pub fn for_reference(center: GeoPoint, max_radius_km: f64) -> Self {
        Self {
            horizon_hours: default_horizon_hours(),
            step_minutes: default_step_minutes(),
            fence: Geofence::circle(center, max_radius_km),
            decay_altitude_km: default_decay_altitude_km(),
            policy: RiskPolicy::default(),
            static_thresholds: StaticThresholds::default(),
            dynamic_thresholds: DynamicThresholds::default(),
            earth_model: EarthModel::default(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: WatchConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=240).contains(&self.horizon_hours) {
            return Err(ConfigError::Invalid(format!(
                "horizon must be 1-240 hours, got {}",
                self.horizon_hours
            )));
        }
        if self.step_minutes == 0 || self.step_minutes > self.horizon_hours * 60 {
            return Err(ConfigError::Invalid(format!(
                "step must be between 1 minute and the horizon, got {} minutes",
                self.step_minutes
            )));
        }
        if self.fence.max_radius_km <= 0.0 {
            return Err(ConfigError::Invalid(
                "fence max radius must be positive".into(),
            ));
        }
        if self.fence.min_radius_km < 0.0 || self.fence.min_radius_km >= self.fence.max_radius_km {
            return Err(ConfigError::Invalid(
                "fence min radius must be in [0, max)".into(),
            ));
        }
        if let Some(gate) = self.decay_altitude_km {
            if gate <= 0.0 {
                return Err(ConfigError::Invalid(
                    "decay altitude gate must be positive".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = "
fence:
  center: { latitude_deg: 37.5665, longitude_deg: 126.978 }
  max_radius_km: 3000.0
";
        let cfg: WatchConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.horizon_hours, 48);
        assert_eq!(cfg.step_minutes, 30);
        assert_eq!(cfg.decay_altitude_km, Some(200.0));
        assert_eq!(cfg.policy, RiskPolicy::Both);
        assert_eq!(cfg.earth_model, EarthModel::Spherical);
        assert_eq!(cfg.fence.min_radius_km, 0.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn explicit_null_disables_altitude_gate() {
        let yaml = "
fence:
  center: { latitude_deg: 0.0, longitude_deg: 0.0 }
  max_radius_km: 1000.0
decay_altitude_km: null
";
        let cfg: WatchConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.decay_altitude_km, None);
    }

    #[test]
    fn horizon_outside_range_is_rejected() {
        let mut cfg = WatchConfig::for_reference(GeoPoint::new(0.0, 0.0), 1000.0);
        cfg.horizon_hours = 241;
        assert!(cfg.validate().is_err());
        cfg.horizon_hours = 0;
        assert!(cfg.validate().is_err());
        cfg.horizon_hours = 240;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn annulus_bounds_are_checked() {
        let mut cfg = WatchConfig::for_reference(GeoPoint::new(0.0, 0.0), 1000.0);
        cfg.fence.min_radius_km = 1000.0;
        assert!(cfg.validate().is_err());
    }
}
