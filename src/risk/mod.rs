mod classifier;
mod policy;

pub use classifier::{
    assess_static, dynamic_level, probe_dynamic, DynamicSignals, RiskLevel, RiskVerdict,
    StaticSignals,
};
pub use policy::{DynamicThresholds, RiskPolicy, StaticThresholds};
