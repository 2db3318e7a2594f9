mod config;
mod engine;
mod event;

pub use config::{ConfigError, WatchConfig};
pub use engine::{first_match, watch_all, BatchOutcome, WatchReport};
pub use event::{DecayEvent, StaticRisk};
