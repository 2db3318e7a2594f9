mod error;
mod propagator;
mod sample;
mod sampler;

pub use error::TrackError;
pub use propagator::{Propagator, Sgp4Propagator};
pub use sample::GeodeticSample;
pub use sampler::GroundTrack;
