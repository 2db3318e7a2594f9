use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("propagation error: {0}")]
    Propagation(String),
}
