use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use super::error::TrackError;

/// Source of inertial positions for one tracked object.
///
/// An error for a given epoch means that epoch is outside the valid
/// propagation domain for the object; callers skip the sample and move
/// on, they do not abort.
pub trait Propagator {
    fn position_km(&self, at: DateTime<Utc>) -> Result<[f64; 3], TrackError>;
}

/// SGP4-backed propagator over one element set.
pub struct Sgp4Propagator<'a> {
    elements: &'a Elements,
    constants: &'a Constants,
}

impl<'a> Sgp4Propagator<'a> {
    pub fn new(elements: &'a Elements, constants: &'a Constants) -> Self {
        Self {
            elements,
            constants,
        }
    }
}

impl Propagator for Sgp4Propagator<'_> {
    fn position_km(&self, at: DateTime<Utc>) -> Result<[f64; 3], TrackError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| TrackError::Propagation(e.to_string()))?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| TrackError::Propagation(e.to_string()))?;

        Ok(prediction.position)
    }
}
