use chrono::NaiveDateTime;
use sgp4::{Constants, Elements};

use super::error::ElementError;
use crate::track::Sgp4Propagator;

#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub catalog_id: u64,
    pub name: String,
    pub source: String,
}

/// One tracked object: parsed elements plus the precomputed SGP4
/// constants. Immutable once loaded.
pub struct ElementSet {
    pub info: ObjectInfo,
    pub elements: Elements,
    pub constants: Constants,
}

impl ElementSet {
    pub fn from_elements(elements: Elements, source: &str) -> Result<Self, ElementError> {
        let constants =
            Constants::from_elements(&elements).map_err(|e| ElementError::InvalidRecord {
                file: source.to_string(),
                message: e.to_string(),
            })?;

        let name = elements
            .object_name
            .clone()
            .unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

        Ok(Self {
            info: ObjectInfo {
                catalog_id: elements.norad_id,
                name,
                source: source.to_string(),
            },
            elements,
            constants,
        })
    }

    pub fn epoch(&self) -> NaiveDateTime {
        self.elements.datetime
    }

    pub fn propagator(&self) -> Sgp4Propagator<'_> {
        Sgp4Propagator::new(&self.elements, &self.constants)
    }
}
