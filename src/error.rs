//! Errors reported to the caller of a single anonymization request.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrivacyError {
    /// There are no points to anonymize, the caller should skip the visualization
    #[error("no located records to anonymize")]
    EmptyInput,

    /// A coordinate is NaN or infinite
    #[error("point #{index} has a non-finite coordinate ({x}, {y})")]
    InvalidCoordinate { index: usize, x: f64, y: f64 },

    /// The number of bins per axis must lie in `1..=MAX_RESOLUTION`
    #[error("invalid resolution {0}, expected between 1 and {max} bins per axis", max = crate::geometry::MAX_RESOLUTION)]
    InvalidResolution(usize),

    /// The survey has no field of type `geopoint`
    #[error("the survey has no geopoint field")]
    NoGeopointField,

    /// A submission doesn't answer the geopoint field
    #[error("submission #{record} has no value for geopoint field {field:?}")]
    MissingGeopoint { field: String, record: usize },

    /// A geopoint value isn't a pair of numbers
    #[error("malformed geopoint {value:?}")]
    MalformedGeopoint { value: String },
}

pub type Result<T> = std::result::Result<T, PrivacyError>;
