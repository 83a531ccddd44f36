//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error, PartialEq)]
pub enum AccessMapTypesError {
    /// A path does not have enough vertices to be drawn as a line.
    #[error("path must contain at least 2 points, got {0}")]
    TooFewPoints(usize),
    /// A coordinate is out of range or not a finite number.
    #[error("invalid coordinate: lat {lat}, lng {lng}")]
    InvalidCoordinate {
        /// Latitude of the invalid point.
        lat: f64,
        /// Longitude of the invalid point.
        lng: f64,
    },
}
