//! Error types used by the crate.

use accessmap_types::AccessMapTypesError;
use thiserror::Error;

use crate::filter::ControlId;

/// Accessibility map error type.
#[derive(Debug, Error)]
pub enum AccessMapError {
    /// I/O error while fetching a fixture (network or file).
    #[error("failed to load data: {0}")]
    Io(String),
    /// Fixture or overlay does not exist.
    #[error("item not found")]
    NotFound,
    /// Fixture content could not be decoded.
    #[error("failed to decode {source_name}: {reason}")]
    Decoding {
        /// Name of the fixture source that failed to decode.
        source_name: String,
        /// Decoder message.
        reason: String,
    },
    /// The datasets have not been loaded yet.
    #[error("data not ready")]
    NotReady,
    /// The datasets were already loaded for this session.
    #[error("datasets are already loaded")]
    AlreadyLoaded,
    /// A filter control reported a value it does not support.
    #[error("invalid value {value:?} for filter control {control}")]
    InvalidPredicate {
        /// Control that reported the value.
        control: ControlId,
        /// The rejected value.
        value: String,
    },
    /// Entity geometry cannot be drawn.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] AccessMapTypesError),
    /// Invalid session configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Error reading data from the FS.
    #[error("failed to read file")]
    FsIo(#[from] std::io::Error),
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for AccessMapError {
    fn from(value: reqwest::Error) -> Self {
        Self::Io(value.to_string())
    }
}
