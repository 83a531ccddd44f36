//! Geographic primitives shared by the accessibility map crates.
//!
//! Coordinates are stored the way the map widget and the JSON fixtures express them: a latitude and a longitude
//! in degrees, named `lat` and `lng`.

mod error;
mod path;
mod point;

pub use error::AccessMapTypesError;
pub use path::Path;
pub use point::GeoPoint2d;
