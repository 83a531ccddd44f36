use accessmap_types::Path;
use serde::{Deserialize, Serialize};

/// Position of a crossing in the loaded crossing list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrossingId(pub usize);

/// Pedestrian crossing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    /// Geometry of the crossing.
    pub path: Path,
    /// Name of the crossed street.
    pub street_name: String,
    /// Whether the crossing is marked with zebra stripes.
    pub zebra: bool,
    /// Whether there are curb ramps on both sides.
    pub ramp: bool,
    /// Whether the crossing is controlled by a traffic light.
    pub traffic_light: bool,
}
