use std::fmt::{Display, Formatter};

use accessmap_types::{GeoPoint2d, Path};
use serde::{Deserialize, Serialize};

/// Position of a street segment in the loaded street list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreetId(pub usize);

/// Surveyed quality of a street segment.
///
/// The set of values is closed: a fixture with any other quality string fails to load.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Quality {
    /// Good surface, comfortable for wheelchairs and strollers.
    Good,
    /// Passable with some effort.
    Moderate,
    /// Hard or impossible to pass.
    Poor,
    /// The segment has not been surveyed yet.
    NotDone,
}

impl Quality {
    /// All quality values in the order they are listed in the filter control.
    pub const ALL: [Quality; 4] = [
        Quality::Good,
        Quality::Moderate,
        Quality::Poor,
        Quality::NotDone,
    ];

    /// Name of the value as used in the fixtures and the filter control.
    pub fn name(&self) -> &'static str {
        match self {
            Quality::Good => "good",
            Quality::Moderate => "moderate",
            Quality::Poor => "poor",
            Quality::NotDone => "notDone",
        }
    }

    /// Parses the fixture/control name of the value.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.name() == name)
    }

    /// Label shown to the user in the info popup.
    pub fn label(&self) -> &'static str {
        match self {
            Quality::Good => "Laba",
            Quality::Moderate => "Vidēja",
            Quality::Poor => "Slikta",
            Quality::NotDone => "Nav novērtēta",
        }
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Something blocking a sidewalk: a pole, a missing ramp, a parked car spot etc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Location of the obstacle.
    #[serde(flatten)]
    pub position: GeoPoint2d,
    /// Short description of the obstacle.
    pub description: String,
    /// URL of a photo of the obstacle.
    #[serde(default)]
    pub image: String,
}

/// Surveyed street segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetSegment {
    /// Geometry of the segment.
    pub path: Path,
    /// Name of the street the segment belongs to.
    pub street_name: String,
    /// Surveyed surface quality.
    pub quality: Quality,
    /// Whether there is a sidewalk along the segment.
    pub sidewalk: bool,
    /// Whether the segment is paved.
    pub paved: bool,
    /// Obstacles found on the segment.
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl StreetSegment {
    /// Returns true if at least one obstacle was found on the segment.
    pub fn has_obstacles(&self) -> bool {
        !self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accessmap_types::latlng;

    #[test]
    fn quality_names() {
        for quality in Quality::ALL {
            assert_eq!(Quality::from_name(quality.name()), Some(quality));
        }
        assert_eq!(Quality::from_name("excellent"), None);
        assert_eq!(Quality::from_name("NotDone"), None);
    }

    #[test]
    fn street_deserialization() {
        let street: StreetSegment = serde_json::from_str(
            r#"{
                "path": [{"lat": 56.94, "lng": 24.17}, {"lat": 56.95, "lng": 24.18}],
                "street_name": "Ļudoņas iela",
                "quality": "notDone",
                "sidewalk": true,
                "paved": false,
                "obstacles": [
                    {"lat": 56.945, "lng": 24.175, "description": "Stabs", "image": "img/pole.jpg"}
                ]
            }"#,
        )
        .expect("valid street");

        assert_eq!(street.quality, Quality::NotDone);
        assert!(street.has_obstacles());
        assert_eq!(street.obstacles[0].position, latlng!(56.945, 24.175));
        assert_eq!(street.obstacles[0].image, "img/pole.jpg");
    }

    #[test]
    fn missing_obstacles_mean_none() {
        let street: StreetSegment = serde_json::from_str(
            r#"{"path": [], "street_name": "A", "quality": "good", "sidewalk": false, "paved": true}"#,
        )
        .expect("valid street");
        assert!(!street.has_obstacles());
    }

    #[test]
    fn unknown_quality_is_rejected() {
        let result = serde_json::from_str::<StreetSegment>(
            r#"{"path": [], "street_name": "A", "quality": "excellent", "sidewalk": false, "paved": true}"#,
        );
        assert!(result.is_err());
    }
}
