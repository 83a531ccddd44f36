use accessmap_types::GeoPoint2d;
use serde::{Deserialize, Serialize};

/// Position of an institution in the loaded list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstitutionId(pub usize);

/// Public institution (school, clinic, library...) shown with a static marker.
///
/// Institutions are drawn once after loading and do not take part in filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    /// Marker location.
    pub position: GeoPoint2d,
    /// Name of the institution.
    pub title: String,
    /// URL of the marker icon. The default pin is used if not set.
    #[serde(default)]
    pub icon: Option<String>,
    /// Markup shown in the info popup.
    #[serde(rename = "infoContent", default)]
    pub info_content: String,
}
