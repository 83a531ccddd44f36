use serde::{Deserialize, Serialize};

use crate::{AccessMapTypesError, GeoPoint2d};

/// Ordered sequence of coordinates describing a polyline on the map.
///
/// Paths are deserialized as plain JSON arrays of points. Deserialization does not check the number of vertices;
/// use [`Path::validate`] before drawing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Path {
    points: Vec<GeoPoint2d>,
}

impl Path {
    /// Creates a new path from the given vertices.
    pub fn new(points: Vec<GeoPoint2d>) -> Self {
        Self { points }
    }

    /// Vertices of the path.
    pub fn points(&self) -> &[GeoPoint2d] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the path has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertex at index `floor(len / 2)`.
    ///
    /// This is the anchor used for info popups. It is not a geometric midpoint: for a path with a long first
    /// segment and many short ones the vertex can be far from the middle of the line.
    pub fn midpoint_vertex(&self) -> Option<GeoPoint2d> {
        self.points.get(self.points.len() / 2).copied()
    }

    /// Checks that the path can be drawn as a line: at least 2 vertices, all with valid coordinates.
    pub fn validate(&self) -> Result<(), AccessMapTypesError> {
        if self.points.len() < 2 {
            return Err(AccessMapTypesError::TooFewPoints(self.points.len()));
        }

        self.points.iter().try_for_each(GeoPoint2d::validate)
    }
}

impl From<Vec<GeoPoint2d>> for Path {
    fn from(points: Vec<GeoPoint2d>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<GeoPoint2d> for Path {
    fn from_iter<T: IntoIterator<Item = GeoPoint2d>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlng;

    #[test]
    fn midpoint_uses_truncated_index() {
        let path = Path::new(vec![latlng!(1.0, 1.0), latlng!(2.0, 2.0)]);
        assert_eq!(path.midpoint_vertex(), Some(latlng!(2.0, 2.0)));

        let path = Path::new(vec![latlng!(1.0, 1.0), latlng!(2.0, 2.0), latlng!(3.0, 3.0)]);
        assert_eq!(path.midpoint_vertex(), Some(latlng!(2.0, 2.0)));

        let path: Path = (0..5).map(|v| latlng!(v as f64, 0.0)).collect();
        assert_eq!(path.midpoint_vertex(), Some(latlng!(2.0, 0.0)));

        assert_eq!(Path::default().midpoint_vertex(), None);
    }

    #[test]
    fn validation_requires_two_points() {
        assert_eq!(
            Path::default().validate(),
            Err(AccessMapTypesError::TooFewPoints(0))
        );
        assert_eq!(
            Path::new(vec![latlng!(1.0, 1.0)]).validate(),
            Err(AccessMapTypesError::TooFewPoints(1))
        );
        assert!(Path::new(vec![latlng!(1.0, 1.0), latlng!(1.5, 1.0)])
            .validate()
            .is_ok());
        assert!(Path::new(vec![latlng!(1.0, 1.0), latlng!(100.0, 1.0)])
            .validate()
            .is_err());
    }

    #[test]
    fn deserializes_from_array() {
        let path: Path = serde_json::from_str(
            r#"[{"lat": 56.94, "lng": 24.17}, {"lat": 56.95, "lng": 24.18}]"#,
        )
        .expect("valid json");
        assert_eq!(path.len(), 2);
        assert_eq!(path.points()[1], latlng!(56.95, 24.18));
    }
}
