use accessmap_types::{latlng, GeoPoint2d};
use serde::{Deserialize, Serialize};

use crate::error::AccessMapError;
use crate::store::FixtureSources;

const DEFAULT_CENTER: GeoPoint2d = latlng!(56.942819743474416, 24.17891243732727);
const DEFAULT_ZOOM: f64 = 14.0;

/// Configuration of a map session: where the fixtures are and the initial map view.
///
/// Can be read from JSON. All fields are optional and fall back to the defaults:
///
/// ```json
/// {
///     "fixtures": { "streets": "data/streets.json", "crossings": "data/crossings.json" },
///     "center": { "lat": 56.9428, "lng": 24.1789 },
///     "zoom": 14
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    fixtures: FixtureSources,
    center: GeoPoint2d,
    zoom: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fixtures: FixtureSources::default(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl SessionConfig {
    /// Parses and validates the configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AccessMapError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| AccessMapError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration from a JSON file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, AccessMapError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks that the initial view is valid.
    pub fn validate(&self) -> Result<(), AccessMapError> {
        self.center
            .validate()
            .map_err(|err| AccessMapError::Config(err.to_string()))?;
        if !self.zoom.is_finite() || self.zoom < 0.0 {
            return Err(AccessMapError::Config(format!(
                "invalid zoom level {}",
                self.zoom
            )));
        }

        Ok(())
    }

    /// Fixture sources.
    pub fn fixtures(&self) -> &FixtureSources {
        &self.fixtures
    }

    /// Sets fixture sources.
    pub fn with_fixtures(mut self, fixtures: FixtureSources) -> Self {
        self.fixtures = fixtures;
        self
    }

    /// Sets fixture sources.
    pub fn set_fixtures(&mut self, fixtures: FixtureSources) {
        self.fixtures = fixtures;
    }

    /// Initial center of the map.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Sets initial center of the map.
    pub fn with_center(mut self, center: GeoPoint2d) -> Self {
        self.center = center;
        self
    }

    /// Sets initial center of the map.
    pub fn set_center(&mut self, center: GeoPoint2d) {
        self.center = center;
    }

    /// Initial zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets initial zoom level.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Sets initial zoom level.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = SessionConfig::from_json("{}").expect("valid config");
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.fixtures().streets, "streets.json");
        assert_eq!(
            config.fixtures().institutions.as_deref(),
            Some("institutions.json")
        );
    }

    #[test]
    fn partial_json() {
        let config = SessionConfig::from_json(
            r#"{"fixtures": {"streets": "data/s.json", "crossings": "data/c.json"}, "zoom": 16}"#,
        )
        .expect("valid config");
        assert_eq!(config.fixtures().crossings, "data/c.json");
        assert_eq!(config.fixtures().institutions, None);
        approx::assert_abs_diff_eq!(config.zoom(), 16.0);
        assert_eq!(config.center(), DEFAULT_CENTER);
    }

    #[test]
    fn invalid_view_is_rejected() {
        assert_matches!(
            SessionConfig::from_json(r#"{"zoom": -1}"#),
            Err(AccessMapError::Config(_))
        );
        assert_matches!(
            SessionConfig::from_json(r#"{"center": {"lat": 120, "lng": 0}}"#),
            Err(AccessMapError::Config(_))
        );
        assert_matches!(
            SessionConfig::from_json(r#"{"zoom": "far"}"#),
            Err(AccessMapError::Config(_))
        );
    }

    #[test]
    fn builder_setters() {
        let config = SessionConfig::default()
            .with_zoom(12.0)
            .with_center(latlng!(57.0, 24.0));
        approx::assert_abs_diff_eq!(config.zoom(), 12.0);
        assert_eq!(config.center(), latlng!(57.0, 24.0));
    }
}
