//! Visual styles of the overlays.
//!
//! Style lookups are exhaustive functions over closed enums, so every [`Quality`] value has exactly one style and
//! there is no fallback for unknown values.

use crate::model::Quality;
use crate::Color;

/// Z-index of street lines. Crossings are drawn above.
pub const STREET_Z_INDEX: u32 = 0;
/// Z-index of crossing lines.
pub const CROSSING_Z_INDEX: u32 = 1;

/// Smallest obstacle marker scale, used at low zoom levels.
pub const MIN_MARKER_SCALE: f64 = 4.0;
/// Largest obstacle marker scale, used at high zoom levels.
pub const MAX_MARKER_SCALE: f64 = 6.5;

const STREET_OPACITY: f32 = 0.7;
const STREET_WIDTH: f64 = 3.0;
const CROSSING_WIDTH: f64 = 4.0;

/// Style of a polyline overlay.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Stroke width in pixels.
    pub width: f64,
    /// Lines with higher z-index are drawn on top.
    pub z_index: u32,
}

/// Shape of a marker overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerShape {
    /// Filled circle.
    Circle,
    /// Default pin of the map widget.
    Pin,
    /// Image loaded from the URL.
    Icon(String),
}

/// Style of a marker overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Marker shape.
    pub shape: MarkerShape,
    /// Fill color.
    pub fill: Color,
    /// Fill opacity in `0.0..=1.0`.
    pub fill_opacity: f32,
    /// Outline color.
    pub outline: Color,
    /// Outline width in pixels.
    pub outline_width: f64,
    /// Size multiplier of the marker.
    pub scale: f64,
}

/// Line style of a street segment with the given quality.
pub fn street_line_style(quality: Quality) -> LineStyle {
    let color = match quality {
        Quality::Good => Color::GREEN,
        Quality::Moderate => Color::YELLOW,
        Quality::Poor => Color::RED,
        Quality::NotDone => Color::BLUE,
    };

    LineStyle {
        color,
        opacity: STREET_OPACITY,
        width: STREET_WIDTH,
        z_index: STREET_Z_INDEX,
    }
}

/// Line style of a crossing.
pub fn crossing_line_style(zebra: bool) -> LineStyle {
    LineStyle {
        color: if zebra { Color::WHITE } else { Color::BLACK },
        opacity: 1.0,
        width: CROSSING_WIDTH,
        z_index: CROSSING_Z_INDEX,
    }
}

/// Marker scale for the given zoom level of the map.
pub fn obstacle_marker_scale(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return MIN_MARKER_SCALE;
    }

    zoom.clamp(MIN_MARKER_SCALE, MAX_MARKER_SCALE)
}

/// Style of an obstacle marker.
pub fn obstacle_marker_style(scale: f64) -> MarkerStyle {
    MarkerStyle {
        shape: MarkerShape::Circle,
        fill: Color::ORANGE,
        fill_opacity: 1.0,
        outline: Color::BLACK,
        outline_width: 1.0,
        scale,
    }
}

/// Style of an institution marker.
pub fn institution_marker_style(icon: Option<&str>) -> MarkerStyle {
    let shape = match icon {
        Some(url) if !url.is_empty() => MarkerShape::Icon(url.to_string()),
        _ => MarkerShape::Pin,
    };

    MarkerStyle {
        shape,
        fill: Color::RED,
        fill_opacity: 1.0,
        outline: Color::BLACK,
        outline_width: 1.0,
        scale: 1.0,
    }
}
