//! The map surface is the interactive map widget the overlays are drawn on.
//!
//! The pipeline does not know how the map is rendered. It only needs the primitives of [`MapSurface`]: draw a line or
//! a marker, show and hide info popups, and get notified about user interaction. Interaction is delivered to
//! handlers registered with [`MapSurface::on_zoom_change`] and [`MapSurface::on_select`]. Handlers receive the surface
//! they were registered on, so they can change the overlays in response.
//!
//! [`MemorySurface`] is an implementation that keeps everything in memory. It is used to run the pipeline without a
//! real widget.

use accessmap_types::{GeoPoint2d, Path};
use maybe_sync::{MaybeSend, MaybeSync};

use crate::error::AccessMapError;
use crate::popup::PopupContent;
use crate::symbol::{LineStyle, MarkerStyle};

mod memory;

pub use memory::{DrawnLine, DrawnMarker, MemorySurface, OpenedPopup};

/// Handle of a line or a marker drawn on a surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

/// Handle of an info popup shown on a surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopupId(pub u64);

/// Where an info popup is attached.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PopupAnchor {
    /// Fixed position on the map.
    Point(GeoPoint2d),
    /// Above the given overlay (usually a marker).
    Overlay(OverlayId),
}

/// Interactive map widget.
///
/// Handlers registered with [`MapSurface::on_zoom_change`] and [`MapSurface::on_select`] must only be invoked from the
/// widget's own event dispatch, never from within a call to one of the trait methods. The overlay handlers lock the
/// same state the reconciler holds while it draws.
pub trait MapSurface {
    /// Draws a polyline along the `path`.
    fn draw_line(&mut self, path: &Path, style: &LineStyle) -> Result<OverlayId, AccessMapError>;
    /// Places a marker at the `point`.
    fn draw_marker(
        &mut self,
        point: GeoPoint2d,
        style: &MarkerStyle,
    ) -> Result<OverlayId, AccessMapError>;
    /// Changes the scale of a previously drawn marker.
    fn set_marker_scale(&mut self, marker: OverlayId, scale: f64) -> Result<(), AccessMapError>;
    /// Removes a line or a marker from the map.
    fn remove_overlay(&mut self, overlay: OverlayId) -> Result<(), AccessMapError>;
    /// Shows an info popup.
    fn open_popup(
        &mut self,
        content: &PopupContent,
        anchor: PopupAnchor,
    ) -> Result<PopupId, AccessMapError>;
    /// Hides the popup. Closing a popup that is not open does nothing.
    fn close_popup(&mut self, popup: PopupId);
    /// Current zoom level of the map.
    fn zoom(&self) -> f64;
    /// Registers a handler called every time the zoom level changes.
    fn on_zoom_change(&mut self, handler: Box<dyn ZoomHandler>);
    /// Registers a handler called every time the user clicks (taps) an overlay.
    fn on_select(&mut self, handler: Box<dyn SelectHandler>);
}

/// Handler of zoom level changes.
pub trait ZoomHandler: MaybeSend + MaybeSync {
    /// Handle the new zoom level.
    fn handle(&self, zoom: f64, surface: &mut dyn MapSurface);
}

impl<T> ZoomHandler for T
where
    T: Fn(f64, &mut dyn MapSurface) + MaybeSend + MaybeSync,
{
    fn handle(&self, zoom: f64, surface: &mut dyn MapSurface) {
        self(zoom, surface)
    }
}

/// Handler of overlay selection.
pub trait SelectHandler: MaybeSend + MaybeSync {
    /// Handle the click on the `overlay`.
    fn handle(&self, overlay: OverlayId, surface: &mut dyn MapSurface);
}

impl<T> SelectHandler for T
where
    T: Fn(OverlayId, &mut dyn MapSurface) + MaybeSend + MaybeSync,
{
    fn handle(&self, overlay: OverlayId, surface: &mut dyn MapSurface) {
        self(overlay, surface)
    }
}
