use std::collections::BTreeMap;

use accessmap_types::{GeoPoint2d, Path};
use log::debug;

use crate::error::AccessMapError;
use crate::popup::PopupContent;
use crate::surface::{
    MapSurface, OverlayId, PopupAnchor, PopupId, SelectHandler, ZoomHandler,
};
use crate::symbol::{LineStyle, MarkerStyle};

/// Line stored in a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnLine {
    /// Line geometry.
    pub path: Path,
    /// Line style.
    pub style: LineStyle,
}

/// Marker stored in a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnMarker {
    /// Marker position.
    pub position: GeoPoint2d,
    /// Marker style, including the current scale.
    pub style: MarkerStyle,
}

/// Popup currently shown on a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedPopup {
    /// Popup content.
    pub content: PopupContent,
    /// Where the popup is attached.
    pub anchor: PopupAnchor,
}

/// Map surface that keeps overlays in memory.
///
/// User interaction is emulated with [`MemorySurface::set_zoom`] and [`MemorySurface::select`], which call the
/// registered handlers the same way a real widget would.
pub struct MemorySurface {
    center: GeoPoint2d,
    zoom: f64,
    next_id: u64,
    lines: BTreeMap<OverlayId, DrawnLine>,
    markers: BTreeMap<OverlayId, DrawnMarker>,
    popups: BTreeMap<PopupId, OpenedPopup>,
    zoom_handlers: Vec<Box<dyn ZoomHandler>>,
    select_handlers: Vec<Box<dyn SelectHandler>>,
}

impl MemorySurface {
    /// Creates an empty surface with the given view.
    pub fn new(center: GeoPoint2d, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            next_id: 0,
            lines: BTreeMap::new(),
            markers: BTreeMap::new(),
            popups: BTreeMap::new(),
            zoom_handlers: Vec::new(),
            select_handlers: Vec::new(),
        }
    }

    /// Center of the map view.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Changes the zoom level and notifies zoom handlers.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;

        let handlers = std::mem::take(&mut self.zoom_handlers);
        for handler in &handlers {
            handler.handle(zoom, self);
        }

        let added = std::mem::replace(&mut self.zoom_handlers, handlers);
        self.zoom_handlers.extend(added);
    }

    /// Emulates a click on the overlay and notifies select handlers.
    pub fn select(&mut self, overlay: OverlayId) {
        let handlers = std::mem::take(&mut self.select_handlers);
        for handler in &handlers {
            handler.handle(overlay, self);
        }

        let added = std::mem::replace(&mut self.select_handlers, handlers);
        self.select_handlers.extend(added);
    }

    /// Lines currently on the map.
    pub fn lines(&self) -> impl Iterator<Item = (OverlayId, &DrawnLine)> + '_ {
        self.lines.iter().map(|(id, line)| (*id, line))
    }

    /// Markers currently on the map.
    pub fn markers(&self) -> impl Iterator<Item = (OverlayId, &DrawnMarker)> + '_ {
        self.markers.iter().map(|(id, marker)| (*id, marker))
    }

    /// Returns the line with the given id.
    pub fn line(&self, id: OverlayId) -> Option<&DrawnLine> {
        self.lines.get(&id)
    }

    /// Returns the marker with the given id.
    pub fn marker(&self, id: OverlayId) -> Option<&DrawnMarker> {
        self.markers.get(&id)
    }

    /// Popups currently shown.
    pub fn open_popups(&self) -> impl Iterator<Item = (PopupId, &OpenedPopup)> + '_ {
        self.popups.iter().map(|(id, popup)| (*id, popup))
    }

    /// Total number of lines and markers on the map.
    pub fn overlay_count(&self) -> usize {
        self.lines.len() + self.markers.len()
    }

    /// Number of registered zoom handlers.
    pub fn zoom_handler_count(&self) -> usize {
        self.zoom_handlers.len()
    }

    /// Number of registered select handlers.
    pub fn select_handler_count(&self) -> usize {
        self.select_handlers.len()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn contains_overlay(&self, id: OverlayId) -> bool {
        self.lines.contains_key(&id) || self.markers.contains_key(&id)
    }
}

impl MapSurface for MemorySurface {
    fn draw_line(&mut self, path: &Path, style: &LineStyle) -> Result<OverlayId, AccessMapError> {
        path.validate()?;
        let id = OverlayId(self.next_id());
        self.lines.insert(
            id,
            DrawnLine {
                path: path.clone(),
                style: *style,
            },
        );

        Ok(id)
    }

    fn draw_marker(
        &mut self,
        point: GeoPoint2d,
        style: &MarkerStyle,
    ) -> Result<OverlayId, AccessMapError> {
        point.validate()?;
        let id = OverlayId(self.next_id());
        self.markers.insert(
            id,
            DrawnMarker {
                position: point,
                style: style.clone(),
            },
        );

        Ok(id)
    }

    fn set_marker_scale(&mut self, marker: OverlayId, scale: f64) -> Result<(), AccessMapError> {
        let marker = self.markers.get_mut(&marker).ok_or(AccessMapError::NotFound)?;
        marker.style.scale = scale;
        Ok(())
    }

    fn remove_overlay(&mut self, overlay: OverlayId) -> Result<(), AccessMapError> {
        if self.lines.remove(&overlay).is_some() || self.markers.remove(&overlay).is_some() {
            Ok(())
        } else {
            Err(AccessMapError::NotFound)
        }
    }

    fn open_popup(
        &mut self,
        content: &PopupContent,
        anchor: PopupAnchor,
    ) -> Result<PopupId, AccessMapError> {
        if let PopupAnchor::Overlay(overlay) = anchor {
            if !self.contains_overlay(overlay) {
                return Err(AccessMapError::NotFound);
            }
        }

        let id = PopupId(self.next_id());
        debug!("Opening popup {id:?} for {}", content.title());
        self.popups.insert(
            id,
            OpenedPopup {
                content: content.clone(),
                anchor,
            },
        );

        Ok(id)
    }

    fn close_popup(&mut self, popup: PopupId) {
        self.popups.remove(&popup);
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn on_zoom_change(&mut self, handler: Box<dyn ZoomHandler>) {
        self.zoom_handlers.push(handler);
    }

    fn on_select(&mut self, handler: Box<dyn SelectHandler>) {
        self.select_handlers.push(handler);
    }
}
