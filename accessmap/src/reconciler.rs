//! Overlay reconciler: keeps the overlays on the map surface in sync with the filtered datasets.
//!
//! Every [`OverlayReconciler::reconcile`] call removes all overlays drawn by the previous call and draws the given
//! view from scratch, so the map always shows exactly the filtered entities no matter how many times the filters
//! changed in between.
//!
//! The state the surface handlers need (popup sources, obstacle markers and the currently open popup) lives in
//! a single shared [`OverlayState`] owned by the reconciler. Handlers are registered once per reconciler and read
//! the current state when an event arrives, so they are never re-registered by the redraw cycle.

use std::collections::HashMap;
use std::sync::Arc;

use accessmap_types::{AccessMapTypesError, GeoPoint2d, Path};
use log::{debug, warn};
use parking_lot::RwLock;

use crate::error::AccessMapError;
use crate::filter::FilteredView;
use crate::model::{Crossing, CrossingId, Institution, InstitutionId, StreetId, StreetSegment};
use crate::popup::{
    crossing_popup, institution_popup, obstacle_popup, street_popup, PopupContent, PopupTracker,
};
use crate::surface::{MapSurface, OverlayId, PopupAnchor, PopupId, SelectHandler, ZoomHandler};
use crate::symbol::{
    crossing_line_style, institution_marker_style, obstacle_marker_scale, obstacle_marker_style,
    street_line_style,
};

/// Entity an overlay was drawn for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OverlaySource {
    /// Line of a street segment.
    Street(StreetId),
    /// Marker of the obstacle with the given index in the street's obstacle list.
    Obstacle(StreetId, usize),
    /// Line of a crossing.
    Crossing(CrossingId),
    /// Marker of an institution.
    Institution(InstitutionId),
}

/// Result of a reconciliation pass.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Overlays removed from the previous pass.
    pub removed: usize,
    /// Street lines drawn.
    pub streets: usize,
    /// Obstacle markers drawn.
    pub obstacle_markers: usize,
    /// Crossing lines drawn.
    pub crossings: usize,
    /// Entities that could not be drawn.
    pub skipped: usize,
}

impl ReconcileReport {
    /// Number of overlays drawn by the pass.
    pub fn drawn(&self) -> usize {
        self.streets + self.obstacle_markers + self.crossings
    }
}

#[derive(Debug, Clone)]
struct PopupSource {
    source: OverlaySource,
    content: PopupContent,
    anchor: PopupAnchor,
}

/// Overlay bookkeeping shared between the reconciler and the surface handlers.
#[derive(Debug, Default)]
pub struct OverlayState {
    drawn: Vec<OverlayId>,
    obstacle_markers: Vec<OverlayId>,
    institutions: Vec<OverlayId>,
    popups: HashMap<OverlayId, PopupSource>,
    tracker: PopupTracker,
}

impl OverlayState {
    fn clear(&mut self, surface: &mut dyn MapSurface) -> usize {
        let drawn = std::mem::take(&mut self.drawn);
        self.tracker.close_if(surface, |owner| drawn.contains(&owner));

        let mut removed = 0;
        for overlay in &drawn {
            self.popups.remove(overlay);
            match surface.remove_overlay(*overlay) {
                Ok(()) => removed += 1,
                Err(err) => warn!("Failed to remove overlay {overlay:?}: {err}"),
            }
        }

        self.obstacle_markers.clear();
        removed
    }

    fn register(&mut self, overlay: OverlayId, source: OverlaySource, content: PopupContent, anchor: PopupAnchor) {
        self.popups.insert(
            overlay,
            PopupSource {
                source,
                content,
                anchor,
            },
        );
    }

    fn open_popup(&mut self, surface: &mut dyn MapSurface, overlay: OverlayId) {
        let Some(popup) = self.popups.get(&overlay) else {
            debug!("No popup for overlay {overlay:?}");
            return;
        };

        if let Err(err) = self
            .tracker
            .open(surface, overlay, &popup.content, popup.anchor)
        {
            warn!("Failed to open popup for {:?}: {err}", popup.source);
        }
    }
}

struct MarkerScaleHandler {
    state: Arc<RwLock<OverlayState>>,
}

impl ZoomHandler for MarkerScaleHandler {
    fn handle(&self, zoom: f64, surface: &mut dyn MapSurface) {
        let scale = obstacle_marker_scale(zoom);
        let state = self.state.read();
        debug!(
            "Zoom changed to {zoom}, rescaling {} obstacle markers to {scale}",
            state.obstacle_markers.len()
        );

        for marker in &state.obstacle_markers {
            if let Err(err) = surface.set_marker_scale(*marker, scale) {
                warn!("Failed to rescale marker {marker:?}: {err}");
            }
        }
    }
}

struct PopupHandler {
    state: Arc<RwLock<OverlayState>>,
}

impl SelectHandler for PopupHandler {
    fn handle(&self, overlay: OverlayId, surface: &mut dyn MapSurface) {
        self.state.write().open_popup(surface, overlay);
    }
}

/// Draws filtered datasets to a [`MapSurface`].
#[derive(Default)]
pub struct OverlayReconciler {
    state: Arc<RwLock<OverlayState>>,
    listeners_registered: bool,
    institutions_drawn: bool,
}

impl OverlayReconciler {
    /// Creates a new reconciler with nothing drawn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers zoom and select handlers on the surface.
    ///
    /// Handlers are registered only on the first call; consequent calls do nothing.
    pub fn register_listeners(&mut self, surface: &mut dyn MapSurface) {
        if self.listeners_registered {
            debug!("Overlay listeners are already registered");
            return;
        }

        surface.on_zoom_change(Box::new(MarkerScaleHandler {
            state: self.state.clone(),
        }));
        surface.on_select(Box::new(PopupHandler {
            state: self.state.clone(),
        }));
        self.listeners_registered = true;
    }

    /// Replaces overlays drawn by the previous call with overlays for the given view.
    ///
    /// An entity that cannot be drawn is skipped and counted in [`ReconcileReport::skipped`], the rest of the view
    /// is still drawn. The surface must not dispatch zoom or select handlers while it is being drawn on.
    pub fn reconcile(&self, surface: &mut dyn MapSurface, view: &FilteredView) -> ReconcileReport {
        let mut state = self.state.write();
        let mut report = ReconcileReport {
            removed: state.clear(surface),
            ..Default::default()
        };

        let scale = obstacle_marker_scale(surface.zoom());
        for (id, street) in view.streets() {
            match draw_street(&mut state, surface, *id, street) {
                Ok(()) => report.streets += 1,
                Err(err) => {
                    warn!("Street {id:?} ({}) is not drawn: {err}", street.street_name);
                    report.skipped += 1;
                    continue;
                }
            }

            for (index, obstacle) in street.obstacles.iter().enumerate() {
                let source = OverlaySource::Obstacle(*id, index);
                match surface.draw_marker(obstacle.position, &obstacle_marker_style(scale)) {
                    Ok(marker) => {
                        state.drawn.push(marker);
                        state.obstacle_markers.push(marker);
                        state.register(
                            marker,
                            source,
                            obstacle_popup(obstacle),
                            PopupAnchor::Overlay(marker),
                        );
                        report.obstacle_markers += 1;
                    }
                    Err(err) => {
                        warn!("Obstacle {source:?} is not drawn: {err}");
                        report.skipped += 1;
                    }
                }
            }
        }

        for (id, crossing) in view.crossings() {
            match draw_crossing(&mut state, surface, *id, crossing) {
                Ok(()) => report.crossings += 1,
                Err(err) => {
                    warn!("Crossing {id:?} ({}) is not drawn: {err}", crossing.street_name);
                    report.skipped += 1;
                }
            }
        }

        debug!("Reconciliation finished: {report:?}");
        report
    }

    /// Draws institution markers. Institutions are drawn only once and are never removed by
    /// [`OverlayReconciler::reconcile`].
    pub fn draw_institutions(
        &mut self,
        surface: &mut dyn MapSurface,
        institutions: &[Institution],
    ) -> usize {
        if self.institutions_drawn {
            debug!("Institutions are already drawn");
            return 0;
        }

        let mut state = self.state.write();
        for (index, institution) in institutions.iter().enumerate() {
            let style = institution_marker_style(institution.icon.as_deref());
            match surface.draw_marker(institution.position, &style) {
                Ok(marker) => {
                    state.institutions.push(marker);
                    state.register(
                        marker,
                        OverlaySource::Institution(InstitutionId(index)),
                        institution_popup(institution),
                        PopupAnchor::Overlay(marker),
                    );
                }
                Err(err) => warn!("Institution {} is not drawn: {err}", institution.title),
            }
        }

        self.institutions_drawn = true;
        state.institutions.len()
    }

    /// Opens the popup of the overlay, closing the previously open one. Does nothing if the overlay was not drawn
    /// by this reconciler.
    pub fn select(&self, surface: &mut dyn MapSurface, overlay: OverlayId) {
        self.state.write().open_popup(surface, overlay);
    }

    /// Overlays drawn by the last reconciliation, in the order they were drawn.
    pub fn drawn_overlays(&self) -> Vec<OverlayId> {
        self.state.read().drawn.clone()
    }

    /// Obstacle markers drawn by the last reconciliation.
    pub fn obstacle_markers(&self) -> Vec<OverlayId> {
        self.state.read().obstacle_markers.clone()
    }

    /// Institution markers.
    pub fn institution_markers(&self) -> Vec<OverlayId> {
        self.state.read().institutions.clone()
    }

    /// Entity the overlay was drawn for.
    pub fn source_of(&self, overlay: OverlayId) -> Option<OverlaySource> {
        self.state.read().popups.get(&overlay).map(|p| p.source)
    }

    /// Currently open popup.
    pub fn open_popup(&self) -> Option<PopupId> {
        self.state.read().tracker.current()
    }
}

fn line_anchor(path: &Path) -> Result<GeoPoint2d, AccessMapError> {
    path.validate()?;
    path.midpoint_vertex()
        .ok_or(AccessMapError::InvalidGeometry(AccessMapTypesError::TooFewPoints(path.len())))
}

fn draw_street(
    state: &mut OverlayState,
    surface: &mut dyn MapSurface,
    id: StreetId,
    street: &StreetSegment,
) -> Result<(), AccessMapError> {
    let anchor = line_anchor(&street.path)?;
    let line = surface.draw_line(&street.path, &street_line_style(street.quality))?;
    state.drawn.push(line);
    state.register(
        line,
        OverlaySource::Street(id),
        street_popup(street),
        PopupAnchor::Point(anchor),
    );

    Ok(())
}

fn draw_crossing(
    state: &mut OverlayState,
    surface: &mut dyn MapSurface,
    id: CrossingId,
    crossing: &Crossing,
) -> Result<(), AccessMapError> {
    let anchor = line_anchor(&crossing.path)?;
    let line = surface.draw_line(&crossing.path, &crossing_line_style(crossing.zebra))?;
    state.drawn.push(line);
    state.register(
        line,
        OverlaySource::Crossing(id),
        crossing_popup(crossing),
        PopupAnchor::Point(anchor),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use accessmap_types::latlng;
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::filter::{filter, ControlId, FilterSet, Presence};
    use crate::model::{Obstacle, Quality};
    use crate::store::{DatasetStore, Datasets};
    use crate::surface::MemorySurface;
    use crate::Color;

    fn path(offset: f64) -> Path {
        Path::new(vec![
            latlng!(56.94 + offset, 24.17),
            latlng!(56.95 + offset, 24.18),
            latlng!(56.96 + offset, 24.19),
        ])
    }

    fn street(quality: Quality, obstacles: usize) -> StreetSegment {
        StreetSegment {
            path: path(0.0),
            street_name: format!("{quality} iela"),
            quality,
            sidewalk: true,
            paved: true,
            obstacles: (0..obstacles)
                .map(|i| Obstacle {
                    position: latlng!(56.945, 24.175 + i as f64 * 0.001),
                    description: format!("Šķērslis {i}"),
                    image: format!("img/{i}.jpg"),
                })
                .collect(),
        }
    }

    fn crossing(zebra: bool) -> Crossing {
        Crossing {
            path: path(0.01),
            street_name: "Pāreja".into(),
            zebra,
            ramp: true,
            traffic_light: false,
        }
    }

    fn surface() -> MemorySurface {
        MemorySurface::new(latlng!(56.94, 24.17), 14.0)
    }

    #[test]
    fn reconciles_store_view() {
        let store = DatasetStore::with_datasets(Datasets::new(
            vec![street(Quality::Good, 1), street(Quality::Poor, 2)],
            vec![crossing(true), crossing(false)],
            vec![],
        ));
        let filters = FilterSet::default()
            .with_control(ControlId::Zebra, "yes")
            .expect("valid value");
        let mut surface = surface();
        let reconciler = OverlayReconciler::new();

        let report = reconciler.reconcile(
            &mut surface,
            &store.filtered(&filters).expect("datasets are loaded"),
        );

        assert_eq!(report.streets, 2);
        assert_eq!(report.obstacle_markers, 3);
        assert_eq!(report.crossings, 1);
        assert_eq!(surface.overlay_count(), 6);
    }

    #[test]
    fn single_good_street_with_default_filters() {
        let streets = vec![street(Quality::Good, 0)];
        let mut surface = surface();
        let reconciler = OverlayReconciler::new();

        let report = reconciler.reconcile(
            &mut surface,
            &filter(&streets, &[], &FilterSet::default()),
        );

        assert_eq!(report.streets, 1);
        assert_eq!(report.obstacle_markers, 0);
        let lines: Vec<_> = surface.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].1.style.color, Color::GREEN);
        assert_eq!(surface.markers().count(), 0);
    }

    #[test]
    fn obstacle_filter_hides_street_without_obstacles() {
        let streets = vec![street(Quality::Good, 0)];
        let mut surface = surface();
        let reconciler = OverlayReconciler::new();
        let filters = FilterSet::default()
            .with_control(ControlId::Obstacles, "yes")
            .expect("valid value");

        let report = reconciler.reconcile(&mut surface, &filter(&streets, &[], &filters));
        assert_eq!(report.drawn(), 0);
        assert_eq!(surface.lines().count(), 0);
    }

    #[test]
    fn zebra_filter_hides_zebra_crossing() {
        let crossings = vec![crossing(true)];
        let mut surface = surface();
        let reconciler = OverlayReconciler::new();
        let filters = FilterSet::default()
            .with_control(ControlId::Zebra, "no")
            .expect("valid value");

        let report = reconciler.reconcile(&mut surface, &filter(&[], &crossings, &filters));
        assert_eq!(report.crossings, 0);
        assert_eq!(surface.lines().count(), 0);
    }

    #[test]
    fn zoom_rescales_obstacle_markers() {
        let streets = vec![street(Quality::Poor, 2), street(Quality::Good, 1)];
        let mut surface = surface();
        let mut reconciler = OverlayReconciler::new();
        reconciler.register_listeners(&mut surface);
        reconciler.reconcile(&mut surface, &filter(&streets, &[], &FilterSet::default()));

        let markers = reconciler.obstacle_markers();
        assert_eq!(markers.len(), 3);
        for marker in &markers {
            let style = &surface.marker(*marker).expect("marker").style;
            assert_abs_diff_eq!(style.scale, 6.5);
            assert_eq!(style.fill, Color::ORANGE);
            assert_eq!(style.outline, Color::BLACK);
        }

        surface.set_zoom(1.0);
        for marker in &markers {
            assert_abs_diff_eq!(surface.marker(*marker).expect("marker").style.scale, 4.0);
        }

        surface.set_zoom(10.0);
        for marker in &markers {
            assert_abs_diff_eq!(surface.marker(*marker).expect("marker").style.scale, 6.5);
        }
    }

    #[test]
    fn markers_drawn_after_zoom_use_current_scale() {
        let streets = vec![street(Quality::Poor, 1)];
        let mut surface = surface();
        let mut reconciler = OverlayReconciler::new();
        reconciler.register_listeners(&mut surface);

        surface.set_zoom(5.0);
        reconciler.reconcile(&mut surface, &filter(&streets, &[], &FilterSet::default()));
        let marker = reconciler.obstacle_markers()[0];
        assert_abs_diff_eq!(surface.marker(marker).expect("marker").style.scale, 5.0);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let streets = vec![street(Quality::Good, 2), street(Quality::Moderate, 0)];
        let crossings = vec![crossing(true), crossing(false)];
        let view = filter(&streets, &crossings, &FilterSet::default());
        let mut surface = surface();
        let reconciler = OverlayReconciler::new();

        let first = reconciler.reconcile(&mut surface, &view);
        let count = surface.overlay_count();
        let second = reconciler.reconcile(&mut surface, &view);

        assert_eq!(count, 6);
        assert_eq!(surface.overlay_count(), count);
        assert_eq!(first.drawn(), second.drawn());
        assert_eq!(second.removed, count);
        assert_eq!(reconciler.drawn_overlays().len(), count);
    }

    #[test]
    fn drawn_count_matches_filtered_entities() {
        let streets = vec![
            street(Quality::Good, 1),
            street(Quality::Poor, 0),
            street(Quality::Poor, 3),
        ];
        let crossings = vec![crossing(true), crossing(false), crossing(true)];
        let mut surface = surface();
        let reconciler = OverlayReconciler::new();

        let all_filters = [
            FilterSet::default(),
            FilterSet {
                obstacles: Presence::Yes,
                ..Default::default()
            },
            FilterSet {
                zebra: Presence::Yes,
                sidewalk: Presence::No,
                ..Default::default()
            },
            FilterSet::default()
                .with_control(ControlId::Quality, "poor")
                .expect("valid value"),
        ];

        for filters in all_filters {
            let view = filter(&streets, &crossings, &filters);
            let expected = view.streets().len() + view.crossings().len() + view.obstacle_count();
            reconciler.reconcile(&mut surface, &view);
            assert_eq!(surface.overlay_count(), expected, "{filters:?}");
            assert_eq!(surface.lines().count(), view.streets().len() + view.crossings().len());
        }
    }

    #[test]
    fn bad_entity_does_not_stop_the_pass() {
        let mut broken = street(Quality::Good, 1);
        broken.path = Path::new(vec![latlng!(56.94, 24.17)]);
        let streets = vec![broken, street(Quality::Poor, 0)];
        let mut broken_crossing = crossing(true);
        broken_crossing.path = Path::default();
        let crossings = vec![broken_crossing, crossing(false)];

        let mut surface = surface();
        let reconciler = OverlayReconciler::new();
        let report = reconciler.reconcile(
            &mut surface,
            &filter(&streets, &crossings, &FilterSet::default()),
        );

        assert_eq!(report.streets, 1);
        assert_eq!(report.crossings, 1);
        assert_eq!(report.obstacle_markers, 0);
        assert_eq!(report.skipped, 2);
        assert_eq!(surface.lines().count(), 2);
    }

    #[test]
    fn listeners_are_registered_once() {
        let streets = vec![street(Quality::Good, 1)];
        let mut surface = surface();
        let mut reconciler = OverlayReconciler::new();

        reconciler.register_listeners(&mut surface);
        reconciler.register_listeners(&mut surface);
        for _ in 0..3 {
            reconciler.reconcile(&mut surface, &filter(&streets, &[], &FilterSet::default()));
        }

        assert_eq!(surface.zoom_handler_count(), 1);
        assert_eq!(surface.select_handler_count(), 1);
    }

    #[test]
    fn selecting_overlays_keeps_one_popup_open() {
        let streets = vec![street(Quality::Good, 2)];
        let crossings = vec![crossing(true)];
        let mut surface = surface();
        let mut reconciler = OverlayReconciler::new();
        reconciler.register_listeners(&mut surface);
        reconciler.reconcile(
            &mut surface,
            &filter(&streets, &crossings, &FilterSet::default()),
        );

        let overlays = reconciler.drawn_overlays();
        for overlay in &overlays {
            surface.select(*overlay);
        }

        let open: Vec<_> = surface.open_popups().collect();
        assert_eq!(open.len(), 1);
        assert_eq!(reconciler.open_popup(), Some(open[0].0));

        let last = *overlays.last().expect("overlays drawn");
        assert_eq!(reconciler.source_of(last), Some(OverlaySource::Crossing(CrossingId(0))));
        assert_eq!(open[0].1.content.title(), "Pāreja");
    }

    #[test]
    fn street_popup_is_anchored_at_middle_vertex() {
        let streets = vec![street(Quality::Moderate, 0)];
        let mut surface = surface();
        let reconciler = OverlayReconciler::new();
        reconciler.reconcile(&mut surface, &filter(&streets, &[], &FilterSet::default()));

        let line = reconciler.drawn_overlays()[0];
        reconciler.select(&mut surface, line);

        let (_, popup) = surface.open_popups().next().expect("popup is open");
        assert_eq!(popup.anchor, PopupAnchor::Point(latlng!(56.95, 24.18)));
        assert_eq!(popup.content.lines()[0], "Ceļa kvalitāte: Vidēja");
    }

    #[test]
    fn obstacle_popup_is_anchored_at_marker() {
        let streets = vec![street(Quality::Poor, 1)];
        let mut surface = surface();
        let reconciler = OverlayReconciler::new();
        reconciler.reconcile(&mut surface, &filter(&streets, &[], &FilterSet::default()));

        let marker = reconciler.obstacle_markers()[0];
        assert_eq!(
            reconciler.source_of(marker),
            Some(OverlaySource::Obstacle(StreetId(0), 0))
        );
        reconciler.select(&mut surface, marker);

        let (_, popup) = surface.open_popups().next().expect("popup is open");
        assert_eq!(popup.anchor, PopupAnchor::Overlay(marker));
        assert_eq!(popup.content.image(), Some("img/0.jpg"));
    }

    #[test]
    fn popup_of_removed_overlay_is_closed() {
        let streets = vec![street(Quality::Good, 0), street(Quality::Poor, 0)];
        let mut surface = surface();
        let reconciler = OverlayReconciler::new();
        reconciler.reconcile(&mut surface, &filter(&streets, &[], &FilterSet::default()));
        reconciler.select(&mut surface, reconciler.drawn_overlays()[0]);
        assert_eq!(surface.open_popups().count(), 1);

        let only_poor = FilterSet::default()
            .with_control(ControlId::Quality, "poor")
            .expect("valid value");
        reconciler.reconcile(&mut surface, &filter(&streets, &[], &only_poor));
        assert_eq!(surface.open_popups().count(), 0);
        assert_eq!(reconciler.open_popup(), None);
    }

    #[test]
    fn unknown_overlay_selection_is_ignored() {
        let mut surface = surface();
        let reconciler = OverlayReconciler::new();
        reconciler.select(&mut surface, OverlayId(999));
        assert_eq!(surface.open_popups().count(), 0);
    }

    #[test]
    fn institutions_survive_reconciliation() {
        let institutions = vec![
            Institution {
                position: latlng!(56.943, 24.179),
                title: "Skola".into(),
                icon: Some("icons/school.png".into()),
                info_content: "<p>Skola</p>".into(),
            },
            Institution {
                position: latlng!(56.944, 24.18),
                title: "Bibliotēka".into(),
                icon: None,
                info_content: String::new(),
            },
        ];
        let streets = vec![street(Quality::Good, 1)];
        let mut surface = surface();
        let mut reconciler = OverlayReconciler::new();

        assert_eq!(reconciler.draw_institutions(&mut surface, &institutions), 2);
        assert_eq!(reconciler.draw_institutions(&mut surface, &institutions), 0);

        reconciler.reconcile(&mut surface, &filter(&streets, &[], &FilterSet::default()));
        reconciler.reconcile(&mut surface, &filter(&[], &[], &FilterSet::default()));

        let markers = reconciler.institution_markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(surface.overlay_count(), 2);
        for marker in &markers {
            assert!(surface.marker(*marker).is_some());
        }

        reconciler.select(&mut surface, markers[1]);
        let (_, popup) = surface.open_popups().next().expect("popup is open");
        assert_eq!(popup.content.title(), "Bibliotēka");
    }

    #[test]
    fn institution_popup_stays_open_across_reconciliation() {
        let institutions = vec![Institution {
            position: latlng!(56.943, 24.179),
            title: "Skola".into(),
            icon: None,
            info_content: String::new(),
        }];
        let mut surface = surface();
        let mut reconciler = OverlayReconciler::new();
        reconciler.draw_institutions(&mut surface, &institutions);
        reconciler.select(&mut surface, reconciler.institution_markers()[0]);

        reconciler.reconcile(&mut surface, &filter(&[], &[], &FilterSet::default()));
        assert_eq!(surface.open_popups().count(), 1);
    }
}
