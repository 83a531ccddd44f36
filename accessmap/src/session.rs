//! Map session: the context object tying the pipeline together.

use log::{error, warn};

use crate::error::AccessMapError;
use crate::filter::{filter, ControlId, FilterSet};
use crate::reconciler::{OverlayReconciler, ReconcileReport};
use crate::store::{DataProvider, DatasetStore, FixtureSources};
use crate::surface::MapSurface;

/// State of one map page: the surface, the loaded datasets, current filter values and the drawn overlays.
///
/// A session is created for a surface, loaded once with [`MapSession::init`], and then redrawn every time a filter
/// control changes.
pub struct MapSession<S: MapSurface> {
    surface: S,
    store: DatasetStore,
    filters: FilterSet,
    reconciler: OverlayReconciler,
}

impl<S: MapSurface> MapSession<S> {
    /// Creates a new session and registers overlay handlers on the surface.
    pub fn new(mut surface: S) -> Self {
        let mut reconciler = OverlayReconciler::new();
        reconciler.register_listeners(&mut surface);

        Self {
            surface,
            store: DatasetStore::new(),
            filters: FilterSet::default(),
            reconciler,
        }
    }

    /// Loads the datasets, draws institutions and the first filtered view.
    ///
    /// If loading fails, nothing is drawn and the error is returned.
    pub async fn init(
        &mut self,
        provider: &dyn DataProvider,
        sources: &FixtureSources,
    ) -> Result<ReconcileReport, AccessMapError> {
        if let Err(err) = self.store.load(provider, sources).await {
            error!("Error loading map data: {err}");
            return Err(err);
        }

        let datasets = self.store.datasets()?;
        self.reconciler
            .draw_institutions(&mut self.surface, datasets.institutions());

        let view = filter(datasets.streets(), datasets.crossings(), &self.filters);
        Ok(self.reconciler.reconcile(&mut self.surface, &view))
    }

    /// Applies a new value of a filter control and redraws the map.
    ///
    /// An invalid value is rejected without changing the filters. If the datasets are not loaded yet, the value is
    /// kept for the first redraw and [`AccessMapError::NotReady`] is returned.
    pub fn set_control(
        &mut self,
        control: ControlId,
        value: &str,
    ) -> Result<ReconcileReport, AccessMapError> {
        let filters = self.filters.with_control(control, value)?;
        self.set_filters(filters)
    }

    /// Replaces all filter values and redraws the map.
    pub fn set_filters(&mut self, filters: FilterSet) -> Result<ReconcileReport, AccessMapError> {
        self.filters = filters;
        self.refresh()
    }

    /// Redraws the map with the current filters.
    pub fn refresh(&mut self) -> Result<ReconcileReport, AccessMapError> {
        let view = match self.store.filtered(&self.filters) {
            Ok(view) => view,
            Err(err) => {
                warn!("Filter change ignored: {err}");
                return Err(err);
            }
        };

        Ok(self.reconciler.reconcile(&mut self.surface, &view))
    }

    /// Current filter values.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Dataset store of the session.
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Overlay reconciler of the session.
    pub fn reconciler(&self) -> &OverlayReconciler {
        &self.reconciler
    }

    /// Map surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the map surface, e.g. to deliver user events to it.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
