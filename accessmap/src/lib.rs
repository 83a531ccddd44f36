//! Accessmap draws a city accessibility map: street segments colored by surface quality, pedestrian crossings,
//! obstacles found on the streets and public institutions, on top of an interactive map widget. The user can
//! narrow down what is shown with a few filter controls.
//!
//! # Main components
//!
//! * [`DatasetStore`](store::DatasetStore) loads the JSON fixtures once per session. Loading is all-or-nothing.
//! * [`filter`](filter::filter) selects the streets and crossings matching the current [`FilterSet`].
//! * [`OverlayReconciler`] removes the previously drawn overlays and draws the filtered view on a
//!   [`MapSurface`], attaching info popups and scaling obstacle markers with the zoom level.
//! * [`MapSession`] owns all of the above for one map page and redraws the map on every filter change.
//!
//! The map widget is abstracted by the [`MapSurface`] trait. [`MemorySurface`] implements it without any
//! rendering, which is enough to run the pipeline headless:
//!
//! ```no_run
//! use accessmap::store::FileDataProvider;
//! use accessmap::{ControlId, MapSession, MemorySurface, SessionConfig};
//!
//! # tokio_test::block_on(async {
//! let config = SessionConfig::default();
//! let mut session = MapSession::new(MemorySurface::new(config.center(), config.zoom()));
//! session
//!     .init(&FileDataProvider::new("data"), config.fixtures())
//!     .await
//!     .expect("fixtures are valid");
//! session.set_control(ControlId::Quality, "good").expect("data is loaded");
//! # });
//! ```
//!
//! Route computation and geolocation are not provided.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod popup;
pub mod reconciler;
mod session;
pub mod store;
pub mod surface;
pub mod symbol;

pub use color::Color;
pub use config::SessionConfig;
pub use error::AccessMapError;
pub use filter::{ControlId, FilterSet};
pub use reconciler::{OverlayReconciler, ReconcileReport};
pub use session::MapSession;
pub use surface::{MapSurface, MemorySurface};

// Reexport accessmap_types
pub use accessmap_types;
