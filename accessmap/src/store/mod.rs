//! Dataset store: loads the overlay fixtures once and keeps them for the whole session.
//!
//! Loading is all-or-nothing. The fixtures are fetched concurrently, and the store is populated only if every one
//! of them was fetched and decoded. After that the datasets are never modified: the store only hands out shared
//! references to them.

use bytes::Bytes;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::AccessMapError;
use crate::filter::{filter, FilterSet, FilteredView};
use crate::model::{Crossing, Institution, StreetSegment};

mod provider;

pub use provider::{DataProvider, MemoryDataProvider};
#[cfg(not(target_arch = "wasm32"))]
pub use provider::{FileDataProvider, UrlDataProvider};

/// Names of the fixture sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSources {
    /// Street segments.
    pub streets: String,
    /// Pedestrian crossings.
    pub crossings: String,
    /// Institutions. If not set, the map shows no institutions.
    #[serde(default)]
    pub institutions: Option<String>,
}

impl Default for FixtureSources {
    fn default() -> Self {
        Self {
            streets: "streets.json".into(),
            crossings: "crossings.json".into(),
            institutions: Some("institutions.json".into()),
        }
    }
}

/// Loaded overlay datasets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    streets: Vec<StreetSegment>,
    crossings: Vec<Crossing>,
    institutions: Vec<Institution>,
}

impl Datasets {
    /// Creates a new set of datasets.
    pub fn new(
        streets: Vec<StreetSegment>,
        crossings: Vec<Crossing>,
        institutions: Vec<Institution>,
    ) -> Self {
        Self {
            streets,
            crossings,
            institutions,
        }
    }

    /// Street segments.
    pub fn streets(&self) -> &[StreetSegment] {
        &self.streets
    }

    /// Pedestrian crossings.
    pub fn crossings(&self) -> &[Crossing] {
        &self.crossings
    }

    /// Institutions.
    pub fn institutions(&self) -> &[Institution] {
        &self.institutions
    }
}

/// Holds the datasets of the session.
#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: Option<Datasets>,
}

impl DatasetStore {
    /// Creates an empty store. Any read access fails with [`AccessMapError::NotReady`] until
    /// [`DatasetStore::load`] succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with already loaded datasets.
    pub fn with_datasets(datasets: Datasets) -> Self {
        Self {
            datasets: Some(datasets),
        }
    }

    /// Loads all fixtures from the provider.
    ///
    /// If any fixture fails to load or decode, the error is returned and the store stays unchanged. A store can be
    /// loaded only once.
    pub async fn load(
        &mut self,
        provider: &dyn DataProvider,
        sources: &FixtureSources,
    ) -> Result<(), AccessMapError> {
        if self.datasets.is_some() {
            return Err(AccessMapError::AlreadyLoaded);
        }

        let institutions = async {
            match &sources.institutions {
                Some(source) => provider.load(source).await.map(Some),
                None => Ok(None),
            }
        };

        let (streets, crossings, institutions) = futures::try_join!(
            provider.load(&sources.streets),
            provider.load(&sources.crossings),
            institutions,
        )?;

        let streets: Vec<StreetSegment> = decode(&sources.streets, &streets)?;
        let crossings: Vec<Crossing> = decode(&sources.crossings, &crossings)?;
        let institutions: Vec<Institution> = match (&sources.institutions, institutions) {
            (Some(source), Some(data)) => decode(source, &data)?,
            _ => Vec::new(),
        };

        info!(
            "Loaded {} streets, {} crossings, {} institutions",
            streets.len(),
            crossings.len(),
            institutions.len()
        );

        self.datasets = Some(Datasets {
            streets,
            crossings,
            institutions,
        });

        Ok(())
    }

    /// Returns true if the datasets are loaded.
    pub fn is_ready(&self) -> bool {
        self.datasets.is_some()
    }

    /// Loaded datasets.
    pub fn datasets(&self) -> Result<&Datasets, AccessMapError> {
        self.datasets.as_ref().ok_or(AccessMapError::NotReady)
    }

    /// Streets and crossings passing the given filters.
    pub fn filtered(&self, filters: &FilterSet) -> Result<FilteredView<'_>, AccessMapError> {
        let datasets = self.datasets()?;
        Ok(filter(&datasets.streets, &datasets.crossings, filters))
    }
}

fn decode<T: DeserializeOwned>(source: &str, data: &Bytes) -> Result<T, AccessMapError> {
    debug!("Decoding {source} ({} bytes)", data.len());
    serde_json::from_slice(data).map_err(|err| AccessMapError::Decoding {
        source_name: source.to_string(),
        reason: err.to_string(),
    })
}
