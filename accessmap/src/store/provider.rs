use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use maybe_sync::{MaybeSend, MaybeSync};

use crate::error::AccessMapError;

/// Source of raw fixture data.
///
/// A source is identified by a string: a file name, a URL or a key, depending on the provider.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DataProvider: MaybeSend + MaybeSync {
    /// Loads raw bytes of the source.
    async fn load(&self, source: &str) -> Result<Bytes, AccessMapError>;
}

/// Provider serving fixtures kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataProvider {
    sources: HashMap<String, Bytes>,
}

impl MemoryDataProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a source.
    pub fn insert(&mut self, source: impl Into<String>, data: impl Into<Bytes>) {
        self.sources.insert(source.into(), data.into());
    }

    /// Builder-style version of [`MemoryDataProvider::insert`].
    pub fn with_source(mut self, source: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.insert(source, data);
        self
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DataProvider for MemoryDataProvider {
    async fn load(&self, source: &str) -> Result<Bytes, AccessMapError> {
        self.sources
            .get(source)
            .cloned()
            .ok_or(AccessMapError::NotFound)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{FileDataProvider, UrlDataProvider};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use async_trait::async_trait;
    use bytes::Bytes;
    use log::{debug, info};

    use super::DataProvider;
    use crate::error::AccessMapError;

    /// Loads fixtures from files in a directory.
    #[derive(Debug, Clone)]
    pub struct FileDataProvider {
        base_dir: PathBuf,
    }

    impl FileDataProvider {
        /// Creates a provider reading source names relative to `base_dir`.
        pub fn new(base_dir: impl AsRef<Path>) -> Self {
            Self {
                base_dir: base_dir.as_ref().into(),
            }
        }
    }

    #[async_trait]
    impl DataProvider for FileDataProvider {
        async fn load(&self, source: &str) -> Result<Bytes, AccessMapError> {
            let file_path = self.base_dir.join(source);
            debug!("Reading fixture {file_path:?}");
            match tokio::fs::read(&file_path).await {
                Ok(data) => Ok(data.into()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    Err(AccessMapError::NotFound)
                }
                Err(err) => Err(err.into()),
            }
        }
    }

    /// Loads fixtures over HTTP.
    ///
    /// Source names that are not absolute URLs are resolved against the base URL.
    #[derive(Debug, Clone)]
    pub struct UrlDataProvider {
        http_client: reqwest::Client,
        base_url: String,
    }

    impl UrlDataProvider {
        /// Creates a provider resolving relative sources against `base_url`.
        pub fn new(base_url: impl Into<String>) -> Result<Self, AccessMapError> {
            let http_client = reqwest::Client::builder()
                .user_agent("accessmap/0.1")
                .build()?;

            Ok(Self {
                http_client,
                base_url: base_url.into(),
            })
        }

        fn resolve(&self, source: &str) -> String {
            if source.starts_with("http://") || source.starts_with("https://") {
                source.to_string()
            } else {
                format!(
                    "{}/{}",
                    self.base_url.trim_end_matches('/'),
                    source.trim_start_matches('/')
                )
            }
        }
    }

    #[async_trait]
    impl DataProvider for UrlDataProvider {
        async fn load(&self, source: &str) -> Result<Bytes, AccessMapError> {
            let url = self.resolve(source);
            let response = self.http_client.get(&url).send().await?;
            if !response.status().is_success() {
                let status = response.status();
                info!("Failed to load {url}: {status}");
                return Err(AccessMapError::Io(format!("{url} responded with {status}")));
            }

            Ok(response.bytes().await?)
        }
    }

}
