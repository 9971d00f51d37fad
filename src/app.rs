//! Application wiring.
//!
//! Builds every component from a [`Config`] and shares them the way the
//! screens do: one storage, one cache, one store client.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::downloads::PackDownloader;
use crate::error::Result;
use crate::local_cache::LocalCache;
use crate::preferences::Preferences;
use crate::registry::PackageRegistry;
use crate::storage::{FileStorage, Storage};
use crate::store::{HttpStore, TranslationStore};
use crate::translator::Translator;

/// Shared application state.
#[derive(Clone)]
pub struct App {
    /// Remote translation store.
    pub store: Arc<dyn TranslationStore>,

    /// Offline pack cache.
    pub cache: LocalCache,

    /// Packages the translator consults.
    pub registry: PackageRegistry,

    pub translator: Translator,

    pub downloads: PackDownloader,

    pub preferences: Preferences,
}

impl App {
    /// Wire the app against the HTTP store and the file storage from `config`.
    ///
    /// # Errors
    /// Returns error if the store URL is invalid or the storage file is unreadable.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = HttpStore::new(&config.api_url, config.http_timeout)?;
        info!("Translation store: {}", store.base_url());

        let storage = FileStorage::open(&config.cache_path)?;
        info!("Local storage: {}", storage.path().display());

        Ok(Self::new(Arc::new(store), Arc::new(storage), config.registry()))
    }

    /// Wire the app from explicit parts.
    pub fn new(
        store: Arc<dyn TranslationStore>,
        storage: Arc<dyn Storage>,
        registry: PackageRegistry,
    ) -> Self {
        let cache = LocalCache::new(storage.clone());
        let translator = Translator::new(store.clone(), cache.clone(), registry.clone());
        let downloads = PackDownloader::new(store.clone(), cache.clone(), registry.clone());
        let preferences = Preferences::new(storage);

        Self {
            store,
            cache,
            registry,
            translator,
            downloads,
            preferences,
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("registry", &self.registry)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
