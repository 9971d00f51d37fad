//! Language pack downloads.
//!
//! Primes the local cache from the translation store so translation works
//! offline, and reports which packs are saved for a language.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::local_cache::LocalCache;
use crate::registry::PackageRegistry;
use crate::store::TranslationStore;

/// Result of a successful download request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A record was already cached; nothing was fetched.
    AlreadySaved,
    /// Fetched and cached this many entries.
    Downloaded(usize),
}

/// Saved state of one registry package for a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackStatus {
    pub package: String,
    pub language: String,
    pub saved: bool,
}

/// Downloads packs into the local cache and removes them again.
#[derive(Clone)]
pub struct PackDownloader {
    store: Arc<dyn TranslationStore>,
    cache: LocalCache,
    registry: PackageRegistry,
}

impl PackDownloader {
    pub fn new(store: Arc<dyn TranslationStore>, cache: LocalCache, registry: PackageRegistry) -> Self {
        Self {
            store,
            cache,
            registry,
        }
    }

    /// Download one pack unless it is already cached.
    ///
    /// # Errors
    /// Returns the store error when the fetch fails. The cache is left exactly
    /// as it was, so the download can simply be retried.
    pub async fn download(&self, package: &str, language: &str) -> Result<DownloadOutcome> {
        if self.cache.exists(package, language) {
            info!("{}/{} already saved locally", package, language);
            return Ok(DownloadOutcome::AlreadySaved);
        }

        let entries = self
            .store
            .fetch_language_translations(package, &language.to_lowercase())
            .await
            .inspect_err(|e| warn!("Download of {}/{} failed: {}", package, language, e))?;

        self.cache.save(package, language, &entries);
        info!("Downloaded {} entries for {}/{}", entries.len(), package, language);

        Ok(DownloadOutcome::Downloaded(entries.len()))
    }

    /// Download every registry package for `language`, stopping at the first failure.
    pub async fn download_all(&self, language: &str) -> Result<Vec<(String, DownloadOutcome)>> {
        let mut outcomes = Vec::with_capacity(self.registry.len());
        for package in self.registry.list_packages() {
            let outcome = self.download(package, language).await?;
            outcomes.push((package.clone(), outcome));
        }
        Ok(outcomes)
    }

    pub fn remove(&self, package: &str, language: &str) {
        self.cache.remove(package, language);
    }

    pub fn clear_all(&self) {
        self.cache.clear_all();
    }

    /// Saved state of every registry package for `language`, in registry order.
    pub fn statuses(&self, language: &str) -> Vec<PackStatus> {
        self.registry
            .list_packages()
            .iter()
            .map(|package| PackStatus {
                package: package.clone(),
                language: language.to_uppercase(),
                saved: self.cache.exists(package, language),
            })
            .collect()
    }
}

impl std::fmt::Debug for PackDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackDownloader")
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::MemoryStorage;
    use crate::test_utils::FakeStore;

    fn downloader(store: FakeStore) -> (PackDownloader, Arc<FakeStore>, LocalCache) {
        let store = Arc::new(store);
        let cache = LocalCache::new(Arc::new(MemoryStorage::new()));
        let downloader = PackDownloader::new(store.clone(), cache.clone(), PackageRegistry::default());
        (downloader, store, cache)
    }

    fn store() -> FakeStore {
        FakeStore::new()
            .with("travel_essentials", "fr", &[("greet", "bonjour"), ("thanks", "merci")])
            .with("business_essentials", "fr", &[("meeting", "réunion")])
            .with("medical_care_essentials", "fr", &[("doctor", "médecin")])
    }

    #[tokio::test]
    async fn test_download_saves_pack() {
        let (downloader, _, cache) = downloader(store());

        let outcome = downloader.download("travel_essentials", "FR").await.unwrap();

        assert_eq!(outcome, DownloadOutcome::Downloaded(2));
        assert!(cache.exists("travel_essentials", "fr"));
        assert_eq!(cache.load("travel_essentials", "FR").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_second_download_skips_fetch() {
        let (downloader, store, _) = downloader(store());

        downloader.download("travel_essentials", "fr").await.unwrap();
        let outcome = downloader.download("travel_essentials", "FR").await.unwrap();

        assert_eq!(outcome, DownloadOutcome::AlreadySaved);
        assert_eq!(store.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_download_leaves_cache_unchanged() {
        let (downloader, _, cache) = downloader(store().failing("travel_essentials", "fr"));

        let err = downloader.download("travel_essentials", "fr").await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
        assert!(!cache.exists("travel_essentials", "fr"));

        let err = downloader.download("travel_essentials", "de").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!cache.exists("travel_essentials", "de"));
    }

    #[tokio::test]
    async fn test_statuses_follow_registry_order() {
        let (downloader, _, _) = downloader(store());
        downloader.download("business_essentials", "fr").await.unwrap();

        let statuses = downloader.statuses("fr");
        let saved: Vec<(&str, bool)> = statuses
            .iter()
            .map(|s| (s.package.as_str(), s.saved))
            .collect();

        assert_eq!(
            saved,
            vec![
                ("travel_essentials", false),
                ("business_essentials", true),
                ("medical_care_essentials", false),
            ]
        );
        assert!(statuses.iter().all(|s| s.language == "FR"));
    }

    #[tokio::test]
    async fn test_download_all_remove_and_clear() {
        let (downloader, _, cache) = downloader(store());

        let outcomes = downloader.download_all("fr").await.unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(downloader.statuses("fr").iter().all(|s| s.saved));

        downloader.remove("travel_essentials", "fr");
        assert!(!cache.exists("travel_essentials", "fr"));
        assert!(cache.exists("business_essentials", "fr"));

        downloader.clear_all();
        assert!(downloader.statuses("fr").iter().all(|s| !s.saved));
    }
}
