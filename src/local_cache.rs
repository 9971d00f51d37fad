//! Local cache of downloaded language packs.
//!
//! Records are addressed by `(package, language)` and persisted in the shared
//! [`Storage`] as JSON arrays of `{key, text}`. Storage keys live under a
//! reserved `pack:` namespace, so clearing the cache never touches other
//! application keys (preferences and such), even when package names contain
//! underscores.
//!
//! A Moka memo sits in front of the persisted store for repeated reads.
//! Persistence failures on write are logged and swallowed: the cache is
//! best-effort and must never break the caller's flow.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::{CacheConfig, TypedCache};
use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::store::TranslationEntry;

/// Namespace prefix reserved for cache records.
pub const KEY_PREFIX: &str = "pack:";

/// Address of one cached record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    package: String,
    language: String,
}

impl CacheKey {
    /// Language codes are case-folded: `FR` and `fr` address the same record.
    pub fn new(package: &str, language: &str) -> Self {
        Self {
            package: package.to_string(),
            language: language.to_lowercase(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Key used in the persisted store: `pack:{package}_{language}`.
    pub fn storage_key(&self) -> String {
        format!("{KEY_PREFIX}{}_{}", self.package, self.language)
    }

    /// Inverse of [`storage_key`](Self::storage_key). Language codes never
    /// contain `_`, so the last one separates package from language.
    pub fn from_storage_key(key: &str) -> Option<Self> {
        let (package, language) = key.strip_prefix(KEY_PREFIX)?.rsplit_once('_')?;
        if package.is_empty() || language.is_empty() {
            return None;
        }
        Some(Self::new(package, language))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.language)
    }
}

/// Persisted cache of translation lists, keyed by package and language.
#[derive(Clone)]
pub struct LocalCache {
    storage: Arc<dyn Storage>,
    memo: TypedCache<CacheKey, Arc<Vec<TranslationEntry>>>,
}

impl LocalCache {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_config(storage, CacheConfig::language_packs())
    }

    pub fn with_config(storage: Arc<dyn Storage>, config: CacheConfig) -> Self {
        Self {
            storage,
            memo: TypedCache::new("language_packs", config),
        }
    }

    /// Save `entries`, replacing any existing record.
    ///
    /// Never fails: a persistence error is logged and the record is simply not cached.
    pub fn save(&self, package: &str, language: &str, entries: &[TranslationEntry]) {
        let key = CacheKey::new(package, language);
        match self.try_save(&key, entries) {
            Ok(()) => debug!("Cached {} entries for {}", entries.len(), key),
            Err(e) => warn!("Failed to cache {}: {}", key, e),
        }
    }

    fn try_save(&self, key: &CacheKey, entries: &[TranslationEntry]) -> Result<()> {
        let encoded =
            serde_json::to_string(entries).map_err(|e| Error::CacheWrite(e.to_string()))?;

        self.storage
            .set_item(&key.storage_key(), &encoded)
            .map_err(|e| Error::CacheWrite(e.to_string()))?;

        self.memo.insert(key.clone(), Arc::new(entries.to_vec()));
        Ok(())
    }

    /// Load a record, or `None` if it was never saved.
    ///
    /// A record that cannot be read or decoded is reported as absent.
    pub fn load(&self, package: &str, language: &str) -> Option<Arc<Vec<TranslationEntry>>> {
        let key = CacheKey::new(package, language);

        if let Some(entries) = self.memo.get(&key) {
            return Some(entries);
        }

        let raw = match self.storage.get_item(&key.storage_key()) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read cached {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<TranslationEntry>>(&raw) {
            Ok(entries) => {
                let entries = Arc::new(entries);
                self.memo.insert(key, Arc::clone(&entries));
                Some(entries)
            }
            Err(e) => {
                warn!("Discarding undecodable cache record {}: {}", key, e);
                None
            }
        }
    }

    /// Whether a record is present, regardless of its content.
    pub fn exists(&self, package: &str, language: &str) -> bool {
        let key = CacheKey::new(package, language);
        self.storage
            .contains_key(&key.storage_key())
            .unwrap_or_else(|e| {
                warn!("Failed to check cached {}: {}", key, e);
                false
            })
    }

    /// Delete one record. No-op if absent.
    pub fn remove(&self, package: &str, language: &str) {
        let key = CacheKey::new(package, language);
        self.memo.invalidate(&key);

        if let Err(e) = self.storage.remove_item(&key.storage_key()) {
            warn!("Failed to remove cached {}: {}", key, e);
        } else {
            debug!("Removed cached {}", key);
        }
    }

    /// Delete every record this cache created. Other keys are left alone.
    pub fn clear_all(&self) {
        self.memo.invalidate_all();

        let keys = match self.storage.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Failed to list cached packs: {}", e);
                return;
            }
        };

        let ours: Vec<String> = keys
            .into_iter()
            .filter(|k| k.starts_with(KEY_PREFIX))
            .collect();

        for key in ours.iter().filter_map(|k| CacheKey::from_storage_key(k)) {
            self.memo.invalidate(&key);
        }

        match self.storage.multi_remove(&ours) {
            Ok(()) => info!("Cleared {} cached packs", ours.len()),
            Err(e) => warn!("Failed to clear cached packs: {}", e),
        }
    }
}

impl fmt::Debug for LocalCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalCache").field("memo", &self.memo).finish()
    }
}
