//! Shared test fixtures.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::store::{LanguageTranslations, TranslationEntry, TranslationStore, UpsertRequest};

/// In-memory translation store with call counting and failure injection.
#[derive(Debug, Default)]
pub struct FakeStore {
    data: DashMap<(String, String), Vec<TranslationEntry>>,
    packages: Mutex<Vec<String>>,
    failing: Mutex<HashSet<(String, String)>>,
    fetches: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `(key, text)` pairs for a package/language.
    pub fn with(self, package: &str, language: &str, pairs: &[(&str, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(k, t)| TranslationEntry::new(*k, *t))
            .collect();
        self.data
            .insert((package.to_string(), language.to_string()), entries);
        {
            let mut packages = self.packages.lock();
            if !packages.iter().any(|p| p == package) {
                packages.push(package.to_string());
            }
        }
        self
    }

    /// Make fetches of a package/language fail with a network error.
    pub fn failing(self, package: &str, language: &str) -> Self {
        self.failing
            .lock()
            .insert((package.to_string(), language.to_string()));
        self
    }

    /// Number of `fetch_language_translations` calls so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationStore for FakeStore {
    async fn list_packages(&self) -> Result<Vec<String>> {
        Ok(self.packages.lock().clone())
    }

    async fn package_translations(&self, package: &str) -> Result<Vec<LanguageTranslations>> {
        let languages: Vec<LanguageTranslations> = self
            .data
            .iter()
            .filter(|e| e.key().0 == package)
            .map(|e| LanguageTranslations {
                language: e.key().1.clone(),
                translations: e.value().clone(),
            })
            .collect();

        if languages.is_empty() {
            return Err(Error::NotFound(format!("{package}: Package not found")));
        }
        Ok(languages)
    }

    async fn fetch_language_translations(
        &self,
        package: &str,
        language: &str,
    ) -> Result<Vec<TranslationEntry>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let key = (package.to_string(), language.to_string());

        if self.failing.lock().contains(&key) {
            return Err(Error::Network(format!("{package}/{language}: connection reset")));
        }

        self.data
            .get(&key)
            .map(|e| e.value().clone())
            .ok_or_else(|| Error::NotFound(format!("{package}/{language}")))
    }

    async fn upsert_translations(&self, package: &str, request: &UpsertRequest) -> Result<String> {
        self.data.insert(
            (package.to_string(), request.language.clone()),
            request.translations.clone(),
        );
        Ok("Translations updated successfully".to_string())
    }
}
