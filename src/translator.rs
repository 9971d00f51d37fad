//! Word-substitution translator.
//!
//! Translation is literal: every space-separated token of the input is looked
//! up by its text in the source language, mapped to the shared key, and
//! replaced by that key's text in the target language. Unknown tokens become
//! `?`. This is a phrasebook, not machine translation.
//!
//! ## Lookup tables
//!
//! For every package in the registry, in order:
//! - source entries fill `text (lower-cased) -> key`
//! - target entries fill `key -> text`
//!
//! Both tables are shared across packages and later packages overwrite earlier
//! ones on collision.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::local_cache::LocalCache;
use crate::registry::PackageRegistry;
use crate::store::{TranslationEntry, TranslationStore};

/// Emitted for tokens with no known translation.
pub const UNKNOWN_WORD: &str = "?";

/// Text shown to the user when a translation cannot be produced.
pub const TRANSLATION_FAILED: &str = "Translation failed.";

/// Lookup tables for one source/target language pair.
#[derive(Debug, Clone, Default)]
pub struct WordLookup {
    source_text_to_key: HashMap<String, String>,
    key_to_target_text: HashMap<String, String>,
}

impl WordLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one package's entries. Later calls overwrite earlier ones.
    pub fn add_package(&mut self, source: &[TranslationEntry], target: &[TranslationEntry]) {
        for entry in source {
            self.source_text_to_key
                .insert(entry.text.to_lowercase(), entry.key.clone());
        }
        for entry in target {
            self.key_to_target_text
                .insert(entry.key.clone(), entry.text.clone());
        }
    }

    /// Translate a single token, case-insensitively.
    pub fn translate_word(&self, token: &str) -> &str {
        self.source_text_to_key
            .get(&token.to_lowercase())
            .and_then(|key| self.key_to_target_text.get(key))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_WORD)
    }

    /// Translate `text` token by token. Output has exactly as many tokens as input.
    pub fn translate(&self, text: &str) -> String {
        text.split(' ')
            .map(|token| self.translate_word(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Translator over the registry packages, reading the local cache first and
/// the translation store otherwise.
///
/// Holds no mutable state; calls are independent and may run concurrently.
#[derive(Clone)]
pub struct Translator {
    store: Arc<dyn TranslationStore>,
    cache: LocalCache,
    registry: PackageRegistry,
}

impl Translator {
    pub fn new(store: Arc<dyn TranslationStore>, cache: LocalCache, registry: PackageRegistry) -> Self {
        Self {
            store,
            cache,
            registry,
        }
    }

    pub fn registry(&self) -> &PackageRegistry {
        &self.registry
    }

    /// Translate `text` from `source_language` into `target_language`.
    ///
    /// Empty text returns an empty string without touching the cache or store.
    /// Language codes are case-insensitive.
    ///
    /// # Errors
    /// `InvalidLanguage` for blank language codes, and `TranslationUnavailable`
    /// when any fetch fails for a reason other than the package or language not
    /// existing. No partial output is produced.
    pub async fn translate(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
    ) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let source = normalize_language(source_language)?;
        let target = normalize_language(target_language)?;

        let lookup = self.build_lookup(&source, &target).await?;
        let translated = lookup.translate(text);

        debug!("Translated {} -> {}: {:?} -> {:?}", source, target, text, translated);
        Ok(translated)
    }

    /// Like [`translate`](Self::translate), but yields [`TRANSLATION_FAILED`] on error.
    pub async fn translate_or_fallback(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
    ) -> String {
        match self.translate(source_language, target_language, text).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Translation failed: {}", e);
                TRANSLATION_FAILED.to_string()
            }
        }
    }

    /// Build the lookup tables for a language pair.
    ///
    /// Packages are fetched concurrently but merged in registry order.
    pub async fn build_lookup(&self, source: &str, target: &str) -> Result<WordLookup> {
        let fetches = self.registry.list_packages().iter().map(|package| async move {
            futures::try_join!(self.entries(package, source), self.entries(package, target))
        });

        let packs = try_join_all(fetches).await.map_err(|e| {
            warn!("Aborting {} -> {} translation: {}", source, target, e);
            Error::TranslationUnavailable(e.to_string())
        })?;

        let mut lookup = WordLookup::new();
        for (source_entries, target_entries) in &packs {
            lookup.add_package(source_entries, target_entries);
        }
        Ok(lookup)
    }

    /// Entries of one package/language: cache first, then the store.
    /// A missing package or language contributes nothing.
    async fn entries(&self, package: &str, language: &str) -> Result<Arc<Vec<TranslationEntry>>> {
        if let Some(cached) = self.cache.load(package, language) {
            debug!("Using cached {}/{}", package, language);
            return Ok(cached);
        }

        match self.store.fetch_language_translations(package, language).await {
            Ok(entries) => Ok(Arc::new(entries)),
            Err(e) if e.is_not_found() => {
                debug!("No {}/{} in store: {}", package, language, e);
                Ok(Arc::default())
            }
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("registry", &self.registry)
            .field("cache", &self.cache)
            .finish()
    }
}

/// Trim and lower-case a language code; blank codes are rejected.
pub fn normalize_language(code: &str) -> Result<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(Error::InvalidLanguage(code.to_string()));
    }
    Ok(code.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Storage};
    use crate::test_utils::FakeStore;

    fn translator(store: FakeStore, packages: &[&str]) -> (Translator, Arc<FakeStore>, LocalCache) {
        let store = Arc::new(store);
        let cache = LocalCache::new(Arc::new(MemoryStorage::new()));
        let translator = Translator::new(
            store.clone(),
            cache.clone(),
            PackageRegistry::new(packages.iter().copied()),
        );
        (translator, store, cache)
    }

    fn travel() -> FakeStore {
        FakeStore::new()
            .with("travel_essentials", "en", &[("greet", "hello"), ("thanks", "Thank")])
            .with("travel_essentials", "fr", &[("greet", "bonjour"), ("thanks", "Merci")])
    }

    #[tokio::test]
    async fn test_single_package_scenario() {
        let (translator, _, _) = translator(travel(), &["travel_essentials"]);

        assert_eq!(translator.translate("EN", "FR", "hello").await.unwrap(), "bonjour");
        assert_eq!(
            translator.translate("EN", "FR", "hello world").await.unwrap(),
            "bonjour ?"
        );
    }

    #[tokio::test]
    async fn test_empty_text_does_no_lookups() {
        let (translator, store, _) = translator(travel(), &["travel_essentials"]);

        assert_eq!(translator.translate("en", "fr", "").await.unwrap(), "");
        // Even with unusable language codes
        assert_eq!(translator.translate("", "", "").await.unwrap(), "");
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive_output_keeps_stored_casing() {
        let (translator, _, _) = translator(travel(), &["travel_essentials"]);

        assert_eq!(
            translator.translate("en", "fr", "HELLO thank").await.unwrap(),
            "bonjour Merci"
        );
        // Same language: the token comes back in the stored casing
        assert_eq!(translator.translate("en", "en", "THANK").await.unwrap(), "Thank");
    }

    #[tokio::test]
    async fn test_token_count_is_preserved() {
        let (translator, _, _) = translator(travel(), &["travel_essentials"]);

        for text in ["hello", "hello  hello", " hello ", "a b c d", "hello, world!"] {
            let translated = translator.translate("en", "fr", text).await.unwrap();
            assert_eq!(
                translated.split(' ').count(),
                text.split(' ').count(),
                "{text:?} -> {translated:?}"
            );
        }

        // Punctuation is not stripped, so the token is unknown
        assert_eq!(translator.translate("en", "fr", "hello,").await.unwrap(), "?");
    }

    #[tokio::test]
    async fn test_key_without_target_text_is_unknown() {
        let store = FakeStore::new()
            .with("travel_essentials", "en", &[("greet", "hello"), ("bye", "goodbye")])
            .with("travel_essentials", "fr", &[("greet", "bonjour")]);
        let (translator, _, _) = translator(store, &["travel_essentials"]);

        assert_eq!(
            translator.translate("en", "fr", "goodbye hello").await.unwrap(),
            "? bonjour"
        );
    }

    #[tokio::test]
    async fn test_later_package_wins() {
        let store = FakeStore::new()
            .with("travel_essentials", "en", &[("greet", "hi")])
            .with("travel_essentials", "fr", &[("greet", "salut")])
            .with("business_essentials", "en", &[("greet", "hi")])
            .with("business_essentials", "fr", &[("greet", "coucou")]);

        let (translator, _, _) =
            translator(store, &["travel_essentials", "business_essentials"]);
        assert_eq!(translator.translate("en", "fr", "hi").await.unwrap(), "coucou");
    }

    #[tokio::test]
    async fn test_registry_order_decides_winner() {
        let store = FakeStore::new()
            .with("travel_essentials", "en", &[("greet", "hi")])
            .with("travel_essentials", "fr", &[("greet", "salut")])
            .with("business_essentials", "en", &[("greet", "hi")])
            .with("business_essentials", "fr", &[("greet", "coucou")]);

        let (translator, _, _) =
            translator(store, &["business_essentials", "travel_essentials"]);
        assert_eq!(translator.translate("en", "fr", "hi").await.unwrap(), "salut");
    }

    #[tokio::test]
    async fn test_keys_are_shared_across_packages() {
        // Source text known only in one package, target text only in another
        let store = FakeStore::new()
            .with("travel_essentials", "en", &[("doctor", "doctor")])
            .with("medical_care_essentials", "fr", &[("doctor", "médecin")]);

        let (translator, _, _) =
            translator(store, &["travel_essentials", "medical_care_essentials"]);
        assert_eq!(translator.translate("en", "fr", "doctor").await.unwrap(), "médecin");
    }

    #[tokio::test]
    async fn test_missing_package_contributes_nothing() {
        let (translator, _, _) =
            translator(travel(), &["travel_essentials", "business_essentials"]);

        assert_eq!(
            translator.translate("en", "fr", "hello").await.unwrap(),
            "bonjour"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_translation() {
        let store = travel().failing("business_essentials", "fr");
        let (translator, _, _) =
            translator(store, &["travel_essentials", "business_essentials"]);

        let err = translator.translate("en", "fr", "hello").await.unwrap_err();
        assert!(matches!(err, Error::TranslationUnavailable(_)));

        assert_eq!(
            translator.translate_or_fallback("en", "fr", "hello").await,
            TRANSLATION_FAILED
        );
    }

    #[tokio::test]
    async fn test_blank_language_is_rejected() {
        let (translator, store, _) = translator(travel(), &["travel_essentials"]);

        let err = translator.translate(" ", "fr", "hello").await.unwrap_err();
        assert!(matches!(err, Error::InvalidLanguage(_)));
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_cache_is_read_before_store() {
        let (translator, store, cache) = translator(FakeStore::new(), &["travel_essentials"]);
        cache.save(
            "travel_essentials",
            "en",
            &[TranslationEntry::new("greet", "hello")],
        );
        cache.save(
            "travel_essentials",
            "FR",
            &[TranslationEntry::new("greet", "bonjour")],
        );

        assert_eq!(translator.translate("EN", "FR", "hello").await.unwrap(), "bonjour");
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_translation_does_not_write_cache() {
        let storage = MemoryStorage::new();
        let cache = LocalCache::new(Arc::new(storage.clone()));
        let translator = Translator::new(
            Arc::new(travel()),
            cache.clone(),
            PackageRegistry::new(["travel_essentials"]),
        );

        translator.translate("en", "fr", "hello").await.unwrap();

        assert!(storage.keys().unwrap().is_empty());
        assert!(!cache.exists("travel_essentials", "fr"));
    }

    #[test]
    fn test_word_lookup_overwrite() {
        let mut lookup = WordLookup::new();
        lookup.add_package(
            &[TranslationEntry::new("a", "Same")],
            &[TranslationEntry::new("a", "first")],
        );
        lookup.add_package(
            &[TranslationEntry::new("b", "same")],
            &[TranslationEntry::new("b", "second")],
        );

        // "same" now maps to key b
        assert_eq!(lookup.translate_word("SAME"), "second");
        assert_eq!(lookup.translate(""), "?");
    }
}
