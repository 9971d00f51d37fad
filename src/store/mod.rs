//! Translation store client.
//!
//! The store is a remote CRUD service holding `{key, text}` pairs grouped by
//! package and language. This module defines the wire models and the
//! `TranslationStore` seam; `HttpStore` talks to the real service.

mod http;

pub use http::HttpStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single `(key, text)` pair for one package and language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// Language-independent identifier, e.g. `greeting.hello`.
    pub key: String,
    /// Language-specific surface form.
    pub text: String,
}

impl TranslationEntry {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// All entries of one language inside a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTranslations {
    pub language: String,
    #[serde(default)]
    pub translations: Vec<TranslationEntry>,
}

/// Body of an upsert: replaces every entry of `language` in the package.
pub type UpsertRequest = LanguageTranslations;

/// `{message}` body the store uses for acknowledgements and errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// Remote source of translation entries.
///
/// Errors are propagated, never retried here; retry policy belongs to callers.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// List the package names the store knows about.
    async fn list_packages(&self) -> Result<Vec<String>>;

    /// Fetch every language of a package.
    async fn package_translations(&self, package: &str) -> Result<Vec<LanguageTranslations>>;

    /// Fetch the entries of one package in one language, in store order.
    ///
    /// Fails with `NotFound` when the package or language is unknown and with
    /// `Network` when the transport fails.
    async fn fetch_language_translations(
        &self,
        package: &str,
        language: &str,
    ) -> Result<Vec<TranslationEntry>>;

    /// Replace all entries of `request.language` in `package`.
    /// Returns the store's acknowledgement message.
    async fn upsert_translations(&self, package: &str, request: &UpsertRequest) -> Result<String>;
}
