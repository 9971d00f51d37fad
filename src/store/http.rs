//! HTTP implementation of the translation store client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{ApiMessage, LanguageTranslations, TranslationEntry, TranslationStore, UpsertRequest};
use crate::error::{Error, Result};

/// Client for the translation store REST API.
///
/// Endpoints are resolved relative to the base URL, e.g.
/// `http://localhost:5000/api/translations` + `travel_essentials/fr`.
#[derive(Debug, Clone)]
pub struct HttpStore {
    http: Client,
    base_url: Url,
}

impl HttpStore {
    /// Create a client for the store at `base_url`.
    ///
    /// `timeout` bounds every request; an expired timeout surfaces as `Network`.
    ///
    /// # Errors
    /// Returns error if the URL cannot serve as a base or the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid store URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("store URL {base_url} cannot be a base")));
        }

        let http = Client::builder()
            .user_agent(concat!("phrasebook/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("store URL {} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        let response = check_status(response, what).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Map non-2xx answers onto the error taxonomy.
/// 404 means the package or language does not exist; anything else is a transport problem.
async fn check_status(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ApiMessage>()
        .await
        .ok()
        .map(|m| m.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.to_string());

    if status == StatusCode::NOT_FOUND {
        Err(Error::NotFound(format!("{what}: {message}")))
    } else {
        Err(Error::Network(format!("{what}: store returned {status}: {message}")))
    }
}

#[async_trait]
impl TranslationStore for HttpStore {
    async fn list_packages(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&["packages"])?;
        self.get_json(url, "packages").await
    }

    async fn package_translations(&self, package: &str) -> Result<Vec<LanguageTranslations>> {
        let url = self.endpoint(&[package])?;
        self.get_json(url, package).await
    }

    async fn fetch_language_translations(
        &self,
        package: &str,
        language: &str,
    ) -> Result<Vec<TranslationEntry>> {
        let url = self.endpoint(&[package, language])?;
        let entries: Vec<TranslationEntry> = self
            .get_json(url, &format!("{package}/{language}"))
            .await?;
        debug!("Fetched {} entries for {}/{}", entries.len(), package, language);
        Ok(entries)
    }

    async fn upsert_translations(&self, package: &str, request: &UpsertRequest) -> Result<String> {
        let url = self.endpoint(&[package])?;
        debug!("POST {} ({} entries)", url, request.translations.len());

        let response = self.http.post(url).json(request).send().await?;
        let response = check_status(response, package).await?;
        let ack: ApiMessage = response.json().await?;
        Ok(ack.message)
    }
}
