//! Configuration module for phrasebook.
//!
//! Loads configuration from environment variables (and `.env`).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::registry::{DEFAULT_PACKAGES, PackageRegistry};

const DEFAULT_API_URL: &str = "http://localhost:5000/api/translations";
const DEFAULT_CACHE_PATH: &str = "phrasebook_cache.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the translation store API.
    pub api_url: String,

    /// Per-request timeout for the store client.
    pub http_timeout: Duration,

    /// File backing the persisted key-value storage.
    pub cache_path: PathBuf,

    /// Packages consulted by the translator, in order.
    pub packages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            packages: DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; missing or malformed values fall back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_url = env::var("TRANSLATION_API_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_url);

        let http_timeout = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| parse_timeout(&s))
            .unwrap_or(defaults.http_timeout);

        let cache_path = env::var("CACHE_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_path);

        let packages = env::var("TRANSLATION_PACKAGES")
            .ok()
            .map(|s| parse_packages(&s))
            .filter(|p| !p.is_empty())
            .unwrap_or(defaults.packages);

        Self {
            api_url,
            http_timeout,
            cache_path,
            packages,
        }
    }

    pub fn registry(&self) -> PackageRegistry {
        PackageRegistry::new(self.packages.iter().cloned())
    }
}

/// Seconds, strictly positive.
fn parse_timeout(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

/// Comma-separated package names, order preserved.
fn parse_packages(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
