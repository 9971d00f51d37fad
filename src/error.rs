//! Error types shared by the library.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between the UI and the translation store.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure reaching the translation store (includes timeouts).
    #[error("network error: {0}")]
    Network(String),

    /// The store has no such package or language.
    #[error("not found: {0}")]
    NotFound(String),

    /// The store answered with a body we could not decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Local persistence failed while writing.
    #[error("cache write failed: {0}")]
    CacheWrite(String),

    /// Local persistence failed while reading.
    #[error("storage error: {0}")]
    Storage(String),

    /// A translation could not be produced because its data could not be fetched.
    #[error("translation unavailable: {0}")]
    TranslationUnavailable(String),

    /// Invalid startup configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid language code: {0:?}")]
    InvalidLanguage(String),

    /// The injected recognizer failed to turn media into text.
    #[error("recognition failed: {0}")]
    Recognition(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the store reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
