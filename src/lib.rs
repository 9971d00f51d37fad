//! Phrasebook - word-substitution translation with offline language packs.
//!
//! ## Architecture
//!
//! - `store` - Translation store client (remote `{key, text}` pairs per package/language)
//! - `storage` - Persisted key-value storage
//! - `local_cache` - Downloaded packs, keyed by package and language
//! - `cache` - Moka memo caches
//! - `registry` - Ordered list of packages the translator consults
//! - `translator` - Word-by-word substitution through shared keys
//! - `downloads` - Priming the cache for offline use
//! - `languages` - Language catalog and language pair state
//! - `preferences` - Saved language choices
//! - `recognition` - Injected OCR/speech capability and capture flow
//! - `config` - Environment configuration
//! - `app` - Wiring

pub mod app;
pub mod cache;
pub mod config;
pub mod downloads;
pub mod error;
pub mod languages;
pub mod local_cache;
pub mod preferences;
pub mod recognition;
pub mod registry;
pub mod storage;
pub mod store;
pub mod translator;

#[cfg(test)]
mod test_utils;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use local_cache::LocalCache;
pub use registry::PackageRegistry;
pub use store::{TranslationEntry, TranslationStore};
pub use translator::{TRANSLATION_FAILED, Translator};
