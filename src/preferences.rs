//! Persisted user language preferences.
//!
//! Stored in the same key-value storage as the pack cache, under keys outside
//! the cache namespace.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::languages::{self, LanguagePair};
use crate::storage::Storage;

const APP_LANGUAGE_KEY: &str = "appLanguage";
const TARGET_LANGUAGE_KEY: &str = "targetLanguage";

const DEFAULT_APP_LANGUAGE: &str = "EN";
const DEFAULT_TARGET_LANGUAGE: &str = "FR";

/// Reader/writer for the user's language choices.
#[derive(Clone)]
pub struct Preferences {
    storage: Arc<dyn Storage>,
}

impl Preferences {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Language the user reads the app in (source side). Defaults to `EN`.
    pub fn app_language(&self) -> Result<String> {
        self.get_or(APP_LANGUAGE_KEY, DEFAULT_APP_LANGUAGE)
    }

    /// Language the user translates into. Defaults to `FR`.
    pub fn target_language(&self) -> Result<String> {
        self.get_or(TARGET_LANGUAGE_KEY, DEFAULT_TARGET_LANGUAGE)
    }

    pub fn set_app_language(&self, code: &str) -> Result<()> {
        self.set(APP_LANGUAGE_KEY, code)
    }

    pub fn set_target_language(&self, code: &str) -> Result<()> {
        self.set(TARGET_LANGUAGE_KEY, code)
    }

    /// The saved choices as a translation pair (app language on top).
    pub fn language_pair(&self) -> Result<LanguagePair> {
        Ok(LanguagePair::new(&self.app_language()?, &self.target_language()?))
    }

    fn get_or(&self, key: &str, default: &str) -> Result<String> {
        Ok(self
            .storage
            .get_item(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Only codes from the language catalog are accepted; stored upper-case.
    fn set(&self, key: &str, code: &str) -> Result<()> {
        let language =
            languages::find(code).ok_or_else(|| Error::InvalidLanguage(code.to_string()))?;
        let value = language.code.to_uppercase();

        self.storage.set_item(key, &value)?;
        debug!("Saved preference {} = {}", key, value);
        Ok(())
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}
