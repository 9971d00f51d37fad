//! Text capture from camera images and voice recordings.
//!
//! The platform OCR and speech SDKs stay behind the [`Recognizer`] trait and
//! are handed in by the caller. [`CaptureTranslator`] runs the
//! capture-then-translate flow of the scan and voice screens.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::languages::LanguagePair;
use crate::translator::{TRANSLATION_FAILED, Translator};

/// Media handed to a recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    /// A photo, by URI or path.
    Image { uri: String },
    /// A voice recording spoken in `language`.
    Speech { uri: String, language: String },
}

/// Position of a recognized block inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One block of recognized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedText {
    pub text: String,
    #[serde(default)]
    pub bounds: Option<Bounds>,
    /// 0.0 when the SDK does not report a confidence.
    #[serde(default)]
    pub confidence: f32,
}

impl RecognizedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bounds: None,
            confidence: 0.0,
        }
    }
}

/// Capability that turns media into text blocks.
///
/// Failures are reported as `Error::Recognition`.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, media: &Media) -> Result<Vec<RecognizedText>>;
}

/// What a capture produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The recognizer found no text.
    NoText,
    Translated {
        recognized: String,
        /// The translation, or [`TRANSLATION_FAILED`].
        translated: String,
    },
}

/// Recognize text in media and translate it for a language pair.
#[derive(Clone)]
pub struct CaptureTranslator {
    recognizer: Arc<dyn Recognizer>,
    translator: Translator,
}

impl CaptureTranslator {
    pub fn new(recognizer: Arc<dyn Recognizer>, translator: Translator) -> Self {
        Self {
            recognizer,
            translator,
        }
    }

    /// Recognize `media`, join the blocks with single spaces, and translate
    /// from `pair.top()` into `pair.bottom()`.
    ///
    /// # Errors
    /// Only recognizer failures propagate; translation failures become
    /// [`TRANSLATION_FAILED`] in the outcome.
    pub async fn capture(&self, media: &Media, pair: &LanguagePair) -> Result<CaptureOutcome> {
        let blocks = self
            .recognizer
            .recognize(media)
            .await
            .inspect_err(|e| warn!("Recognition failed: {}", e))?;

        let recognized = blocks
            .iter()
            .map(|b| b.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if recognized.is_empty() {
            debug!("No text detected in {:?}", media);
            return Ok(CaptureOutcome::NoText);
        }

        let translated = self
            .translator
            .translate_or_fallback(pair.top(), pair.bottom(), &recognized)
            .await;

        Ok(CaptureOutcome::Translated {
            recognized,
            translated,
        })
    }
}

impl std::fmt::Debug for CaptureTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureTranslator")
            .field("translator", &self.translator)
            .finish_non_exhaustive()
    }
}
