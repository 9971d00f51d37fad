//! Supported languages and the source/target language pair.

use serde::Serialize;

/// A language the app offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Two-letter lower-case code, as served by the translation store.
    pub code: &'static str,
    pub label: &'static str,
}

pub static LANGUAGES: [Language; 20] = [
    Language { code: "en", label: "English" },
    Language { code: "ro", label: "Romanian" },
    Language { code: "fr", label: "French" },
    Language { code: "de", label: "German" },
    Language { code: "it", label: "Italian" },
    Language { code: "es", label: "Spanish" },
    Language { code: "pt", label: "Portuguese" },
    Language { code: "ru", label: "Russian" },
    Language { code: "zh", label: "Chinese" },
    Language { code: "ja", label: "Japanese" },
    Language { code: "ar", label: "Arabic" },
    Language { code: "hi", label: "Hindi" },
    Language { code: "bn", label: "Bengali" },
    Language { code: "ko", label: "Korean" },
    Language { code: "tr", label: "Turkish" },
    Language { code: "vi", label: "Vietnamese" },
    Language { code: "nl", label: "Dutch" },
    Language { code: "pl", label: "Polish" },
    Language { code: "sv", label: "Swedish" },
    Language { code: "th", label: "Thai" },
];

/// Country (ISO 3166 alpha-2) to default language code.
const COUNTRY_LANGUAGES: [(&str, &str); 20] = [
    ("US", "en"),
    ("RO", "ro"),
    ("FR", "fr"),
    ("DE", "de"),
    ("IT", "it"),
    ("ES", "es"),
    ("PT", "pt"),
    ("RU", "ru"),
    ("CN", "zh"),
    ("JP", "ja"),
    ("AE", "ar"),
    ("IN", "hi"),
    ("BD", "bn"),
    ("KR", "ko"),
    ("TR", "tr"),
    ("VN", "vi"),
    ("NL", "nl"),
    ("PL", "pl"),
    ("SE", "sv"),
    ("TH", "th"),
];

/// Find a language by code, ignoring case.
pub fn find(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

/// Default language for a country code, ignoring case.
pub fn language_for_country(country: &str) -> Option<&'static str> {
    let country = country.trim();
    COUNTRY_LANGUAGES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(country))
        .map(|(_, lang)| *lang)
}

/// Which side of the pair a selection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
}

/// Source (`top`) and target (`bottom`) language of a translation screen.
///
/// Immutable: every change returns a new pair. Codes are kept upper-case,
/// the way the UI displays them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguagePair {
    top: String,
    bottom: String,
}

impl LanguagePair {
    pub fn new(top: &str, bottom: &str) -> Self {
        Self {
            top: top.trim().to_uppercase(),
            bottom: bottom.trim().to_uppercase(),
        }
    }

    pub fn top(&self) -> &str {
        &self.top
    }

    pub fn bottom(&self) -> &str {
        &self.bottom
    }

    #[must_use]
    pub fn with_top(&self, code: &str) -> Self {
        Self::new(code, &self.bottom)
    }

    #[must_use]
    pub fn with_bottom(&self, code: &str) -> Self {
        Self::new(&self.top, code)
    }

    /// Apply a selection made on one side.
    #[must_use]
    pub fn select(&self, side: Side, code: &str) -> Self {
        match side {
            Side::Top => self.with_top(code),
            Side::Bottom => self.with_bottom(code),
        }
    }

    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            top: self.bottom.clone(),
            bottom: self.top.clone(),
        }
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new("EN", "FR")
    }
}
