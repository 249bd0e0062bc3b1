//! Common types used across the services

use serde::{Deserialize, Serialize};

/// Language code used when the caller does not specify one
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Languages the product ships a persona prompt and speech output for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Telugu,
}

impl Language {
    /// Resolve a supported language from a request code.
    ///
    /// Region suffixes are ignored, so `te-IN` resolves to Telugu.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Language::English),
            "te" => Some(Language::Telugu),
            _ => None,
        }
    }

    /// Language whose persona prompt answers a request in `code`.
    /// Anything other than Telugu falls back to the English persona.
    pub fn persona_for(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }

    /// Whether speech synthesis is offered for replies in `code`
    pub fn supports_speech(code: &str) -> bool {
        Self::from_code(code).is_some()
    }
}

/// Whether two language codes name the same primary language
pub fn same_language(a: &str, b: &str) -> bool {
    let primary = |code: &str| {
        code.split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    };
    primary(a) == primary(b)
}
