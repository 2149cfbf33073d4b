//! Interface language preference.

#[cfg(test)]
#[path = "language_test.rs"]
mod language_test;

use serde::{Deserialize, Serialize};

use crate::session::{KeyValueStore, PersistedCell};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "nb")]
    Norwegian,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::English, Self::Norwegian];

    /// BCP 47 code, also used for the `<html lang>` attribute.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Norwegian => "nb",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Name of the language in itself, for the switcher.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Norwegian => "Norsk",
        }
    }
}

/// Open the persisted language cell, defaulting to English.
pub fn language_cell(key: impl Into<String>, store: impl KeyValueStore + 'static) -> PersistedCell<Language> {
    PersistedCell::new(key, Some(Language::default()), store)
}

/// Set `lang` on the `<html>` element.
pub fn apply_language(language: Language) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let _ = el.set_attribute("lang", language.code());
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = language;
    }
}
