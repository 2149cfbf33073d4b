//! Colour theme preference and its application to the document.
//!
//! The preference lives in a [`PersistedCell`]; `apply_theme` writes a
//! `data-theme` attribute on `<html>`, resolving `System` through
//! `prefers-color-scheme`. Outside the `hydrate` build application is a
//! no-op so server rendering stays deterministic.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use serde::{Deserialize, Serialize};

use crate::session::{KeyValueStore, PersistedCell};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the operating system preference.
    #[default]
    System,
}

impl Theme {
    /// Toggle order used by the header button.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    /// Concrete `data-theme` value given whether the system prefers dark.
    #[must_use]
    pub fn resolve(self, system_prefers_dark: bool) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System if system_prefers_dark => "dark",
            Self::System => "light",
        }
    }
}

/// Open the persisted theme cell, defaulting to [`Theme::System`].
pub fn theme_cell(key: impl Into<String>, store: impl KeyValueStore + 'static) -> PersistedCell<Theme> {
    PersistedCell::new(key, Some(Theme::default()), store)
}

fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Apply `theme` to the `<html>` element.
pub fn apply_theme(theme: Theme) {
    let resolved = theme.resolve(system_prefers_dark());
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let _ = el.set_attribute("data-theme", resolved);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = resolved;
    }
}
