//! Reactive application state shared through Leptos context.
//!
//! DESIGN
//! ======
//! Durable preferences (session, theme, language) live in
//! [`PersistedCell`]s; [`bind_signal`] mirrors a cell into a signal so
//! components re-render when it changes. Transient UI state (toasts) is a
//! plain signal.


pub mod language;
pub mod theme;
pub mod toasts;

use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ConsoleConfig;
use crate::session::{BrowserStore, PersistedCell, Session};
use language::{Language, language_cell};
use theme::{Theme, theme_cell};

/// Mirror `cell` into a read-only signal kept current by a subscription.
pub fn bind_signal<T>(cell: &PersistedCell<T>) -> ReadSignal<Option<T>>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let signal = RwSignal::new(cell.get());
    cell.subscribe(move |value| signal.set(value.cloned()));
    signal.read_only()
}

/// Flips to `true` after the first client render.
///
/// Browser storage is empty during SSR, so markup derived from a persisted
/// cell must stay at its default until this is set or hydration sees a
/// different tree than the server sent. `App` marks it from an `Effect`,
/// which never runs on the server.
#[derive(Clone, Copy, Debug)]
pub struct Mounted(RwSignal<bool>);

impl Default for Mounted {
    fn default() -> Self {
        Self::new()
    }
}

impl Mounted {
    pub fn new() -> Self {
        Self(RwSignal::new(false))
    }

    pub fn mark(self) {
        self.0.set(true);
    }

    pub fn get(self) -> bool {
        self.0.get()
    }

    /// `value` once mounted, `None` before.
    pub fn gate<T>(self, value: Option<T>) -> Option<T> {
        value.filter(|_| self.0.get())
    }
}

/// Persisted cells and their mirrored signals, provided once by `App`.
#[derive(Clone, Debug)]
pub struct ConsoleState {
    pub session_cell: PersistedCell<Session>,
    pub session: ReadSignal<Option<Session>>,
    pub theme_cell: PersistedCell<Theme>,
    pub theme: ReadSignal<Option<Theme>>,
    pub language_cell: PersistedCell<Language>,
    pub language: ReadSignal<Option<Language>>,
}

impl ConsoleState {
    /// Open all console cells over browser storage.
    pub fn open(config: &ConsoleConfig) -> Self {
        let session_cell = PersistedCell::new(config.session_key(), None, BrowserStore);
        let theme_cell = theme_cell(config.theme_key(), BrowserStore);
        let language_cell = language_cell(config.language_key(), BrowserStore);
        Self::from_cells(session_cell, theme_cell, language_cell)
    }

    pub fn from_cells(
        session_cell: PersistedCell<Session>,
        theme_cell: PersistedCell<Theme>,
        language_cell: PersistedCell<Language>,
    ) -> Self {
        Self {
            session: bind_signal(&session_cell),
            theme: bind_signal(&theme_cell),
            language: bind_signal(&language_cell),
            session_cell,
            theme_cell,
            language_cell,
        }
    }

    /// Current language, falling back to the default when unset.
    pub fn current_language(&self) -> Language {
        self.language_cell.get().unwrap_or_default()
    }
}
