//! Message catalog for the strings the session layer surfaces.
//!
//! Only ids raised by the guard and the shell are known here; an unknown id
//! renders as itself so a missing entry is visible rather than blank.

#[cfg(test)]
#[path = "i18n_test.rs"]
mod i18n_test;

use crate::session::{PersistedCell, Translator};
use crate::state::language::Language;

/// Look up `message_id` in `language`.
#[must_use]
pub fn lookup(language: Language, message_id: &str) -> Option<&'static str> {
    let text = match (language, message_id) {
        (Language::English, "token.missing") => "Sign-in failed",
        (Language::English, "token.missing.description") => "The login service did not return a token.",
        (Language::English, "token.invalid") => "Sign-in failed",
        (Language::English, "token.invalid.description") => "The login token could not be read. Please sign in again.",
        (Language::English, "account.disabled") => "Account disabled",
        (Language::English, "account.disabled.description") => "Your account has been disabled. Contact an administrator.",
        (Language::English, "roles.missing") => "Access denied. Missing roles",
        (Language::English, "session.store_failed") => "Sign-in not saved",
        (Language::English, "session.store_failed.description") => "Your browser refused to store the session. Check storage settings and sign in again.",
        (Language::English, "session.signed_out") => "Signed out",
        (Language::English, "session.signed_out.description") => "You have been signed out.",
        (Language::English, "login.title") => "Sign in to the intelligence console",
        (Language::English, "login.button") => "Sign in",
        (Language::English, "nav.logout") => "Sign out",
        (Language::English, "nav.theme") => "Toggle theme",
        (Language::English, "login.completing") => "Signing you in...",
        (Language::English, "login.retry") => "Back to sign-in",
        (Language::English, "page.not_found") => "This page does not exist.",

        (Language::Norwegian, "token.missing") => "Innlogging feilet",
        (Language::Norwegian, "token.missing.description") => "Innloggingstjenesten returnerte ingen token.",
        (Language::Norwegian, "token.invalid") => "Innlogging feilet",
        (Language::Norwegian, "token.invalid.description") => "Innloggingstoken kunne ikke leses. Logg inn på nytt.",
        (Language::Norwegian, "account.disabled") => "Konto deaktivert",
        (Language::Norwegian, "account.disabled.description") => "Kontoen din er deaktivert. Kontakt en administrator.",
        (Language::Norwegian, "roles.missing") => "Ingen tilgang. Mangler roller",
        (Language::Norwegian, "session.store_failed") => "Innloggingen ble ikke lagret",
        (Language::Norwegian, "session.store_failed.description") => "Nettleseren nektet å lagre økten. Sjekk lagringsinnstillingene og logg inn på nytt.",
        (Language::Norwegian, "session.signed_out") => "Logget ut",
        (Language::Norwegian, "session.signed_out.description") => "Du er nå logget ut.",
        (Language::Norwegian, "login.title") => "Logg inn i etterretningskonsollet",
        (Language::Norwegian, "login.button") => "Logg inn",
        (Language::Norwegian, "nav.logout") => "Logg ut",
        (Language::Norwegian, "nav.theme") => "Bytt tema",
        (Language::Norwegian, "login.completing") => "Logger deg inn...",
        (Language::Norwegian, "login.retry") => "Tilbake til innlogging",
        (Language::Norwegian, "page.not_found") => "Denne siden finnes ikke.",

        _ => return None,
    };
    Some(text)
}

/// Text for `message_id`, or the id itself when the catalog has no entry.
#[must_use]
pub fn text(language: Language, message_id: &str) -> String {
    lookup(language, message_id).map_or_else(|| message_id.to_owned(), str::to_owned)
}

/// [`Translator`] following the persisted language preference.
#[derive(Clone, Debug)]
pub struct Catalog {
    language: PersistedCell<Language>,
}

impl Catalog {
    pub fn new(language: PersistedCell<Language>) -> Self {
        Self { language }
    }
}

impl Translator for Catalog {
    fn translate(&self, message_id: &str) -> String {
        text(self.language.get().unwrap_or_default(), message_id)
    }
}
