//! Capabilities the session core consumes but does not implement.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router, toast surface, and message catalog live in the UI layer
//! (`crate::app`, `crate::state::toasts`, `crate::i18n`). The guard only sees
//! these traits so it can be exercised with recording doubles.

use super::guard::Redirect;

/// Severity of a user-visible notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// A translated message for the notification sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

/// Client-side navigation. Fire-and-forget.
pub trait Navigator {
    fn navigate(&self, redirect: &Redirect);
}

/// User-visible notification sink. Fire-and-forget.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Message-id to human text lookup in the active language.
pub trait Translator {
    fn translate(&self, message_id: &str) -> String;
}
