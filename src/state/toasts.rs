//! Transient notification stack rendered by the toast overlay.
//!
//! DESIGN
//! ======
//! `ToastNotifier` is the UI-side implementation of the session core's
//! [`Notifier`] port: it appends to a bounded list held in a signal, and the
//! overlay component renders whatever the list contains.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

use leptos::prelude::*;

use crate::session::{Notification, NotificationKind, Notifier};

/// Maximum number of toasts kept; the oldest is dropped first.
pub const TOAST_CAP: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Append a toast and return its id.
    pub fn push(&mut self, notification: Notification) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.toasts.len() >= TOAST_CAP {
            self.toasts.remove(0);
        }
        self.toasts.push(Toast { id, notification });
        id
    }

    /// Remove the toast with `id`. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }
}

/// [`Notifier`] that feeds the toast overlay.
#[derive(Clone, Copy, Debug)]
pub struct ToastNotifier {
    toasts: RwSignal<ToastState>,
}

impl ToastNotifier {
    pub fn new(toasts: RwSignal<ToastState>) -> Self {
        Self { toasts }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        if notification.kind == NotificationKind::Error {
            leptos::logging::warn!("{}", notification.title);
        }
        self.toasts.update(|state| {
            state.push(notification);
        });
    }
}
