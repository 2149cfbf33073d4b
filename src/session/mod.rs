//! Client-side session and authorization core.
//!
//! ARCHITECTURE
//! ============
//! `store` abstracts durable key-value storage, `cell` builds the persisted
//! reactive value on top of it, `token` and `model` turn a bearer token into a
//! [`model::Session`], and `guard` drives login completion, logout, and the
//! per-route authorization check. Everything here is synchronous and
//! independent of Leptos so it can be tested natively.

pub mod cell;
pub mod errors;
pub mod guard;
pub mod model;
pub mod ports;
pub mod store;
pub mod token;

pub use cell::{PersistedCell, SubscriptionId};
pub use errors::{AuthzError, DecodeError, PersistenceError};
pub use guard::{
    Decision, LoginFailure, LoginOutcome, LoginParams, NEXT_PARAM, NavigationCause, Redirect,
    RouteAuthRequirement, SessionGuard, SessionState,
};
pub use model::Session;
pub use ports::{Navigator, Notification, NotificationKind, Notifier, Translator};
pub use store::{BrowserStore, KeyValueStore, MemoryStore};
