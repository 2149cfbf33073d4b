//! Error taxonomy for the session core.
//!
//! ERROR HANDLING
//! ==============
//! `DecodeError` and `AuthzError` never leave [`super::guard::SessionGuard`];
//! the guard resolves them into a redirect plus an optional notification.
//! `PersistenceError` is the one failure that propagates to callers, since a
//! failed write leaves memory and durable storage out of step.

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;

/// Failure to turn a bearer token into a usable claim set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Wrong segment count, bad base64url, non-UTF-8, non-object JSON, or a
    /// required claim (`sub`, `name`, `email`) missing.
    #[error("malformed token")]
    Malformed,
}

/// Reason a route refused the current session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// No session is stored.
    #[error("not signed in")]
    Unauthenticated,
    /// A session exists but lacks some of the route's roles.
    #[error("missing roles: {}", missing.join(", "))]
    InsufficientRole {
        /// Required roles absent from the session, in requirement order.
        missing: Vec<String>,
    },
}

/// A persisted cell could not mirror its value to durable storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// Serialization or the storage write itself failed.
    #[error("failed to persist `{key}`: {reason}")]
    WriteFailed { key: String, reason: String },
}
