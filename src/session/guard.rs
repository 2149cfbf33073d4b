//! Login completion, logout, and the per-route authorization check.
//!
//! STATE MACHINE
//! =============
//! `Anonymous` (no stored session) and `Authenticated(Session)`.
//! - login completion: `Anonymous -> Authenticated` on a decodable token;
//!   otherwise stays put and raises exactly one of `token.invalid`,
//!   `token.missing`, `account.disabled`, or `session.store_failed` when the
//!   decoded session cannot be stored.
//! - logout: `Authenticated -> Anonymous`.
//! - authorization: read-only; resolves to allow or a redirect, plus at most
//!   one notification per call.
//!
//! ERROR HANDLING
//! ==============
//! Decode and authorization failures are absorbed here. Only persistence
//! failures escape, from the two operations that write the session cell.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::rc::Rc;

use leptos::logging::{log, warn};

use super::cell::PersistedCell;
use super::errors::{AuthzError, PersistenceError};
use super::model::Session;
use super::ports::{Navigator, Notification, NotificationKind, Notifier, Translator};
use crate::config::AuthPaths;

pub const MSG_TOKEN_MISSING: &str = "token.missing";
pub const MSG_TOKEN_INVALID: &str = "token.invalid";
pub const MSG_ACCOUNT_DISABLED: &str = "account.disabled";
pub const MSG_ROLES_MISSING: &str = "roles.missing";
pub const MSG_SESSION_STORE_FAILED: &str = "session.store_failed";

/// Query parameter carrying the post-login destination.
pub const NEXT_PARAM: &str = "next";

/// Access rule declared on a route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteAuthRequirement {
    /// Reachable without signing in.
    Public,
    /// Signed-in users holding every listed role; empty means any signed-in user.
    Roles(Vec<String>),
}

impl RouteAuthRequirement {
    #[must_use]
    pub fn authenticated() -> Self {
        Self::Roles(Vec::new())
    }

    /// Requirement for `roles`, keeping first-seen order and dropping repeats.
    pub fn roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for role in roles {
            let role = role.into();
            if !ordered.contains(&role) {
                ordered.push(role);
            }
        }
        Self::Roles(ordered)
    }

    /// Roles that must all be held; empty for public routes.
    #[must_use]
    pub fn required_roles(&self) -> &[String] {
        match self {
            Self::Public => &[],
            Self::Roles(roles) => roles,
        }
    }
}

/// Why the router is asking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationCause {
    /// The user is actually moving to the route.
    #[default]
    Navigation,
    /// The router is preloading the route; no side effects.
    Prefetch,
}

/// Where to send the user instead of the requested route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub target: String,
    pub params: Vec<(String, String)>,
}

impl Redirect {
    #[must_use]
    pub fn to(target: impl Into<String>) -> Self {
        Self { target: target.into(), params: Vec::new() }
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Target with percent-encoded query string appended.
    #[must_use]
    pub fn href(&self) -> String {
        if self.params.is_empty() {
            return self.target.clone();
        }
        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.target)
    }
}

/// Outcome of [`SessionGuard::authorize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(Redirect),
}

impl Decision {
    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Current authentication state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(Session),
}

/// Query parameters the login landing route inspects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginParams {
    /// Raw `token` value; `Some("")` still counts as a token that was sent.
    pub token: Option<String>,
    /// The backend flagged the account as disabled instead of issuing a token.
    pub disabled: bool,
    /// Requested post-login destination.
    pub next: Option<String>,
}

impl LoginParams {
    /// Collect `token`, `disabled`, and `next` from decoded query pairs.
    /// Later duplicates win.
    pub fn from_query<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key {
                "token" => params.token = Some(value.to_owned()),
                "disabled" => params.disabled = !matches!(value.trim(), "false" | "0"),
                NEXT_PARAM => params.next = Some(value.to_owned()).filter(|v| !v.is_empty()),
                _ => {}
            }
        }
        params
    }
}

/// Why a login attempt did not produce a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginFailure {
    TokenMissing,
    TokenInvalid,
    AccountDisabled,
}

impl LoginFailure {
    #[must_use]
    pub fn message_id(self) -> &'static str {
        match self {
            Self::TokenMissing => MSG_TOKEN_MISSING,
            Self::TokenInvalid => MSG_TOKEN_INVALID,
            Self::AccountDisabled => MSG_ACCOUNT_DISABLED,
        }
    }
}

/// Result of [`SessionGuard::complete_login`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session stored; the user was sent to `next`.
    SignedIn { next: String },
    Failed(LoginFailure),
}

/// Session lifecycle and route authorization over an injected session cell.
#[derive(Clone)]
pub struct SessionGuard {
    session: PersistedCell<Session>,
    paths: AuthPaths,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    translator: Rc<dyn Translator>,
}

impl SessionGuard {
    pub fn new(
        session: PersistedCell<Session>,
        paths: AuthPaths,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
        translator: Rc<dyn Translator>,
    ) -> Self {
        Self { session, paths, navigator, notifier, translator }
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.session.get()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session().map_or(SessionState::Anonymous, SessionState::Authenticated)
    }

    /// Pure access decision for the stored session.
    ///
    /// # Errors
    ///
    /// [`AuthzError::Unauthenticated`] without a session on a non-public
    /// route; [`AuthzError::InsufficientRole`] when roles are missing.
    pub fn evaluate(&self, requirement: &RouteAuthRequirement) -> Result<(), AuthzError> {
        let RouteAuthRequirement::Roles(required) = requirement else {
            return Ok(());
        };
        self.session.with(|session| {
            let session = session.ok_or(AuthzError::Unauthenticated)?;
            let missing = session.missing_roles(required);
            if missing.is_empty() {
                Ok(())
            } else {
                Err(AuthzError::InsufficientRole { missing: missing.into_iter().map(str::to_owned).collect() })
            }
        })
    }

    /// Pre-render check invoked by the router for `current_path`.
    ///
    /// On a real navigation a denial also navigates to the returned redirect,
    /// and a role failure raises one notification naming the missing roles.
    /// Prefetches only compute the decision.
    pub fn authorize(&self, requirement: &RouteAuthRequirement, current_path: &str, cause: NavigationCause) -> Decision {
        let error = match self.evaluate(requirement) {
            Ok(()) => return Decision::Allow,
            Err(error) => error,
        };

        let redirect = match &error {
            AuthzError::Unauthenticated => {
                let redirect = Redirect::to(&self.paths.login_path);
                if self.is_root(current_path) {
                    redirect
                } else {
                    redirect.with_param(NEXT_PARAM, current_path)
                }
            }
            AuthzError::InsufficientRole { .. } => Redirect::to(&self.paths.root_path),
        };

        if cause == NavigationCause::Navigation {
            warn!("access to {current_path} denied: {error}");
            if let AuthzError::InsufficientRole { missing } = &error {
                self.notify_error(MSG_ROLES_MISSING, missing.join(", "));
            }
            self.navigator.navigate(&redirect);
        }
        Decision::Redirect(redirect)
    }

    /// Turn the login landing parameters into a session.
    ///
    /// A token that was sent but cannot be decoded reports `token.invalid`;
    /// the disabled flag is only consulted when no token was sent at all.
    /// On success the user is sent to a sanitized `next` (root by default),
    /// which also drops the token from the visible URL.
    ///
    /// # Errors
    ///
    /// [`PersistenceError::WriteFailed`] if the session cannot be stored. The
    /// guard is left `Anonymous` and one `session.store_failed` error is
    /// raised before returning.
    pub fn complete_login(&self, params: &LoginParams) -> Result<LoginOutcome, PersistenceError> {
        let failure = match params.token.as_deref() {
            Some(token) => match Session::from_token(token) {
                Ok(session) => {
                    let user_id = session.user_id.clone();
                    if let Err(e) = self.session.set_value(Some(session)) {
                        // Memory already holds the session; a login that could
                        // not be stored must not leave the user signed in.
                        let _ = self.session.set_value(None);
                        self.notify_error(
                            MSG_SESSION_STORE_FAILED,
                            self.translator.translate(&format!("{MSG_SESSION_STORE_FAILED}.description")),
                        );
                        return Err(e);
                    }
                    let next = self.sanitize_next(params.next.as_deref());
                    log!("signed in user {user_id}");
                    self.navigator.navigate(&Redirect::to(next.clone()));
                    return Ok(LoginOutcome::SignedIn { next });
                }
                Err(e) => {
                    warn!("login token rejected: {e}");
                    LoginFailure::TokenInvalid
                }
            },
            None if params.disabled => LoginFailure::AccountDisabled,
            None => LoginFailure::TokenMissing,
        };

        let id = failure.message_id();
        self.notify_error(id, self.translator.translate(&format!("{id}.description")));
        Ok(LoginOutcome::Failed(failure))
    }

    /// Forget the stored session.
    ///
    /// # Errors
    ///
    /// Propagates [`PersistenceError`] from the session cell.
    pub fn logout(&self) -> Result<(), PersistenceError> {
        self.session.set_value(None)
    }

    fn notify_error(&self, message_id: &str, description: String) {
        self.notifier.notify(Notification {
            kind: NotificationKind::Error,
            title: self.translator.translate(message_id),
            description,
        });
    }

    fn is_root(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default().trim();
        path.is_empty() || path.trim_end_matches('/') == self.paths.root_path.trim_end_matches('/')
    }

    /// Accept only same-origin absolute paths; anything else becomes root.
    fn sanitize_next(&self, next: Option<&str>) -> String {
        match next.map(str::trim) {
            Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path.to_owned(),
            _ => self.paths.root_path.clone(),
        }
    }
}
