//! Console sections and the access rule declared for each.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router mounts a single catch-all route; the outlet resolves the
//! location to a [`Section`] here and hands its requirement to the session
//! guard. Keeping the table as data means every section goes through the
//! same `authorize` call.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::config::AuthPaths;
use crate::session::RouteAuthRequirement;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_VIEWER: &str = "viewer";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Sources,
    Providers,
    IgnoreLists,
    Users,
    ApiTokens,
    Secrets,
    Login,
    LoginCallback,
    NotFound,
}

impl Section {
    pub const NAVIGABLE: [Self; 7] = [
        Self::Dashboard,
        Self::Sources,
        Self::Providers,
        Self::IgnoreLists,
        Self::Users,
        Self::ApiTokens,
        Self::Secrets,
    ];

    /// Resolve a location pathname. Query strings and trailing slashes are
    /// ignored. Sections live under the configured root; anything outside it
    /// other than the login and callback paths is [`Section::NotFound`].
    #[must_use]
    pub fn resolve(paths: &AuthPaths, pathname: &str) -> Self {
        let path = pathname.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let root = paths.root_path.trim_end_matches('/');
        if trimmed == root {
            return Self::Dashboard;
        }
        if trimmed == paths.login_path.trim_end_matches('/') {
            return Self::Login;
        }
        if trimmed == paths.callback_path.trim_end_matches('/') {
            return Self::LoginCallback;
        }
        let Some(rest) = trimmed.strip_prefix(root).filter(|rest| rest.starts_with('/')) else {
            return Self::NotFound;
        };
        let first = rest.trim_start_matches('/').split('/').next().unwrap_or_default();
        Self::NAVIGABLE
            .into_iter()
            .find(|s| s.slug() == Some(first))
            .unwrap_or(Self::NotFound)
    }

    /// Path segment below the root, for sections mounted there.
    #[must_use]
    pub fn slug(self) -> Option<&'static str> {
        match self {
            Self::Sources => Some("sources"),
            Self::Providers => Some("providers"),
            Self::IgnoreLists => Some("ignore-lists"),
            Self::Users => Some("users"),
            Self::ApiTokens => Some("tokens"),
            Self::Secrets => Some("secrets"),
            Self::Dashboard | Self::Login | Self::LoginCallback | Self::NotFound => None,
        }
    }

    #[must_use]
    pub fn href(self, paths: &AuthPaths) -> String {
        match (self, self.slug()) {
            (Self::Login, _) => paths.login_path.clone(),
            (Self::LoginCallback, _) => paths.callback_path.clone(),
            (_, Some(slug)) => format!("{}/{slug}", paths.root_path.trim_end_matches('/')),
            (_, None) => paths.root_path.clone(),
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Overview",
            Self::Sources => "Sources",
            Self::Providers => "Providers",
            Self::IgnoreLists => "Ignore lists",
            Self::Users => "Users",
            Self::ApiTokens => "API tokens",
            Self::Secrets => "Secrets",
            Self::Login | Self::LoginCallback => "Sign in",
            Self::NotFound => "Not found",
        }
    }

    /// Access rule for this section. Unknown paths still require sign-in so
    /// the not-found page does not reveal the console to anonymous visitors.
    #[must_use]
    pub fn requirement(self) -> RouteAuthRequirement {
        match self {
            Self::Login | Self::LoginCallback => RouteAuthRequirement::Public,
            Self::Dashboard | Self::NotFound => RouteAuthRequirement::authenticated(),
            Self::Sources | Self::Providers | Self::IgnoreLists => RouteAuthRequirement::roles([ROLE_VIEWER]),
            Self::Users | Self::ApiTokens | Self::Secrets => RouteAuthRequirement::roles([ROLE_ADMIN]),
        }
    }
}
