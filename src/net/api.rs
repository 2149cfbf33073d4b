//! REST helpers that forward the session's bearer token.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: stubs returning an error, since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>` instead of panics. A 401 maps to
//! [`ApiError::Unauthorized`]; the caller logs the user out because tokens
//! are never refreshed.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ConsoleConfig;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the bearer token.
    #[error("unauthorized")]
    Unauthorized,
    #[error("request failed: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
}

/// Inventory counts shown on the dashboard (`GET {api_base}/summary`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformSummary {
    pub sources: u64,
    pub providers: u64,
    pub ignore_lists: u64,
    pub users: u64,
}

/// `Authorization` header value for `session`.
#[must_use]
pub fn authorization_header(session: &Session) -> String {
    format!("Bearer {}", session.token)
}

/// Join the configured API base with `path`.
#[must_use]
pub fn endpoint(config: &ConsoleConfig, path: &str) -> String {
    format!("{}/{}", config.api_base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn classify_status(status: u16) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        other => Err(ApiError::Status(other)),
    }
}

/// `GET {api_base}/{path}` as JSON with the session's bearer token.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure, a non-2xx status, or an
/// undecodable body.
pub async fn get_json<T: DeserializeOwned>(config: &ConsoleConfig, session: &Session, path: &str) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = endpoint(config, path);
        let resp = gloo_net::http::Request::get(&url)
            .header("Authorization", &authorization_header(session))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        classify_status(resp.status())?;
        resp.json::<T>().await.map_err(|e| ApiError::Transport(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, session, path);
        Err(ApiError::Transport("not available on server".to_owned()))
    }
}
