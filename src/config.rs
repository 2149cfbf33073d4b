//! Console configuration resolved at build time.
//!
//! The WASM bundle has no process environment, so values are baked in with
//! `option_env!` when the crate is compiled. Parsing goes through
//! [`ConsoleConfig::from_lookup`] so any key source can feed it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";
pub const DEFAULT_ROOT_PATH: &str = "/";
pub const DEFAULT_CALLBACK_PATH: &str = "/auth/callback";
pub const DEFAULT_BACKEND_LOGIN_URL: &str = "/api/auth/login";
pub const DEFAULT_STORAGE_PREFIX: &str = "intel_console";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an absolute path, got `{value}`")]
    InvalidPath { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Route locations the session guard redirects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPaths {
    /// Login entry point; unauthenticated visitors land here with `next`.
    pub login_path: String,
    /// Application root; role failures land here.
    pub root_path: String,
    /// Where the backend login flow returns with `token` or `disabled`.
    pub callback_path: String,
}

impl Default for AuthPaths {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            root_path: DEFAULT_ROOT_PATH.to_owned(),
            callback_path: DEFAULT_CALLBACK_PATH.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// REST API base, without trailing slash.
    pub api_base: String,
    /// Backend endpoint that starts the identity-provider login flow.
    pub backend_login_url: String,
    pub paths: AuthPaths,
    /// Prefix for every localStorage key the console owns.
    pub storage_prefix: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            backend_login_url: DEFAULT_BACKEND_LOGIN_URL.to_owned(),
            paths: AuthPaths::default(),
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_owned(),
        }
    }
}

impl ConsoleConfig {
    /// Build config from a key lookup.
    ///
    /// Optional keys (defaults in parentheses):
    /// - `CONSOLE_API_BASE` (`/api`)
    /// - `CONSOLE_BACKEND_LOGIN_URL` (`/api/auth/login`)
    /// - `CONSOLE_LOGIN_PATH` (`/auth/login`)
    /// - `CONSOLE_ROOT_PATH` (`/`)
    /// - `CONSOLE_CALLBACK_PATH` (`/auth/callback`)
    /// - `CONSOLE_STORAGE_PREFIX` (`intel_console`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a route path is not absolute or a value is
    /// blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |var: &'static str, default: &str| -> Result<String, ConfigError> {
            let raw = lookup(var).unwrap_or_else(|| default.to_owned());
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Empty { var });
            }
            Ok(trimmed.to_owned())
        };

        let api_base = value("CONSOLE_API_BASE", DEFAULT_API_BASE)?;
        let api_base = match api_base.trim_end_matches('/') {
            "" => "/".to_owned(),
            trimmed => trimmed.to_owned(),
        };
        let backend_login_url = value("CONSOLE_BACKEND_LOGIN_URL", DEFAULT_BACKEND_LOGIN_URL)?;
        let login_path = absolute_path("CONSOLE_LOGIN_PATH", value("CONSOLE_LOGIN_PATH", DEFAULT_LOGIN_PATH)?)?;
        let root_path = absolute_path("CONSOLE_ROOT_PATH", value("CONSOLE_ROOT_PATH", DEFAULT_ROOT_PATH)?)?;
        let callback_path =
            absolute_path("CONSOLE_CALLBACK_PATH", value("CONSOLE_CALLBACK_PATH", DEFAULT_CALLBACK_PATH)?)?;
        let storage_prefix = value("CONSOLE_STORAGE_PREFIX", DEFAULT_STORAGE_PREFIX)?;

        Ok(Self {
            api_base,
            backend_login_url,
            paths: AuthPaths { login_path, root_path, callback_path },
            storage_prefix,
        })
    }

    /// Build config from values captured when the bundle was compiled.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_lookup`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| {
            let value = match var {
                "CONSOLE_API_BASE" => option_env!("CONSOLE_API_BASE"),
                "CONSOLE_BACKEND_LOGIN_URL" => option_env!("CONSOLE_BACKEND_LOGIN_URL"),
                "CONSOLE_LOGIN_PATH" => option_env!("CONSOLE_LOGIN_PATH"),
                "CONSOLE_ROOT_PATH" => option_env!("CONSOLE_ROOT_PATH"),
                "CONSOLE_CALLBACK_PATH" => option_env!("CONSOLE_CALLBACK_PATH"),
                "CONSOLE_STORAGE_PREFIX" => option_env!("CONSOLE_STORAGE_PREFIX"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    #[must_use]
    pub fn session_key(&self) -> String {
        format!("{}_session", self.storage_prefix)
    }

    #[must_use]
    pub fn theme_key(&self) -> String {
        format!("{}_theme", self.storage_prefix)
    }

    #[must_use]
    pub fn language_key(&self) -> String {
        format!("{}_language", self.storage_prefix)
    }
}

fn absolute_path(var: &'static str, value: String) -> Result<String, ConfigError> {
    if !value.starts_with('/') || value.starts_with("//") {
        return Err(ConfigError::InvalidPath { var, value });
    }
    Ok(value)
}
