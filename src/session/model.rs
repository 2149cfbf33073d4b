//! The authenticated principal as persisted between reloads.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::errors::DecodeError;
use super::token::{Claims, decode_token};

/// Signed-in user. Replaced wholesale, never edited in place.
///
/// Serialized in camelCase to match the stored record shape:
/// `{"userId","email","name","givenName","familyName","roles","token","initials"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Stable identifier from the token's `sub` claim.
    pub user_id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    /// Empty means signed in but unprivileged.
    #[serde(default)]
    pub roles: BTreeSet<String>,
    /// Raw bearer token, forwarded verbatim on API calls.
    pub token: String,
    pub initials: String,
}

impl Session {
    /// Build a session from already-decoded claims and the raw token.
    #[must_use]
    pub fn from_claims(claims: Claims, token: &str) -> Self {
        let initials = claims.initials();
        Self {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
            given_name: claims.given_name,
            family_name: claims.family_name,
            roles: claims.roles,
            token: token.to_owned(),
            initials,
        }
    }

    /// Decode `token` and materialize a session from it. The session keeps
    /// `token` exactly as given.
    ///
    /// # Errors
    ///
    /// Propagates [`DecodeError::Malformed`] from [`decode_token`].
    pub fn from_token(token: &str) -> Result<Self, DecodeError> {
        decode_token(token).map(|claims| Self::from_claims(claims, token))
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Roles from `required` this session lacks, in the order given.
    #[must_use]
    pub fn missing_roles<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .map(String::as_str)
            .filter(|role| !self.has_role(role))
            .collect()
    }
}
