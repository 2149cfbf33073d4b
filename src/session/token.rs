//! Bearer-token claim decoding.
//!
//! The console never verifies signatures; the backend re-checks the token on
//! every API call. Decoding only extracts the identity and role claims needed
//! to render navigation, and any structural problem collapses to
//! [`DecodeError::Malformed`].

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::collections::BTreeSet;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use super::errors::DecodeError;

/// Identity and role claims carried by a console bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Claims {
    /// Subject (`sub`), the stable user id.
    pub sub: String,
    pub name: String,
    pub email: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    /// Authorization scopes; empty when the claim is absent.
    pub roles: BTreeSet<String>,
}

impl Claims {
    /// Display initials derived from the name claims.
    #[must_use]
    pub fn initials(&self) -> String {
        initials(&self.name, self.given_name.as_deref(), self.family_name.as_deref())
    }
}

#[derive(Deserialize)]
struct RawClaims {
    sub: Option<String>,
    name: Option<String>,
    email: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    roles: Option<Vec<String>>,
}

/// Decode the payload segment of a compact `header.payload.signature` token.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] unless the token has exactly three
/// base64url segments, the payload is a UTF-8 JSON object, and `sub`, `name`
/// and `email` are present and non-blank. Surrounding whitespace is not
/// stripped and makes the token malformed.
pub fn decode_token(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = segments.as_slice() else {
        return Err(DecodeError::Malformed);
    };
    if header.is_empty() || payload.is_empty() || ![header, payload, signature].iter().all(|s| is_base64url(s)) {
        return Err(DecodeError::Malformed);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| DecodeError::Malformed)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| DecodeError::Malformed)?;
    let value: serde_json::Value = serde_json::from_str(text).map_err(|_| DecodeError::Malformed)?;
    if !value.is_object() {
        return Err(DecodeError::Malformed);
    }
    let raw: RawClaims = serde_json::from_value(value).map_err(|_| DecodeError::Malformed)?;

    Ok(Claims {
        sub: required(raw.sub)?,
        name: required(raw.name)?,
        email: required(raw.email)?,
        given_name: optional(raw.given_name),
        family_name: optional(raw.family_name),
        roles: raw.roles.unwrap_or_default().into_iter().collect(),
    })
}

/// Upper-cased initials: given + family name when both are known, otherwise
/// the first letters of the first two words of `name`.
#[must_use]
pub fn initials(name: &str, given_name: Option<&str>, family_name: Option<&str>) -> String {
    let given = given_name.and_then(first_char);
    let family = family_name.and_then(first_char);
    let letters: Vec<char> = match (given, family) {
        (Some(g), Some(f)) => vec![g, f],
        _ => name.split_whitespace().take(2).filter_map(first_char).collect(),
    };
    letters.into_iter().flat_map(char::to_uppercase).collect()
}

fn first_char(s: &str) -> Option<char> {
    s.trim().chars().next()
}

fn is_base64url(segment: &str) -> bool {
    segment
        .trim_end_matches('=')
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn required(claim: Option<String>) -> Result<String, DecodeError> {
    optional(claim).ok_or(DecodeError::Malformed)
}

fn optional(claim: Option<String>) -> Option<String> {
    claim.filter(|s| !s.trim().is_empty())
}
