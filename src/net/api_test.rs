use std::collections::BTreeSet;

use super::*;

fn session(token: &str) -> Session {
    Session {
        user_id: "1".to_owned(),
        email: "a@x.com".to_owned(),
        name: "Ada Lovelace".to_owned(),
        given_name: None,
        family_name: None,
        roles: BTreeSet::new(),
        token: token.to_owned(),
        initials: "AL".to_owned(),
    }
}

#[test]
fn authorization_header_forwards_token_verbatim() {
    assert_eq!(authorization_header(&session("a.b.c")), "Bearer a.b.c");
}

#[test]
fn endpoint_joins_without_double_slashes() {
    let config = ConsoleConfig::default();
    assert_eq!(endpoint(&config, "/sources"), "/api/sources");
    assert_eq!(endpoint(&config, "providers/3"), "/api/providers/3");

    let remote = ConsoleConfig { api_base: "https://intel.example.org/api/".to_owned(), ..ConsoleConfig::default() };
    assert_eq!(endpoint(&remote, "/users"), "https://intel.example.org/api/users");
}

#[test]
fn classify_status_maps_unauthorized() {
    assert_eq!(classify_status(204), Ok(()));
    assert_eq!(classify_status(401), Err(ApiError::Unauthorized));
    assert_eq!(classify_status(503), Err(ApiError::Status(503)));
}

#[test]
fn platform_summary_tolerates_missing_counts() {
    let summary: PlatformSummary = serde_json::from_str(r#"{"sources":12,"ignoreLists":3}"#).unwrap();
    assert_eq!(summary, PlatformSummary { sources: 12, ignore_lists: 3, ..PlatformSummary::default() });
}
