use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;

use super::*;

fn token_with(payload: &serde_json::Value) -> String {
    format!("e30.{}.sig", URL_SAFE_NO_PAD.encode(payload.to_string()))
}

#[test]
fn from_token_keeps_raw_token_and_roles() {
    let token = token_with(&json!({"sub": "1", "name": "Ada Lovelace", "email": "a@x.com", "roles": ["admin"]}));
    let session = Session::from_token(&token).unwrap();
    assert_eq!(session.user_id, "1");
    assert_eq!(session.token, token);
    assert_eq!(session.roles, BTreeSet::from(["admin".to_owned()]));
    assert_eq!(session.initials, "AL");
    assert!(session.given_name.is_none());
}

#[test]
fn from_token_rejects_partial_claims() {
    let token = token_with(&json!({"sub": "1", "email": "a@x.com"}));
    assert_eq!(Session::from_token(&token), Err(DecodeError::Malformed));
}

#[test]
fn serializes_to_stored_record_shape() {
    let token = token_with(&json!({"sub": "7", "name": "Ada Lovelace", "email": "a@x.com", "roles": ["viewer", "admin"]}));
    let session = Session::from_token(&token).unwrap();
    let value = serde_json::to_value(&session).unwrap();
    assert_eq!(
        value,
        json!({
            "userId": "7",
            "email": "a@x.com",
            "name": "Ada Lovelace",
            "givenName": null,
            "familyName": null,
            "roles": ["admin", "viewer"],
            "token": token,
            "initials": "AL",
        })
    );
}

#[test]
fn deserializes_record_without_optional_fields() {
    let raw = r#"{"userId":"1","email":"a@x.com","name":"A","token":"t","initials":"A"}"#;
    let session: Session = serde_json::from_str(raw).unwrap();
    assert!(session.roles.is_empty());
    assert!(session.family_name.is_none());
}

#[test]
fn missing_roles_preserves_requirement_order() {
    let token = token_with(&json!({"sub": "1", "name": "A", "email": "a@x.com", "roles": ["viewer"]}));
    let session = Session::from_token(&token).unwrap();
    let required = vec!["secrets".to_owned(), "viewer".to_owned(), "admin".to_owned()];
    assert_eq!(session.missing_roles(&required), vec!["secrets", "admin"]);
    assert!(session.missing_roles(&[]).is_empty());
}
