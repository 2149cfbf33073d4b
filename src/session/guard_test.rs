use std::cell::RefCell;
use std::rc::Rc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;

use super::*;
use crate::session::store::MemoryStore;

const SESSION_KEY: &str = "intel_console_session";

#[derive(Default)]
struct Recorder {
    redirects: RefCell<Vec<Redirect>>,
    notifications: RefCell<Vec<Notification>>,
}

impl Navigator for Recorder {
    fn navigate(&self, redirect: &Redirect) {
        self.redirects.borrow_mut().push(redirect.clone());
    }
}

impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }
}

struct EchoTranslator;

impl Translator for EchoTranslator {
    fn translate(&self, message_id: &str) -> String {
        format!("<{message_id}>")
    }
}

struct Harness {
    guard: SessionGuard,
    store: MemoryStore,
    recorder: Rc<Recorder>,
}

fn harness_with_store(store: MemoryStore) -> Harness {
    let recorder = Rc::new(Recorder::default());
    let cell = PersistedCell::new(SESSION_KEY, None, store.clone());
    let guard = SessionGuard::new(
        cell,
        AuthPaths::default(),
        recorder.clone(),
        recorder.clone(),
        Rc::new(EchoTranslator),
    );
    Harness { guard, store, recorder }
}

fn harness() -> Harness {
    harness_with_store(MemoryStore::new())
}

fn token_with(payload: &serde_json::Value) -> String {
    format!("e30.{}.c2ln", URL_SAFE_NO_PAD.encode(payload.to_string()))
}

fn token_with_roles(roles: &[&str]) -> String {
    token_with(&json!({"sub": "1", "name": "Ada Lovelace", "email": "a@x.com", "roles": roles}))
}

fn sign_in(h: &Harness, roles: &[&str]) {
    let params = LoginParams { token: Some(token_with_roles(roles)), ..LoginParams::default() };
    assert!(matches!(h.guard.complete_login(&params), Ok(LoginOutcome::SignedIn { .. })));
    h.recorder.redirects.borrow_mut().clear();
}

// =============================================================
// RouteAuthRequirement / Redirect helpers
// =============================================================

#[test]
fn roles_requirement_dedupes_in_first_seen_order() {
    let req = RouteAuthRequirement::roles(["viewer", "admin", "viewer"]);
    assert_eq!(req.required_roles(), ["viewer".to_owned(), "admin".to_owned()]);
    assert!(RouteAuthRequirement::Public.required_roles().is_empty());
    assert_eq!(RouteAuthRequirement::authenticated(), RouteAuthRequirement::Roles(vec![]));
}

#[test]
fn redirect_href_encodes_params() {
    assert_eq!(Redirect::to("/").href(), "/");
    let redirect = Redirect::to("/auth/login").with_param("next", "/users/42?tab=roles&x=1");
    assert_eq!(redirect.href(), "/auth/login?next=%2Fusers%2F42%3Ftab%3Droles%26x%3D1");
}

#[test]
fn login_params_from_query() {
    let params = LoginParams::from_query([("token", "abc"), ("next", "/sources"), ("other", "x")]);
    assert_eq!(params.token.as_deref(), Some("abc"));
    assert_eq!(params.next.as_deref(), Some("/sources"));
    assert!(!params.disabled);

    assert!(LoginParams::from_query([("disabled", "")]).disabled);
    assert!(LoginParams::from_query([("disabled", "true")]).disabled);
    assert!(!LoginParams::from_query([("disabled", "false")]).disabled);
    assert_eq!(LoginParams::from_query([("next", "")]).next, None);
}

// =============================================================
// Authorization table
// =============================================================

#[test]
fn admin_session_may_enter_admin_route() {
    let h = harness();
    sign_in(&h, &["admin"]);
    let decision = h.guard.authorize(&RouteAuthRequirement::roles(["admin"]), "/users", NavigationCause::Navigation);
    assert_eq!(decision, Decision::Allow);
    assert!(h.recorder.redirects.borrow().is_empty());
    assert!(h.recorder.notifications.borrow().is_empty());
}

#[test]
fn unprivileged_session_is_sent_to_root_with_one_notification() {
    let h = harness();
    sign_in(&h, &[]);
    let decision = h.guard.authorize(&RouteAuthRequirement::roles(["admin"]), "/users", NavigationCause::Navigation);
    assert_eq!(decision, Decision::Redirect(Redirect::to("/")));
    assert_eq!(*h.recorder.redirects.borrow(), vec![Redirect::to("/")]);

    let notifications = h.recorder.notifications.borrow();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert_eq!(notifications[0].title, "<roles.missing>");
    assert_eq!(notifications[0].description, "admin");
}

#[test]
fn notification_names_every_missing_role() {
    let h = harness();
    sign_in(&h, &["viewer"]);
    h.guard
        .authorize(&RouteAuthRequirement::roles(["admin", "viewer", "secrets"]), "/secrets", NavigationCause::Navigation);
    assert_eq!(h.recorder.notifications.borrow()[0].description, "admin, secrets");
}

#[test]
fn anonymous_visitor_is_sent_to_login_with_next() {
    let h = harness();
    let decision = h.guard.authorize(&RouteAuthRequirement::roles(["admin"]), "/users/42", NavigationCause::Navigation);
    let expected = Redirect::to("/auth/login").with_param("next", "/users/42");
    assert_eq!(decision, Decision::Redirect(expected.clone()));
    assert_eq!(*h.recorder.redirects.borrow(), vec![expected]);
    assert!(h.recorder.notifications.borrow().is_empty());
}

#[test]
fn anonymous_visitor_at_root_gets_no_next_param() {
    let h = harness();
    let decision = h.guard.authorize(&RouteAuthRequirement::authenticated(), "/", NavigationCause::Navigation);
    assert_eq!(decision, Decision::Redirect(Redirect::to("/auth/login")));
}

#[test]
fn root_with_query_or_fragment_still_gets_no_next_param() {
    let h = harness();
    for path in ["/?tab=x", "/#top", "?tab=x"] {
        let decision = h.guard.authorize(&RouteAuthRequirement::authenticated(), path, NavigationCause::Prefetch);
        assert_eq!(decision, Decision::Redirect(Redirect::to("/auth/login")), "{path}");
    }
}

#[test]
fn public_route_allows_anonymous_visitor() {
    let h = harness();
    let decision = h.guard.authorize(&RouteAuthRequirement::Public, "/", NavigationCause::Navigation);
    assert_eq!(decision, Decision::Allow);
}

#[test]
fn empty_requirement_admits_any_signed_in_user() {
    let h = harness();
    sign_in(&h, &["admin", "viewer"]);
    assert!(h.guard.authorize(&RouteAuthRequirement::authenticated(), "/", NavigationCause::Navigation).is_allow());

    let h = harness();
    sign_in(&h, &[]);
    assert!(h.guard.authorize(&RouteAuthRequirement::authenticated(), "/", NavigationCause::Navigation).is_allow());
}

#[test]
fn evaluate_reports_typed_errors() {
    let h = harness();
    assert_eq!(h.guard.evaluate(&RouteAuthRequirement::authenticated()), Err(AuthzError::Unauthenticated));
    sign_in(&h, &["viewer"]);
    assert_eq!(
        h.guard.evaluate(&RouteAuthRequirement::roles(["admin"])),
        Err(AuthzError::InsufficientRole { missing: vec!["admin".to_owned()] })
    );
}

// =============================================================
// Prefetch and idempotence
// =============================================================

#[test]
fn prefetch_decides_without_side_effects() {
    let h = harness();
    sign_in(&h, &[]);
    let decision = h.guard.authorize(&RouteAuthRequirement::roles(["admin"]), "/users", NavigationCause::Prefetch);
    assert_eq!(decision, Decision::Redirect(Redirect::to("/")));
    assert!(h.recorder.redirects.borrow().is_empty());
    assert!(h.recorder.notifications.borrow().is_empty());
}

#[test]
fn repeated_checks_agree_and_notify_once_per_call() {
    let h = harness();
    sign_in(&h, &["viewer"]);
    let req = RouteAuthRequirement::roles(["admin"]);
    let first = h.guard.authorize(&req, "/tokens", NavigationCause::Navigation);
    let second = h.guard.authorize(&req, "/tokens", NavigationCause::Navigation);
    assert_eq!(first, second);
    assert_eq!(h.recorder.notifications.borrow().len(), 2);

    let allowed = RouteAuthRequirement::roles(["viewer"]);
    assert_eq!(
        h.guard.authorize(&allowed, "/sources", NavigationCause::Navigation),
        h.guard.authorize(&allowed, "/sources", NavigationCause::Navigation)
    );
}

// =============================================================
// Login completion
// =============================================================

#[test]
fn valid_token_signs_in_persists_and_navigates_to_root() {
    let h = harness();
    let token = token_with_roles(&["admin"]);
    let outcome = h
        .guard
        .complete_login(&LoginParams { token: Some(token.clone()), ..LoginParams::default() })
        .unwrap();
    assert_eq!(outcome, LoginOutcome::SignedIn { next: "/".to_owned() });
    assert_eq!(*h.recorder.redirects.borrow(), vec![Redirect::to("/")]);
    assert!(h.recorder.notifications.borrow().is_empty());

    let SessionState::Authenticated(session) = h.guard.state() else {
        panic!("expected an authenticated state");
    };
    assert_eq!(session.initials, "AL");
    assert_eq!(session.token, token);
    assert!(h.store.contains(SESSION_KEY));
}

#[test]
fn session_survives_reload() {
    let store = MemoryStore::new();
    let h = harness_with_store(store.clone());
    sign_in(&h, &["admin"]);

    let reloaded = harness_with_store(store);
    assert_eq!(reloaded.guard.session(), h.guard.session());
    assert!(
        reloaded
            .guard
            .authorize(&RouteAuthRequirement::roles(["admin"]), "/users", NavigationCause::Navigation)
            .is_allow()
    );
}

#[test]
fn login_returns_to_requested_next() {
    let h = harness();
    let params = LoginParams {
        token: Some(token_with_roles(&[])),
        next: Some("/users/42".to_owned()),
        ..LoginParams::default()
    };
    assert_eq!(h.guard.complete_login(&params).unwrap(), LoginOutcome::SignedIn { next: "/users/42".to_owned() });
    assert_eq!(*h.recorder.redirects.borrow(), vec![Redirect::to("/users/42")]);
}

#[test]
fn offsite_next_falls_back_to_root() {
    for next in ["https://evil.example", "//evil.example", "/\\evil.example", "users"] {
        let h = harness();
        let params = LoginParams {
            token: Some(token_with_roles(&[])),
            next: Some(next.to_owned()),
            ..LoginParams::default()
        };
        assert_eq!(h.guard.complete_login(&params).unwrap(), LoginOutcome::SignedIn { next: "/".to_owned() }, "{next}");
    }
}

#[test]
fn unusable_token_reports_invalid_even_when_disabled_is_set() {
    let h = harness();
    let params = LoginParams { token: Some("not-a-token".to_owned()), disabled: true, next: None };
    assert_eq!(h.guard.complete_login(&params).unwrap(), LoginOutcome::Failed(LoginFailure::TokenInvalid));
    assert_eq!(h.guard.state(), SessionState::Anonymous);
    assert!(h.recorder.redirects.borrow().is_empty());

    let notifications = h.recorder.notifications.borrow();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "<token.invalid>");
    assert_eq!(notifications[0].description, "<token.invalid.description>");
}

#[test]
fn token_missing_required_claims_is_invalid() {
    let h = harness();
    let token = token_with(&json!({"sub": "1", "email": "a@x.com"}));
    let params = LoginParams { token: Some(token), ..LoginParams::default() };
    assert_eq!(h.guard.complete_login(&params).unwrap(), LoginOutcome::Failed(LoginFailure::TokenInvalid));
    assert!(!h.store.contains(SESSION_KEY));
}

#[test]
fn empty_token_value_counts_as_sent() {
    let h = harness();
    let params = LoginParams::from_query([("token", "")]);
    assert_eq!(h.guard.complete_login(&params).unwrap(), LoginOutcome::Failed(LoginFailure::TokenInvalid));
}

#[test]
fn disabled_flag_without_token_reports_disabled() {
    let h = harness();
    let params = LoginParams { disabled: true, ..LoginParams::default() };
    assert_eq!(h.guard.complete_login(&params).unwrap(), LoginOutcome::Failed(LoginFailure::AccountDisabled));
    assert_eq!(h.recorder.notifications.borrow()[0].title, "<account.disabled>");
}

#[test]
fn no_token_and_no_flag_reports_missing() {
    let h = harness();
    assert_eq!(
        h.guard.complete_login(&LoginParams::default()).unwrap(),
        LoginOutcome::Failed(LoginFailure::TokenMissing)
    );
    assert_eq!(h.recorder.notifications.borrow().len(), 1);
    assert_eq!(h.recorder.notifications.borrow()[0].title, "<token.missing>");
}

#[test]
fn storage_failure_during_login_propagates() {
    let store = MemoryStore::new();
    store.fail_writes(Some("quota exceeded"));
    let h = harness_with_store(store);
    let params = LoginParams { token: Some(token_with_roles(&["admin"])), ..LoginParams::default() };
    let err = h.guard.complete_login(&params).unwrap_err();
    assert!(matches!(err, PersistenceError::WriteFailed { .. }));
    assert!(h.recorder.redirects.borrow().is_empty());
    assert_eq!(h.guard.state(), SessionState::Anonymous);
    assert!(!h.store.contains(SESSION_KEY));

    let notifications = h.recorder.notifications.borrow();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert_eq!(notifications[0].title, "<session.store_failed>");
    assert_eq!(notifications[0].description, "<session.store_failed.description>");
}

#[test]
fn token_is_stored_verbatim_and_padding_is_rejected() {
    let h = harness();
    let raw = token_with_roles(&["admin"]);
    sign_in(&h, &["admin"]);
    assert_eq!(h.guard.session().map(|s| s.token), Some(raw.clone()));

    let h = harness();
    let params = LoginParams { token: Some(format!(" {raw} ")), ..LoginParams::default() };
    assert_eq!(h.guard.complete_login(&params), Ok(LoginOutcome::Failed(LoginFailure::TokenInvalid)));
    assert_eq!(h.guard.state(), SessionState::Anonymous);
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_clears_memory_and_storage() {
    let h = harness();
    sign_in(&h, &["admin"]);
    h.guard.logout().unwrap();
    assert_eq!(h.guard.state(), SessionState::Anonymous);
    assert!(!h.store.contains(SESSION_KEY));
    assert!(matches!(
        h.guard.authorize(&RouteAuthRequirement::roles(["admin"]), "/users", NavigationCause::Navigation),
        Decision::Redirect(_)
    ));
}

#[test]
fn corrupt_stored_session_reads_as_anonymous() {
    for raw in ["undefined", "null", "{\"userId\":1}", "garbage"] {
        let h = harness_with_store(MemoryStore::with_entries([(SESSION_KEY, raw)]));
        assert_eq!(h.guard.state(), SessionState::Anonymous, "{raw}");
    }
}
