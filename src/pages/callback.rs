//! Login callback page. The backend lands here with `token` (or `disabled`)
//! and an optional `next`; the session guard turns those into a session.

use leptos::logging::error;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::app::use_session_guard;
use crate::config::ConsoleConfig;
use crate::i18n;
use crate::session::{LoginOutcome, LoginParams, NEXT_PARAM};
use crate::state::ConsoleState;

const QUERY_KEYS: [&str; 3] = ["token", "disabled", NEXT_PARAM];

#[component]
pub fn LoginCallbackPage() -> impl IntoView {
    let state = expect_context::<ConsoleState>();
    let config = expect_context::<ConsoleConfig>();
    let guard = use_session_guard();
    let query = use_query_map();
    let language = state.language;

    let failed = RwSignal::new(false);
    let completed = StoredValue::new(false);

    // Runs once per mount; the token must not be replayed on later renders.
    Effect::new(move || {
        if completed.get_value() {
            return;
        }
        completed.set_value(true);

        let pairs: Vec<(&str, String)> = query.with_untracked(|q| {
            QUERY_KEYS.into_iter().filter_map(|key| q.get(key).map(|value| (key, value))).collect()
        });
        let params = LoginParams::from_query(pairs.iter().map(|(k, v)| (*k, v.as_str())));

        match guard.with_value(|g| g.complete_login(&params)) {
            Ok(LoginOutcome::SignedIn { .. }) => {}
            Ok(LoginOutcome::Failed(_)) => failed.set(true),
            Err(e) => {
                error!("session could not be stored: {e}");
                failed.set(true);
            }
        }
    });

    let login_path = config.paths.login_path;
    let t = move |id: &str| i18n::text(language.get().unwrap_or_default(), id);

    view! {
        <div class="login-page">
            <div class="login-card">
                <Show
                    when=move || failed.get()
                    fallback=move || view! { <p class="login-message">{move || t("login.completing")}</p> }
                >
                    <a class="login-button" href=login_path.clone()>
                        {move || t("login.retry")}
                    </a>
                </Show>
            </div>
        </div>
    }
}
