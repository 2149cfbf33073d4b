//! Login page. Sign-in itself happens at the backend, which redirects back
//! to the callback route with a bearer token.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::config::ConsoleConfig;
use crate::i18n;
use crate::session::{NEXT_PARAM, Redirect};
use crate::state::ConsoleState;

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<ConsoleConfig>();
    let state = expect_context::<ConsoleState>();
    let query = use_query_map();
    let language = state.language;

    let backend_login_url = config.backend_login_url;
    let login_href = move || {
        let redirect = Redirect::to(backend_login_url.clone());
        match query.with(|q| q.get(NEXT_PARAM)) {
            Some(next) if !next.is_empty() => redirect.with_param(NEXT_PARAM, next),
            _ => redirect,
        }
        .href()
    };
    let t = move |id: &str| i18n::text(language.get().unwrap_or_default(), id);

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{move || t("login.title")}</h1>
                <a class="login-button" rel="external" href=login_href>
                    {move || t("login.button")}
                </a>
            </div>
        </div>
    }
}
