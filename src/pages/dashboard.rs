//! Dashboard page: signed-in identity and platform inventory counts.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. The summary request forwards
//! the stored bearer token; a 401 means the backend no longer accepts it,
//! so the session is dropped and the outlet redirects to login.

use leptos::prelude::*;

use crate::net::api::{ApiError, PlatformSummary};
use crate::state::ConsoleState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = expect_context::<ConsoleState>();
    let session = state.session;
    let summary = RwSignal::new(None::<Result<PlatformSummary, ApiError>>);

    #[cfg(feature = "hydrate")]
    {
        let config = expect_context::<crate::config::ConsoleConfig>();
        let guard = crate::app::use_session_guard();
        if let Some(current) = state.session_cell.get() {
            leptos::task::spawn_local(async move {
                let result = crate::net::api::get_json::<PlatformSummary>(&config, &current, "summary").await;
                if matches!(result, Err(ApiError::Unauthorized)) {
                    leptos::logging::warn!("backend rejected the session token, signing out");
                    if let Err(e) = guard.with_value(crate::session::SessionGuard::logout) {
                        leptos::logging::error!("sign-out failed: {e}");
                    }
                }
                summary.set(Some(result));
            });
        }
    }

    let roles = move || {
        session
            .get()
            .map(|s| s.roles.into_iter().collect::<Vec<_>>().join(", "))
            .unwrap_or_default()
    };

    view! {
        <section class="console-section dashboard">
            <h1>{move || session.get().map(|s| s.name).unwrap_or_default()}</h1>
            <p class="dashboard__email">{move || session.get().map(|s| s.email).unwrap_or_default()}</p>
            <p class="dashboard__roles">{roles}</p>
            {move || match summary.get() {
                None => view! { <p class="dashboard__status">"Loading..."</p> }.into_any(),
                Some(Err(e)) => view! { <p class="dashboard__status dashboard__status--error">{e.to_string()}</p> }.into_any(),
                Some(Ok(counts)) => view! {
                    <dl class="dashboard__counts">
                        <dt>"Sources"</dt><dd>{counts.sources}</dd>
                        <dt>"Providers"</dt><dd>{counts.providers}</dd>
                        <dt>"Ignore lists"</dt><dd>{counts.ignore_lists}</dd>
                        <dt>"Users"</dt><dd>{counts.users}</dd>
                    </dl>
                }.into_any(),
            }}
        </section>
    }
}
