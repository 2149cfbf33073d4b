//! Guarded outlet: resolves the location to a section and renders it only
//! after the session guard allows it.
//!
//! DESIGN
//! ======
//! The check re-runs whenever the location or the stored session changes,
//! so signing out on any page falls through to the login redirect without
//! the page having to navigate itself.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::app::use_session_guard;
use crate::config::ConsoleConfig;
use crate::pages::callback::LoginCallbackPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::section::{NotFoundPage, SectionPage};
use crate::routes::Section;
use crate::session::NavigationCause;
use crate::state::ConsoleState;

#[component]
pub fn ConsoleOutlet() -> impl IntoView {
    let config = expect_context::<ConsoleConfig>();
    let state = expect_context::<ConsoleState>();
    let guard = use_session_guard();
    let location = use_location();

    let paths = config.paths;
    let section = Memo::new(move |_| Section::resolve(&paths, &location.pathname.get()));
    let allowed = RwSignal::new(false);
    let session = state.session;

    Effect::new(move || {
        session.track();
        let section = section.get();
        let pathname = location.pathname.get();
        let search = location.search.get();
        let search = search.trim_start_matches('?');
        let current = if search.is_empty() { pathname } else { format!("{pathname}?{search}") };
        let decision =
            guard.with_value(|g| g.authorize(&section.requirement(), &current, NavigationCause::Navigation));
        allowed.set(decision.is_allow());
    });

    view! {
        <Show when=move || allowed.get()>
            {move || render_section(section.get())}
        </Show>
    }
}

fn render_section(section: Section) -> AnyView {
    match section {
        Section::Dashboard => view! { <DashboardPage/> }.into_any(),
        Section::Login => view! { <LoginPage/> }.into_any(),
        Section::LoginCallback => view! { <LoginCallbackPage/> }.into_any(),
        Section::NotFound => view! { <NotFoundPage/> }.into_any(),
        other => view! { <SectionPage section=other/> }.into_any(),
    }
}
