//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` opens the persisted cells once and provides them as context. Every
//! location renders through `ConsoleOutlet`, which asks the session guard
//! before showing a section. The guard itself is assembled per component
//! from context because its navigator needs the router.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::NavigateOptions;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::path;

use crate::components::header::Header;
use crate::components::outlet::ConsoleOutlet;
use crate::components::toasts::ToastOverlay;
use crate::config::ConsoleConfig;
use crate::i18n::Catalog;
use crate::session::{Navigator, Redirect, SessionGuard};
use crate::state::{ConsoleState, Mounted};
use crate::state::language::apply_language;
use crate::state::theme::apply_theme;
use crate::state::toasts::{ToastNotifier, ToastState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// [`Navigator`] backed by the Leptos router. Redirects replace the current
/// history entry so tokens and denied locations do not linger in history.
pub struct RouterNavigator<F> {
    navigate: F,
}

impl<F> RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    pub fn new(navigate: F) -> Self {
        Self { navigate }
    }
}

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn navigate(&self, redirect: &Redirect) {
        (self.navigate)(&redirect.href(), NavigateOptions { replace: true, ..NavigateOptions::default() });
    }
}

/// Assemble a session guard from context. Must run inside `<Router>`.
pub fn use_session_guard() -> StoredValue<SessionGuard, LocalStorage> {
    let config = expect_context::<ConsoleConfig>();
    let state = expect_context::<ConsoleState>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let guard = SessionGuard::new(
        state.session_cell.clone(),
        config.paths.clone(),
        Rc::new(RouterNavigator::new(use_navigate())),
        Rc::new(ToastNotifier::new(toasts)),
        Rc::new(Catalog::new(state.language_cell.clone())),
    );
    StoredValue::new_local(guard)
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ConsoleConfig::from_build_env().unwrap_or_else(|e| {
        leptos::logging::error!("invalid console config, using defaults: {e}");
        ConsoleConfig::default()
    });
    let state = ConsoleState::open(&config);
    let toasts = RwSignal::new(ToastState::default());
    let mounted = Mounted::new();
    Effect::new(move || mounted.mark());

    let theme = state.theme;
    Effect::new(move || apply_theme(theme.get().unwrap_or_default()));
    let language = state.language;
    Effect::new(move || apply_language(language.get().unwrap_or_default()));

    provide_context(config);
    provide_context(state);
    provide_context(toasts);
    provide_context(mounted);

    view! {
        <Stylesheet id="leptos" href="/pkg/intel-console.css"/>
        <Title text="Intel Console"/>

        <Router>
            <Header/>
            <main class="console-main">
                <Routes fallback=|| view! { <ConsoleOutlet/> }>
                    <Route path=path!("/*any") view=ConsoleOutlet/>
                </Routes>
            </main>
            <ToastOverlay/>
        </Router>
    }
}
