//! Top bar: section navigation, user initials, preferences, and sign-out.
//!
//! Navigation only lists sections the stored session may open; the outlet
//! still guards every location independently. Nothing renders before the
//! client has mounted, so SSR and hydration agree.

use leptos::logging::error;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::use_session_guard;
use crate::config::ConsoleConfig;
use crate::i18n;
use crate::routes::Section;
use crate::session::{Notification, NotificationKind, Notifier};
use crate::state::{ConsoleState, Mounted};
use crate::state::language::Language;
use crate::state::theme::Theme;
use crate::state::toasts::{ToastNotifier, ToastState};

#[component]
pub fn Header() -> impl IntoView {
    let config = expect_context::<ConsoleConfig>();
    let state = expect_context::<ConsoleState>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let mounted = expect_context::<Mounted>();
    let guard = use_session_guard();

    let session = state.session;
    let language = state.language;
    let theme = state.theme;
    let theme_cell = StoredValue::new(state.theme_cell.clone());
    let language_cell = StoredValue::new(state.language_cell.clone());
    let paths = StoredValue::new(config.paths);

    let t = move |id: &str| i18n::text(language.get().unwrap_or_default(), id);

    let visible_sections = move || {
        session.track();
        Section::NAVIGABLE
            .into_iter()
            .filter(|section| guard.with_value(|g| g.evaluate(&section.requirement()).is_ok()))
            .collect::<Vec<_>>()
    };

    let on_theme = move |_| {
        let result = theme_cell.with_value(|cell| cell.update_value(|current| Some(current.copied().unwrap_or_default().next())));
        if let Err(e) = result {
            error!("theme change not saved: {e}");
        }
    };

    let on_language = move |ev| {
        let Some(next) = Language::from_code(&event_target_value(&ev)) else {
            return;
        };
        if let Err(e) = language_cell.with_value(|cell| cell.set_value(Some(next))) {
            error!("language change not saved: {e}");
        }
    };

    let on_logout = move |_| {
        if let Err(e) = guard.with_value(crate::session::SessionGuard::logout) {
            error!("sign-out failed: {e}");
            return;
        }
        let language = language.get_untracked().unwrap_or_default();
        ToastNotifier::new(toasts).notify(Notification {
            kind: NotificationKind::Info,
            title: i18n::text(language, "session.signed_out"),
            description: i18n::text(language, "session.signed_out.description"),
        });
    };

    view! {
        <Show when=move || mounted.gate(session.get()).is_some()>
            <header class="console-header">
                <nav class="console-header__nav">
                    <For
                        each=visible_sections
                        key=|section| *section
                        children=move |section: Section| {
                            let href = paths.with_value(|p| section.href(p));
                            view! { <A href=href>{section.title()}</A> }
                        }
                    />
                </nav>
                <div class="console-header__actions">
                    <button class="console-header__theme" title=move || t("nav.theme") on:click=on_theme>
                        {move || match theme.get().unwrap_or_default() {
                            Theme::Light => "☀",
                            Theme::Dark => "☾",
                            Theme::System => "◐",
                        }}
                    </button>
                    <select class="console-header__language" on:change=on_language>
                        {Language::ALL
                            .into_iter()
                            .map(|option| {
                                view! {
                                    <option
                                        value=option.code()
                                        selected=move || language.get().unwrap_or_default() == option
                                    >
                                        {option.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <span class="console-header__initials" title=move || session.get().map(|s| s.name).unwrap_or_default()>
                        {move || session.get().map(|s| s.initials).unwrap_or_default()}
                    </span>
                    <button class="console-header__logout" on:click=on_logout>
                        {move || t("nav.logout")}
                    </button>
                </div>
            </header>
        </Show>
    }
}
