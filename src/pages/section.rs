//! Section landing pages for the management areas, and the not-found page.

use leptos::prelude::*;

use crate::i18n;
use crate::routes::Section;
use crate::state::ConsoleState;

#[component]
pub fn SectionPage(section: Section) -> impl IntoView {
    view! {
        <section class="console-section">
            <h1>{section.title()}</h1>
        </section>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let language = expect_context::<ConsoleState>().language;
    view! {
        <section class="console-section console-section--missing">
            <h1>{Section::NotFound.title()}</h1>
            <p>{move || i18n::text(language.get().unwrap_or_default(), "page.not_found")}</p>
        </section>
    }
}
