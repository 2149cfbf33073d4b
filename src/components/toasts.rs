//! Toast overlay for guard and shell notifications.

use leptos::prelude::*;

use crate::session::NotificationKind;
use crate::state::toasts::{Toast, ToastState};

#[component]
pub fn ToastOverlay() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" role="status">
            <For
                each=move || toasts.get().toasts
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let class = match toast.notification.kind {
                        NotificationKind::Info => "toast toast--info",
                        NotificationKind::Error => "toast toast--error",
                    };
                    let description = toast.notification.description;
                    let has_description = !description.is_empty();
                    view! {
                        <div class=class>
                            <strong class="toast__title">{toast.notification.title}</strong>
                            <Show when=move || has_description>
                                <p class="toast__description">{description.clone()}</p>
                            </Show>
                            <button
                                class="toast__dismiss"
                                aria-label="Dismiss"
                                on:click=move |_| {
                                    toasts.update(|s| {
                                        s.dismiss(id);
                                    });
                                }
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
