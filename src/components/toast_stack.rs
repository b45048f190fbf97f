//! Toast Stack Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::toast::ToastKind;

/// Bottom-right stack of closable toasts
#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_app_context();
    let toasts = ctx.toasts;

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.items()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.kind {
                        ToastKind::Success => "toast success",
                        ToastKind::Error => "toast error",
                    };
                    view! {
                        <div class=class role="status">
                            <div class="toast-text">
                                <strong>{toast.title}</strong>
                                {(!toast.description.is_empty()).then(|| view! { <p>{toast.description.clone()}</p> })}
                            </div>
                            <button class="close-btn" on:click=move |_| toasts.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
