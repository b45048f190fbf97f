//! New Entry Form Component
//!
//! Form for creating a suite or a case, depending on what the user picked.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use case_tree::{CaseApi, NewCase, NewSuite};

use crate::context::use_app_context;
use crate::store::{store_select_case, use_app_store, AddingUnder, AppStateStoreFields};

fn placeholder(adding: AddingUnder) -> String {
    match adding {
        AddingUnder::Nothing => String::new(),
        AddingUnder::Suite(None) => "New root suite name...".to_string(),
        AddingUnder::Suite(Some(pid)) => format!("New suite under #{}...", pid),
        AddingUnder::Case(sid) => format!("New case title in suite #{}...", sid),
    }
}

#[component]
pub fn NewEntryForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (new_text, set_new_text) = signal(String::new());

    let cancel = move || {
        set_new_text.set(String::new());
        store.adding_under().set(AddingUnder::Nothing);
    };

    let create_entry = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_text.get().trim().to_string();
        if text.is_empty() {
            return;
        }
        let adding = store.adding_under().get_untracked();
        let project_id = store.tree().with_untracked(|t| t.project_id);
        let Some(api) = ctx.api() else { return };

        spawn_local(async move {
            let result = match adding {
                AddingUnder::Nothing => return,
                AddingUnder::Suite(parent_id) => api
                    .create_suite(&NewSuite { project_id, parent_id, name: text })
                    .await
                    .map(|()| "Suite added"),
                AddingUnder::Case(test_suite_id) => api
                    .create_case(&NewCase {
                        project_id,
                        test_suite_id,
                        title: text,
                        content: String::new(),
                        created_by_id: None,
                        updated_by_id: None,
                    })
                    .await
                    .map(|case| {
                        store_select_case(&store, Some(case.id));
                        "Case added"
                    }),
            };
            match result {
                Ok(message) => {
                    cancel();
                    ctx.notify(message);
                    ctx.reload();
                }
                Err(err) => ctx.report(&err),
            }
        });
    };

    view! {
        <Show when=move || store.adding_under().get() != AddingUnder::Nothing>
            <form class="new-item-form" on:submit=create_entry>
                <div class="new-item-row">
                    <input
                        type="text"
                        placeholder=move || placeholder(store.adding_under().get())
                        prop:value=move || new_text.get()
                        on:input=move |ev| {
                            if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                                set_new_text.set(input.value());
                            }
                        }
                    />
                    <button type="submit">"Add"</button>
                    <button type="button" class="cancel-btn" on:click=move |_| cancel()>"Cancel"</button>
                </div>
            </form>
        </Show>
    }
}
