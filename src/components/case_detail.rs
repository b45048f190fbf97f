//! Case Detail Pane
//!
//! Rendered view of the selected case, with an inline editor for title,
//! content and milestone.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use case_tree::{CaseApi, CaseUpdate};

use crate::components::{DeleteConfirmButton, DeleteTarget};
use crate::context::use_app_context;
use crate::markdown::render_case_content;
use crate::store::{
    store_milestone_title, store_select_case, store_selected_case, use_app_store, AppStateStoreFields, AppStore,
};

fn input_value(ev: &web_sys::Event) -> Option<String> {
    let target = ev.target()?;
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(textarea) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        return Some(textarea.value());
    }
    target.dyn_ref::<web_sys::HtmlSelectElement>().map(|s| s.value())
}

/// Open the editor with a draft of the selected case.
///
/// The draft is taken once; later tree reloads leave it alone.
fn begin_edit(store: AppStore, draft: RwSignal<Option<CaseUpdate>>) {
    let seeded = store.selected_case().get_untracked().and_then(|id| {
        store
            .tree()
            .with_untracked(|tree| tree.find_case(id).map(CaseUpdate::from_case))
    });
    let open = seeded.is_some();
    draft.set(seeded);
    store.editing().set(open);
}

fn end_edit(store: AppStore, draft: RwSignal<Option<CaseUpdate>>) {
    store.editing().set(false);
    draft.set(None);
}

#[component]
pub fn CaseDetail() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let draft = RwSignal::new(None::<CaseUpdate>);
    let selected = move || store_selected_case(&store);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (Some(case_id), Some(update)) = (store.selected_case().get_untracked(), draft.get_untracked()) else {
            return;
        };
        if update.title.trim().is_empty() {
            ctx.toasts.push(crate::toast::Toast::error_message("Title is required"));
            return;
        }
        let Some(api) = ctx.api() else { return };
        spawn_local(async move {
            match api.update_case(case_id, &update).await {
                Ok(case) => {
                    log::info!("case {} updated", case.id);
                    end_edit(store, draft);
                    ctx.notify("Case updated");
                    ctx.reload();
                }
                Err(err) => ctx.report(&err),
            }
        });
    };

    let delete_case = Callback::new(move |target: DeleteTarget| {
        let (DeleteTarget::Case { id: case_id }, Some(api)) = (target, ctx.api()) else {
            return;
        };
        spawn_local(async move {
            match api.delete_case(case_id).await {
                Ok(()) => {
                    store_select_case(&store, None);
                    ctx.notify("Case deleted");
                    ctx.reload();
                }
                Err(err) => ctx.report(&err),
            }
        });
    });

    let edit_draft = move |f: &dyn Fn(&mut CaseUpdate)| draft.update(|d| if let Some(d) = d { f(d) });

    view! {
        <aside class="case-detail">
            {move || match selected() {
                None => view! { <p class="case-detail-empty">"Select a case"</p> }.into_any(),
                Some(case) if !store.editing().get() => {
                    let delete_target = DeleteTarget::Case { id: case.id };
                    let milestone = case
                        .milestone_id()
                        .and_then(|id| store_milestone_title(&store, id).or_else(|| case.milestone.as_ref().map(|m| m.title.clone())));
                    view! {
                        <div class="case-detail-header">
                            <h2>{case.title.clone()}</h2>
                            <button class="edit-btn" on:click=move |_| begin_edit(store, draft)>"Edit"</button>
                            <DeleteConfirmButton target=delete_target on_confirm=delete_case />
                        </div>
                        <div class="case-meta">
                            <span>"Milestone: " {milestone.unwrap_or_else(|| "None".to_string())}</span>
                            {case.updated_by.as_ref().map(|u| view! { <span>" · Updated by " {u.name.clone()}</span> })}
                        </div>
                        <div class="case-content markdown-body" inner_html=render_case_content(&case.content)></div>
                    }
                    .into_any()
                }
                Some(_) => view! {
                    <form class="case-edit-form" on:submit=save>
                        <input
                            type="text"
                            placeholder="Title"
                            prop:value=move || draft.with(|d| d.as_ref().map(|d| d.title.clone()).unwrap_or_default())
                            on:input=move |ev| {
                                if let Some(v) = input_value(&ev) {
                                    edit_draft(&|d| d.title = v.clone());
                                }
                            }
                        />
                        <select
                            prop:value=move || draft.with(|d| {
                                d.as_ref().and_then(|d| d.milestone_id).map(|id| id.to_string()).unwrap_or_default()
                            })
                            on:change=move |ev| {
                                if let Some(v) = input_value(&ev) {
                                    edit_draft(&|d| d.milestone_id = v.parse().ok());
                                }
                            }
                        >
                            <option value="">"No milestone"</option>
                            {move || store.milestones().get().into_iter().map(|m| view! {
                                <option value=m.id.to_string()>{m.title}</option>
                            }).collect_view()}
                        </select>
                        <textarea
                            class="case-content-editor"
                            placeholder="Steps and expected results (Markdown)"
                            prop:value=move || draft.with(|d| d.as_ref().map(|d| d.content.clone()).unwrap_or_default())
                            on:input=move |ev| {
                                if let Some(v) = input_value(&ev) {
                                    edit_draft(&|d| d.content = v.clone());
                                }
                            }
                        ></textarea>
                        <div class="case-edit-actions">
                            <button type="submit">"Save"</button>
                            <button type="button" class="cancel-btn" on:click=move |_| end_edit(store, draft)>
                                "Cancel"
                            </button>
                        </div>
                    </form>
                }
                .into_any(),
            }}
        </aside>
    }
}
