//! Case List View Component
//!
//! The suite/case tree with drag-and-drop reorder and reparent.
//! Rows only record hover state; the global mouseup turns it into one
//! backend mutation and the refetched tree replaces the displayed one.

use leptos::prelude::*;
use leptos::task::spawn_local;

use case_tree::{execute_drop, DragItem, DropOutcome, MovePlan};
use leptos_dragdrop::*;

use crate::components::SuiteSection;
use crate::context::use_app_context;
use crate::store::{store_replace_tree, use_app_store, AppStateStoreFields};

/// Drag signals shared by every row of the list
pub type CaseDnd = DndSignals<DragItem>;

fn moved_message(plan: &MovePlan) -> &'static str {
    match plan {
        MovePlan::Case(_) => "Case moved",
        MovePlan::Suite(_) => "Suite moved",
    }
}

#[component]
pub fn CaseListView(dnd: CaseDnd) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    bind_global_mouseup(dnd, move |item: DragItem| {
        // Hover state is reset on every drop, whatever happens next
        let mut taken = None;
        store.interaction().update(|state| taken = state.take_intent(item));
        let Some(intent) = taken else {
            log::debug!("drag of #{} ended outside any target", item.moving_id());
            return;
        };
        let (Some(api), Some(code)) = (ctx.api(), ctx.project_code()) else {
            return;
        };
        web_sys::console::log_1(
            &format!("[DND] drop {}", serde_json::to_string(&intent).unwrap_or_default()).into(),
        );

        spawn_local(async move {
            let snapshot = store.tree().get_untracked();
            match execute_drop(&api, &code, &snapshot, &intent).await {
                Ok(DropOutcome::Moved { plan, tree }) => {
                    store_replace_tree(&store, tree);
                    ctx.notify(moved_message(&plan));
                }
                Ok(DropOutcome::Ignored(reason)) => {
                    log::debug!("drop ignored: {:?}", reason);
                }
                Err(err) => ctx.report(&err),
            }
        });
    });

    let roots = move || store.tree().with(|tree| tree.entities.clone());

    view! {
        <div
            class=move || if dnd.dragging().is_some() { "case-list dragging" } else { "case-list" }
            on:mouseleave=move |_| {
                if dnd.is_dragging() {
                    store.interaction().update(|state| state.clear());
                }
            }
        >
            <Show
                when=move || store.loaded().get()
                fallback=|| view! { <p class="case-list-empty">"Loading..."</p> }
            >
                <Show
                    when=move || !store.tree().with(|t| t.entities.is_empty())
                    fallback=|| view! { <p class="case-list-empty">"No suites yet"</p> }
                >
                    {move || roots()
                        .into_iter()
                        .map(|suite| view! { <SuiteSection suite=suite parent_id=None depth=0 dnd=dnd /> })
                        .collect_view()}
                </Show>
            </Show>
            <p class="case-count">
                {move || store.tree().with(|t| format!("{} cases", t.case_count()))}
            </p>
        </div>
    }
}
