//! Suite Section Component
//!
//! One suite: a draggable header, its case rows and its child suites.

use leptos::prelude::*;
use leptos::task::spawn_local;

use case_tree::{CaseApi, DragItem, HoverEdge, Suite};
use leptos_dragdrop::*;

use crate::components::{CaseDnd, CaseRow, DeleteConfirmButton, DeleteTarget};
use crate::context::use_app_context;
use crate::store::{use_app_store, AddingUnder, AppStateStoreFields};

/// Band around a suite header's midpoint that means "drop inside this suite"
pub const HEADER_DEADBAND_PX: f64 = 8.0;

pub fn to_hover_edge(edge: RowEdge) -> HoverEdge {
    match edge {
        RowEdge::Upper => HoverEdge::Upper,
        RowEdge::Lower => HoverEdge::Lower,
        RowEdge::Middle => HoverEdge::None,
    }
}

#[component]
pub fn SuiteSection(suite: Suite, parent_id: Option<u32>, depth: usize, dnd: CaseDnd) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let id = suite.id;
    let name = suite.name.clone();
    let (collapsed, set_collapsed) = signal(false);

    let on_mousedown = make_on_mousedown(dnd, DragItem::Suite { suite_id: id });
    let on_header_move = make_on_row_mousemove(dnd, HEADER_DEADBAND_PX, move |edge| {
        let edge = match dnd.dragging_read.get_untracked() {
            Some(DragItem::Suite { .. }) => to_hover_edge(edge),
            // Cases dropped on a header go to the end of the suite
            _ => HoverEdge::None,
        };
        store.interaction().update(|state| state.hover_suite(id, edge));
    });
    let on_empty_move = make_on_row_mousemove(dnd, ROW_DEADBAND_PX, move |_| {
        store.interaction().update(|state| state.hover_suite(id, HoverEdge::None));
    });

    let header_class = move || {
        let mut c = String::from("suite-header");
        if matches!(dnd.dragging(), Some(DragItem::Suite { suite_id }) if suite_id == id) {
            c.push_str(" dragging");
        }
        let state = store.interaction().get();
        if state.hover_target == Some(id) && state.hover_index.is_none() && dnd.is_dragging() {
            c.push_str(match state.hover_edge {
                HoverEdge::Upper => " insert-above",
                HoverEdge::Lower => " insert-below",
                HoverEdge::None => " drop-target",
            });
        }
        c
    };

    let delete_suite = Callback::new(move |target: DeleteTarget| {
        let DeleteTarget::Suite { id, .. } = target else { return };
        let Some(api) = ctx.api() else { return };
        spawn_local(async move {
            match api.delete_suite(id).await {
                Ok(()) => {
                    ctx.notify("Suite deleted");
                    ctx.reload();
                }
                Err(err) => ctx.report(&err),
            }
        });
    });

    let delete_target = DeleteTarget::Suite { id, case_count: suite.cases.len() };
    let cases = suite.cases.clone();
    let has_cases = !cases.is_empty();
    let children = suite.children.clone();
    let indent = depth * 16;

    view! {
        <section class="suite-section" id=format!("suite-{}", id)>
            <div
                class=header_class
                style=format!("padding-left: {}px;", indent)
                on:mousedown=on_mousedown
                on:mousemove=on_header_move
            >
                <button class="collapse-btn" on:click=move |_| set_collapsed.update(|c| *c = !*c)>
                    {move || if collapsed.get() { "▶" } else { "▼" }}
                </button>
                <span class="suite-name">{name}</span>
                <button
                    class="add-case-btn"
                    title="Add case"
                    on:click=move |_| store.adding_under().set(AddingUnder::Case(id))
                >
                    "+ Case"
                </button>
                <button
                    class="add-suite-btn"
                    title="Add suite"
                    on:click=move |_| store.adding_under().set(AddingUnder::Suite(Some(id)))
                >
                    "+ Suite"
                </button>
                <DeleteConfirmButton target=delete_target on_confirm=delete_suite />
            </div>

            <Show when=move || !collapsed.get()>
                <div class="suite-body" data-parent=parent_id.map(|p| p.to_string())>
                    {if has_cases {
                        cases
                            .clone()
                            .into_iter()
                            .enumerate()
                            .map(|(index, case)| view! {
                                <CaseRow case=case suite_id=id index=index depth=depth dnd=dnd />
                            })
                            .collect_view()
                            .into_any()
                    } else {
                        view! {
                            <div
                                class=move || {
                                    let state = store.interaction().get();
                                    if dnd.is_dragging() && state.hover_target == Some(id) && state.hover_index.is_none() {
                                        "suite-empty drop-target"
                                    } else {
                                        "suite-empty"
                                    }
                                }
                                style=format!("margin-left: {}px;", indent + 24)
                                on:mousemove=on_empty_move.clone()
                            >
                                "No cases"
                            </div>
                        }
                        .into_any()
                    }}
                    {children
                        .clone()
                        .into_iter()
                        .map(|child| view! {
                            <SuiteSection suite=child parent_id=Some(id) depth=depth + 1 dnd=dnd />
                        }
                        .into_any())
                        .collect_view()}
                </div>
            </Show>
        </section>
    }
}
