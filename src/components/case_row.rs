//! Case Row Component

use leptos::prelude::*;

use case_tree::{Case, DragItem, HoverEdge};
use leptos_dragdrop::*;

use crate::components::{to_hover_edge, CaseDnd};
use crate::store::{store_select_case, use_app_store, AppStateStoreFields};

/// A single draggable case row with its insertion-line indicator
#[component]
pub fn CaseRow(case: Case, suite_id: u32, index: usize, depth: usize, dnd: CaseDnd) -> impl IntoView {
    let store = use_app_store();
    let id = case.id;

    let on_mousedown = make_on_mousedown(dnd, DragItem::Case { case_id: id, source_suite_id: suite_id });
    let on_mousemove = make_on_row_mousemove(dnd, ROW_DEADBAND_PX, move |edge| {
        match dnd.dragging_read.get_untracked() {
            Some(DragItem::Case { .. }) => store
                .interaction()
                .update(|state| state.hover_case_row(suite_id, index, to_hover_edge(edge))),
            // Suites hovering a case row target the row's suite
            Some(DragItem::Suite { .. }) => store
                .interaction()
                .update(|state| state.hover_suite(suite_id, HoverEdge::None)),
            None => {}
        }
    });

    let row_class = move || {
        let mut c = String::from("case-row");
        if store.selected_case().get() == Some(id) {
            c.push_str(" selected");
        }
        if matches!(dnd.dragging(), Some(DragItem::Case { case_id, .. }) if case_id == id) {
            c.push_str(" dragging");
        }
        if dnd.is_dragging() {
            match store.interaction().with(|s| s.insertion_edge(suite_id, index)) {
                Some(HoverEdge::Upper) => c.push_str(" insert-above"),
                Some(HoverEdge::Lower) => c.push_str(" insert-below"),
                _ => {}
            }
        }
        c
    };

    let milestone = case.milestone.as_ref().map(|m| m.title.clone());

    view! {
        <div
            class=row_class
            style=format!("margin-left: {}px;", depth * 16 + 24)
            on:mousedown=on_mousedown
            on:mousemove=on_mousemove
            on:click=move |_| {
                if !dnd.drag_just_ended_read.get_untracked() {
                    store_select_case(&store, Some(id));
                }
            }
        >
            <span class="case-id">{format!("#{}", id)}</span>
            <span class="case-title">{case.title}</span>
            {milestone.map(|title| view! { <span class="case-milestone">{title}</span> })}
        </div>
    }
}
