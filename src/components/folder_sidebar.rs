use leptos::prelude::*;

use case_tree::{flatten_folders, HoverEdge};
use leptos_dragdrop::*;

use crate::components::CaseDnd;
use crate::store::{use_app_store, AddingUnder, AppStateStoreFields};

fn scroll_to_suite(suite_id: u32) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&format!("suite-{}", suite_id)));
    if let Some(element) = element {
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        options.set_block(web_sys::ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

#[component]
pub fn FolderSidebar(dnd: CaseDnd) -> impl IntoView {
    let store = use_app_store();

    let rows = move || store.tree().with(|tree| flatten_folders(&tree.folders));

    view! {
        <div class="folder-sidebar">
            <div class="sidebar-header">
                <h3>"Suites"</h3>
                <button
                    class="add-folder-btn"
                    title="Add root suite"
                    on:click=move |_| store.adding_under().set(AddingUnder::Suite(None))
                >
                    "+"
                </button>
            </div>

            <ul
                class="folder-list"
                on:mouseleave=move |_| {
                    if dnd.is_dragging() {
                        store.interaction().update(|state| state.clear());
                    }
                }
            >
                <For
                    each=rows
                    key=|row| (row.key, row.depth, row.title.clone())
                    children=move |row| {
                        let key = row.key;
                        // Any drop on a folder means "into this suite"
                        let on_mousemove = make_on_row_mousemove(dnd, ROW_DEADBAND_PX, move |_| {
                            store.interaction().update(|state| state.hover_suite(key, HoverEdge::None));
                        });
                        let is_target = move || {
                            dnd.is_dragging()
                                && store.interaction().with(|s| s.hover_target == Some(key) && s.hover_index.is_none())
                        };

                        view! {
                            <li
                                class=move || if is_target() { "folder-item drop-target" } else { "folder-item" }
                                style=format!("padding-left: {}px;", row.depth * 12 + 8)
                                on:mousemove=on_mousemove
                                on:click=move |_| {
                                    web_sys::console::log_1(&format!("[FolderSidebar] Clicked: {}", key).into());
                                    scroll_to_suite(key);
                                }
                            >
                                <span class="folder-icon">{if row.has_children { "📂" } else { "📁" }}</span>
                                <span class="folder-name">{row.title}</span>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
