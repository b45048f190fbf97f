//! Caseboard Frontend App
//!
//! Case-list screen with three-pane layout.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use case_tree::{CaseApi, DragItem};
use leptos_dragdrop::create_dnd_signals;

use crate::components::{CaseDetail, CaseListView, FolderSidebar, NewEntryForm, ToastStack};
use crate::config;
use crate::context::AppContext;
use crate::store::{store_replace_tree, AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let client_config = match config::load_client_config() {
        Ok(config) => Some(config),
        Err(e) => {
            let _ = rolling_logger::error(&format!("backend is not configured: {}", e));
            None
        }
    };
    let project_code = config::current_project_code();

    let ctx = AppContext::new((reload_trigger, set_reload_trigger), client_config, project_code.clone());
    let store = Store::new(AppState::default());
    provide_context(ctx);
    provide_context(store);

    // Load tree and milestones on mount and whenever a reload is requested
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let (Some(api), Some(code)) = (ctx.api(), ctx.project_code()) else {
            return;
        };
        web_sys::console::log_1(&format!("[APP] Loading cases for {}, trigger={}", code, trigger).into());
        spawn_local(async move {
            match api.fetch_tree(&code).await {
                Ok(tree) => {
                    web_sys::console::log_1(&format!("[APP] Loaded {} cases", tree.case_count()).into());
                    store_replace_tree(&store, tree);
                }
                Err(err) => ctx.report(&err),
            }
            store.loaded().set(true);

            match api.fetch_milestones(&code).await {
                Ok(milestones) => store.milestones().set(milestones),
                Err(err) => log::warn!("milestones unavailable: {}", err),
            }
        });
    });

    let dnd = create_dnd_signals::<DragItem>();

    view! {
        <div class="app-layout">
            {match project_code {
                None => view! {
                    <main class="main-content">
                        <h1>"Caseboard"</h1>
                        <p class="notice">"Open a project at /projects/{code}/cases."</p>
                    </main>
                }
                .into_any(),
                Some(code) => view! {
                    // Left: suite folders
                    <FolderSidebar dnd=dnd />

                    // Center: suite/case tree
                    <main class="main-content">
                        <h1>{format!("Test cases · {}", code)}</h1>
                        <Show when=move || !ctx.is_signed_in()>
                            <p class="notice">"Not signed in: changes will be rejected."</p>
                        </Show>
                        <NewEntryForm />
                        <CaseListView dnd=dnd />
                    </main>

                    // Right: selected case
                    <CaseDetail />
                }
                .into_any(),
            }}
            <ToastStack />
        </div>
    }
}
