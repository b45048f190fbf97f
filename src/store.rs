//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use case_tree::{Case, CaseTree, InteractionState, Milestone};

/// Where the new-entry form adds to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddingUnder {
    #[default]
    Nothing,
    /// New suite under a parent (`None` = root)
    Suite(Option<u32>),
    /// New case in a suite
    Case(u32),
}

/// Case-list screen state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Last tree fetched from the backend
    pub tree: CaseTree,
    pub milestones: Vec<Milestone>,
    pub selected_case: Option<u32>,
    /// Case detail pane shows the editor instead of the rendered view
    pub editing: bool,
    pub adding_under: AddingUnder,
    /// Hover bookkeeping of the current drag gesture
    pub interaction: InteractionState,
    /// First load finished
    pub loaded: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the tree with a backend snapshot, dropping a selection that no longer exists
pub fn store_replace_tree(store: &AppStore, tree: CaseTree) {
    let selected = store.selected_case().get_untracked();
    if let Some(id) = selected {
        if tree.find_case(id).is_none() {
            store.selected_case().set(None);
            store.editing().set(false);
        }
    }
    store.tree().set(tree);
}

/// Change the selected case; switching to another case closes the editor
pub fn store_select_case(store: &AppStore, case_id: Option<u32>) {
    if store.selected_case().get_untracked() != case_id {
        store.editing().set(false);
        store.selected_case().set(case_id);
    }
}

/// Currently selected case, looked up in the tree
pub fn store_selected_case(store: &AppStore) -> Option<Case> {
    let id = store.selected_case().get()?;
    store.tree().with(|tree| tree.find_case(id).cloned())
}

/// Title of a milestone by id
pub fn store_milestone_title(store: &AppStore, milestone_id: u32) -> Option<String> {
    store
        .milestones()
        .with(|ms| ms.iter().find(|m| m.id == milestone_id).map(|m| m.title.clone()))
}
