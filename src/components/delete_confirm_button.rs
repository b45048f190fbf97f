//! Delete Confirm Button Component
//!
//! Inline two-step delete for a suite or a case. The prompt names the entry
//! and, for suites, how many cases go with it.

use leptos::prelude::*;

/// Entry a delete button removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    /// Suite with the number of cases it directly holds
    Suite { id: u32, case_count: usize },
    Case { id: u32 },
}

impl DeleteTarget {
    /// Tooltip of the initial button
    pub fn title(&self) -> &'static str {
        match self {
            DeleteTarget::Suite { .. } => "Delete suite",
            DeleteTarget::Case { .. } => "Delete case",
        }
    }

    /// Question shown while waiting for confirmation
    pub fn prompt(&self) -> String {
        match *self {
            DeleteTarget::Suite { id, case_count: 0 } => format!("Delete suite #{}?", id),
            DeleteTarget::Suite { id, case_count: 1 } => format!("Delete suite #{} and its case?", id),
            DeleteTarget::Suite { id, case_count } => {
                format!("Delete suite #{} and its {} cases?", id, case_count)
            }
            DeleteTarget::Case { id } => format!("Delete case #{}?", id),
        }
    }
}

#[component]
pub fn DeleteConfirmButton(target: DeleteTarget, #[prop(into)] on_confirm: Callback<DeleteTarget>) -> impl IntoView {
    let armed = RwSignal::new(false);

    view! {
        <Show
            when=move || armed.get()
            fallback=move || view! {
                <button
                    class="delete-btn"
                    title=target.title()
                    on:mousedown=|ev| ev.stop_propagation()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(true);
                    }
                >
                    "×"
                </button>
            }
        >
            <span class="delete-confirm" on:mousedown=|ev| ev.stop_propagation()>
                <span class="delete-confirm-text">{target.prompt()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                        on_confirm.run(target);
                    }
                >
                    "Delete"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                    }
                >
                    "Keep"
                </button>
            </span>
        </Show>
    }
}
