//! UI Components
//!
//! Leptos components of the case-list screen.

mod case_detail;
mod case_list_view;
mod case_row;
mod delete_confirm_button;
mod folder_sidebar;
mod new_entry_form;
mod suite_section;
mod toast_stack;

pub use case_detail::CaseDetail;
pub use case_list_view::{CaseDnd, CaseListView};
pub use case_row::CaseRow;
pub use delete_confirm_button::{DeleteConfirmButton, DeleteTarget};
pub use folder_sidebar::FolderSidebar;
pub use new_entry_form::NewEntryForm;
pub use suite_section::{to_hover_edge, SuiteSection};
pub use toast_stack::ToastStack;
