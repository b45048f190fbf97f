//! Toast Notifications
//!
//! Closable notices that expire on their own.

use case_tree::ApiError;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// How long a toast stays up
pub const TOAST_DURATION_MS: u32 = 5000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind: ToastKind::Success,
            title: title.into(),
            description: String::new(),
        }
    }

    pub fn error(err: &ApiError) -> Self {
        let title = if err.is_unauthorized() { "Session expired" } else { "Error occurred" };
        Self {
            id: 0,
            kind: ToastKind::Error,
            title: title.to_string(),
            description: err.to_string(),
        }
    }

    pub fn error_message(message: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind: ToastKind::Error,
            title: "Error occurred".to_string(),
            description: message.into(),
        }
    }
}

/// Visible toasts, newest last
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u32>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn items(&self) -> Vec<Toast> {
        self.items.get()
    }

    /// Show a toast and schedule its removal
    pub fn push(&self, mut toast: Toast) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        toast.id = id;
        self.items.update(|items| items.push(toast));

        let this = *self;
        Timeout::new(TOAST_DURATION_MS, move || this.dismiss(id)).forget();
    }

    pub fn dismiss(&self, id: u32) {
        self.items.update(|items| items.retain(|t| t.id != id));
    }
}
