//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use case_tree::{ApiError, ClientConfig, HttpCaseApi};

use crate::config;
use crate::toast::{Toast, Toasts};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload the tree from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload the tree from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Backend settings; `None` when the page could not be configured
    client_config: RwSignal<Option<ClientConfig>>,
    /// Project code from the page path
    project_code: StoredValue<Option<String>>,
    pub toasts: Toasts,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        client_config: Option<ClientConfig>,
        project_code: Option<String>,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            client_config: RwSignal::new(client_config),
            project_code: StoredValue::new(project_code),
            toasts: Toasts::default(),
        }
    }

    /// Trigger a reload of the tree
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn project_code(&self) -> Option<String> {
        self.project_code.get_value()
    }

    /// Fresh client for one request
    pub fn api(&self) -> Option<HttpCaseApi> {
        self.client_config.get_untracked().map(HttpCaseApi::new)
    }

    pub fn is_signed_in(&self) -> bool {
        self.client_config
            .with(|c| c.as_ref().is_some_and(|c| c.token.is_some()))
    }

    pub fn notify(&self, title: impl Into<String>) {
        self.toasts.push(Toast::success(title));
    }

    /// Report a failed backend call; a 401 also ends the session
    pub fn report(&self, err: &ApiError) {
        let _ = rolling_logger::warn(&format!("backend call failed: {}", err));
        if err.is_unauthorized() {
            config::clear_token();
            self.client_config.update(|c| {
                if let Some(c) = c {
                    c.token = None;
                }
            });
        }
        self.toasts.push(Toast::error(err));
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
