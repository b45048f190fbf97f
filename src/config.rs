//! Browser Configuration
//!
//! Backend URL, bearer token and project code for the running page.

use case_tree::{ClientConfig, ConfigError, BACKEND_URL_VAR, TOKEN_VAR};
use percent_encoding::percent_decode_str;

/// Base URL baked in at build time; relative values resolve against the page origin
const BACKEND_URL: &str = match option_env!("CASEBOARD_BACKEND_URL") {
    Some(url) => url,
    None => "/api",
};

/// localStorage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn stored_token() -> Option<String> {
    local_storage()?.get_item(TOKEN_KEY).ok().flatten()
}

/// Drop the stored token after the backend rejected it
pub fn clear_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

/// Absolute backend URL for `raw`, using `origin` for path-only values
pub fn resolve_base_url(raw: &str, origin: &str) -> String {
    if raw.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), raw)
    } else {
        raw.to_string()
    }
}

/// Project code from a page path shaped like `/projects/{code}/...`
pub fn project_code_from_path(path: &str) -> Option<String> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if segment == "projects" {
            let code = segments.next()?;
            return percent_decode_str(code)
                .decode_utf8()
                .ok()
                .map(|c| c.into_owned())
                .filter(|c| !c.is_empty());
        }
    }
    None
}

/// Client configuration for this page
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    ClientConfig::from_lookup(|key| match key {
        BACKEND_URL_VAR => Some(resolve_base_url(BACKEND_URL, &origin)),
        TOKEN_VAR => stored_token(),
        _ => None,
    })
}

/// Project code of the current page
pub fn current_project_code() -> Option<String> {
    let path = web_sys::window()?.location().pathname().ok()?;
    project_code_from_path(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_code_from_path() {
        assert_eq!(project_code_from_path("/projects/web/cases"), Some("web".to_string()));
        assert_eq!(project_code_from_path("/projects/web"), Some("web".to_string()));
        assert_eq!(project_code_from_path("/app/projects/a%20b/cases"), Some("a b".to_string()));
        assert_eq!(project_code_from_path("/projects/"), None);
        assert_eq!(project_code_from_path("/cases"), None);
    }

    #[test]
    fn test_resolve_base_url() {
        assert_eq!(resolve_base_url("/api", "http://localhost:3000"), "http://localhost:3000/api");
        assert_eq!(resolve_base_url("/api", "http://localhost:3000/"), "http://localhost:3000/api");
        assert_eq!(resolve_base_url("https://cases.example.com", "http://x"), "https://cases.example.com");
    }
}
