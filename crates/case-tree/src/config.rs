//! Client Configuration
//!
//! Where the backend lives and which bearer token to send.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Backend base URL, e.g. `http://localhost:8080/protected`
pub const BACKEND_URL_VAR: &str = "CASEBOARD_BACKEND_URL";
/// Optional bearer token
pub const TOKEN_VAR: &str = "CASEBOARD_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Absolute base URL without trailing slash
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = base_url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl { url });
        }
        Ok(Self {
            base_url: trimmed.to_string(),
            token: None,
        })
    }

    /// Attach a bearer token; blank tokens are ignored
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.trim().is_empty() { None } else { Some(token) };
        self
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BACKEND_URL_VAR).ok_or(ConfigError::MissingVar(BACKEND_URL_VAR))?;
        let config = Self::new(base_url)?;
        Ok(match lookup(TOKEN_VAR) {
            Some(token) => config.with_token(token),
            None => config,
        })
    }

    /// Full URL for an API path starting with `/`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (BACKEND_URL_VAR, "http://localhost:8080/protected/"),
            (TOKEN_VAR, "abc"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/protected");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.endpoint("/cases/1"), "http://localhost:8080/protected/cases/1");
    }

    #[test]
    fn test_missing_url() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(BACKEND_URL_VAR));
    }

    #[test]
    fn test_relative_url_rejected() {
        assert!(matches!(ClientConfig::new("/api"), Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_blank_token_ignored() {
        let config = ClientConfig::new("https://cases.example.com").unwrap().with_token("  ");
        assert_eq!(config.token, None);
    }
}
