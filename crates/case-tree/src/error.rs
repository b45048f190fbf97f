//! Error Types
//!
//! Failures surfaced to the case-list screen.

use thiserror::Error;

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Backend call failures.
///
/// Transport and status failures are reported to the user the same way;
/// `Unauthorized` additionally ends the session.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 from the backend: the bearer token is missing or expired
    #[error("session expired, please sign in again")]
    Unauthorized,

    /// Any other non-2xx response
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// Network failure or undecodable response body
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// HTTP status when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Client configuration problems
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid backend url {url:?}: expected an http:// or https:// address")]
    InvalidUrl { url: String },
}
