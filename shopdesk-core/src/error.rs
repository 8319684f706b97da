//! Error types for shopdesk-core

use thiserror::Error;

use crate::auth::AuthError;
use crate::http::ApiError;

/// Top-level error type for shopdesk-core
#[derive(Error, Debug)]
pub enum ShopdeskError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to the session record and its storage
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session token is missing or empty")]
    MissingToken,

    #[error("malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("session storage error: {0}")]
    Storage(String),
}

/// Errors related to configuration values
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid route {0:?}: routes must start with '/'")]
    InvalidRoute(String),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_storage_displays_correctly() {
        let error = SessionError::Storage("disk full".to_string());
        assert_eq!(error.to_string(), "session storage error: disk full");
    }

    #[test]
    fn session_error_converts_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not valid json").unwrap_err();
        let error: SessionError = json_err.into();
        assert!(matches!(error, SessionError::Malformed(_)));
    }

    #[test]
    fn config_error_invalid_route_displays_correctly() {
        let error = ConfigError::InvalidRoute("login".to_string());
        assert!(error.to_string().contains("must start with '/'"));
    }

    #[test]
    fn shopdesk_error_api_is_transparent() {
        let error: ShopdeskError = ApiError::Forbidden.into();
        assert_eq!(error.to_string(), "Access denied!");
    }

    #[test]
    fn shopdesk_error_converts_from_session_error() {
        let error: ShopdeskError = SessionError::MissingToken.into();
        assert!(matches!(error, ShopdeskError::Session(_)));
        assert!(error.to_string().starts_with("Session error"));
    }
}
