//! Normalized API errors
//!
//! Every failed call surfaces as one of these. The `Display` text is the
//! message shown to the operator.

use http::StatusCode;
use thiserror::Error;

/// A failed backend call, classified by cause
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP 401; the session has been ended
    #[error("Unauthorized! Please log in again.")]
    Unauthorized,

    /// HTTP 403; the session is untouched
    #[error("Access denied!")]
    Forbidden,

    /// HTTP 404
    #[error("Resource not found!")]
    NotFound,

    /// HTTP 5xx
    #[error("Server error. Please try again later.")]
    Server { status: u16 },

    /// Any other non-success status
    #[error("Something went wrong.")]
    Unexpected { status: u16 },

    /// The request never produced a response (connection, TLS, timeout)
    #[error("Something went wrong.")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("Unexpected response from server.")]
    Decode(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Classify a response status; `None` for success statuses
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }
        Some(match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            s if s.is_server_error() => ApiError::Server { status: s.as_u16() },
            s => ApiError::Unexpected { status: s.as_u16() },
        })
    }

    /// Status code behind the error, when there was a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden => Some(403),
            ApiError::NotFound => Some(404),
            ApiError::Server { status } | ApiError::Unexpected { status } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) | ApiError::InvalidRequest(_) => None,
        }
    }

    /// Underlying cause for logs; not meant for display
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Transport(detail)
            | ApiError::Decode(detail)
            | ApiError::InvalidRequest(detail) => Some(detail),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ApiError::InvalidRequest(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(status: u16) -> String {
        ApiError::from_status(StatusCode::from_u16(status).unwrap())
            .unwrap()
            .to_string()
    }

    #[test]
    fn success_is_not_an_error() {
        assert_eq!(ApiError::from_status(StatusCode::OK), None);
        assert_eq!(ApiError::from_status(StatusCode::NO_CONTENT), None);
    }

    #[test]
    fn taxonomy_messages() {
        assert_eq!(message(401), "Unauthorized! Please log in again.");
        assert_eq!(message(403), "Access denied!");
        assert_eq!(message(404), "Resource not found!");
        assert_eq!(message(500), "Server error. Please try again later.");
        assert_eq!(message(418), "Something went wrong.");
    }

    #[test]
    fn all_5xx_are_server_errors() {
        assert_eq!(
            ApiError::from_status(StatusCode::BAD_GATEWAY),
            Some(ApiError::Server { status: 502 })
        );
        assert_eq!(message(503), "Server error. Please try again later.");
    }

    #[test]
    fn status_is_preserved() {
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert_eq!(ApiError::Unexpected { status: 418 }.status(), Some(418));
        assert_eq!(ApiError::Transport("refused".into()).status(), None);
    }

    #[test]
    fn transport_error_uses_generic_message() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Something went wrong.");
        assert_eq!(err.detail(), Some("connection refused"));
    }
}
