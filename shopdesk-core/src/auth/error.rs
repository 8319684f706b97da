//! Authentication error types

use thiserror::Error;

use crate::error::SessionError;
use crate::http::ApiError;

/// Errors from login and password flows
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend refused the email/password pair
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,

    /// New password and confirmation differ
    #[error("passwords do not match")]
    PasswordMismatch,

    /// A password reset was attempted without a reset token
    #[error("password reset token is missing")]
    MissingResetToken,

    /// The login response or its persistence failed
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_display() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid credentials. Please try again."
        );
    }

    #[test]
    fn test_api_error_is_transparent() {
        let err: AuthError = ApiError::NotFound.into();
        assert_eq!(err.to_string(), "Resource not found!");
    }
}
