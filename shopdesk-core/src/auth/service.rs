//! Authentication service
//!
//! Owns the network side of logging in and out; the session itself lives
//! in the [`SessionStore`].

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use super::{AuthError, ForgotPassword, LoginCredentials, LoginResponse, PasswordChange, PasswordReset};
use crate::http::{ApiClient, ApiError};
use crate::session::{Session, SessionStore};

/// Login, logout, and password flows against the auth endpoints
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    store: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(client: ApiClient, store: Arc<SessionStore>) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    fn auth_path(&self, action: &str) -> String {
        format!("{}/{}", self.client.config().endpoints.auth, action)
    }

    /// Exchange credentials for a session and install it in the store.
    ///
    /// If the session cannot be persisted it is still active in memory and
    /// the storage error is returned.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Arc<Session>, AuthError> {
        let response: LoginResponse = self
            .client
            .post(&self.auth_path("login"), credentials)
            .await
            .map_err(|e| match e {
                ApiError::Unauthorized | ApiError::Unexpected { status: 400 } => {
                    AuthError::InvalidCredentials
                }
                other => AuthError::Api(other),
            })?;

        let session = response.into_session()?;
        info!(email = %credentials.email, "Login succeeded");
        Ok(self.store.set_session(session).await?)
    }

    /// End the session; no backend call is made
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.clear().await?;
        Ok(())
    }

    /// Ask the backend to email a password reset link
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let body = ForgotPassword {
            email: email.to_string(),
        };
        let _: Value = self
            .client
            .post(&self.auth_path("forgot-password"), &body)
            .await?;
        Ok(())
    }

    /// Set a new password using the token from a reset link
    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<(), AuthError> {
        if reset.token.trim().is_empty() {
            return Err(AuthError::MissingResetToken);
        }
        if reset.new_password != reset.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        let _: Value = self
            .client
            .post(&self.auth_path("reset-password"), reset)
            .await?;
        Ok(())
    }

    /// Change the logged-in user's password
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), AuthError> {
        if change.new_password != change.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        let _: Value = self
            .client
            .post(&self.auth_path("change-password"), change)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::http::{ApiRequest, ApiResponse, HttpHandler};
    use async_trait::async_trait;
    use http::StatusCode;
    use std::sync::Mutex;

    struct Scripted {
        status: StatusCode,
        body: String,
        seen: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl HttpHandler for Scripted {
        async fn handle(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            Ok(ApiResponse::new(self.status, self.body.clone()))
        }
    }

    fn service(status: StatusCode, body: &str) -> (AuthService, Arc<Scripted>) {
        let handler = Arc::new(Scripted {
            status,
            body: body.to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let client = ApiClient::new(
            Arc::new(ApiConfig::with_base_url("http://api.test")),
            handler.clone(),
        );
        let store = Arc::new(SessionStore::in_memory());
        (AuthService::new(client, store), handler)
    }

    #[tokio::test]
    async fn login_installs_session() {
        let (auth, handler) = service(
            StatusCode::OK,
            r#"{"token":"jwt","user":{"id":1,"name":"Admin User","role":"Admin"}}"#,
        );

        let session = auth
            .login(&LoginCredentials::new("admin@admin.com", "admin@123"))
            .await
            .unwrap();

        assert_eq!(session.token().expose(), "jwt");
        assert!(auth.store().is_authenticated());
        let seen = handler.seen.lock().unwrap();
        assert_eq!(seen[0].url(), "http://api.test/auth/login");
        assert_eq!(seen[0].body().unwrap()["email"], "admin@admin.com");
    }

    #[tokio::test]
    async fn login_rejected_is_invalid_credentials() {
        let (auth, _) = service(StatusCode::UNAUTHORIZED, r#"{"message":"nope"}"#);

        let err = auth
            .login(&LoginCredentials::new("admin@admin.com", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!auth.store().is_authenticated());
    }

    #[tokio::test]
    async fn login_server_error_is_api_error() {
        let (auth, _) = service(StatusCode::INTERNAL_SERVER_ERROR, "");

        let err = auth
            .login(&LoginCredentials::new("a@b.c", "x"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Api(ApiError::Server { status: 500 })));
    }

    #[tokio::test]
    async fn login_without_token_is_rejected() {
        let (auth, _) = service(StatusCode::OK, r#"{"message":"welcome"}"#);

        let err = auth
            .login(&LoginCredentials::new("a@b.c", "x"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Api(ApiError::Decode(_))));
        assert!(!auth.store().is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_store() {
        let (auth, _) = service(StatusCode::OK, r#"{"token":"jwt","name":"A"}"#);
        auth.login(&LoginCredentials::new("a@b.c", "x")).await.unwrap();

        auth.logout().await.unwrap();

        assert!(!auth.store().is_authenticated());
    }

    #[tokio::test]
    async fn reset_password_validates_locally() {
        let (auth, handler) = service(StatusCode::OK, "{}");

        let mismatch = auth
            .reset_password(&PasswordReset::new("tok", "a", "b"))
            .await
            .unwrap_err();
        assert!(matches!(mismatch, AuthError::PasswordMismatch));

        let missing = auth
            .reset_password(&PasswordReset::new("", "a", "a"))
            .await
            .unwrap_err();
        assert!(matches!(missing, AuthError::MissingResetToken));

        assert!(handler.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reset_password_posts_body() {
        let (auth, handler) = service(StatusCode::OK, r#"{"success":true}"#);

        auth.reset_password(&PasswordReset::new("tok", "n3w", "n3w"))
            .await
            .unwrap();

        let seen = handler.seen.lock().unwrap();
        assert_eq!(seen[0].url(), "http://api.test/auth/reset-password");
        assert_eq!(seen[0].body().unwrap()["newPassword"], "n3w");
    }

    #[tokio::test]
    async fn change_password_rejects_mismatch() {
        let (auth, _) = service(StatusCode::OK, "{}");
        let err = auth
            .change_password(&PasswordChange::new("old", "a", "b"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[tokio::test]
    async fn forgot_password_posts_email() {
        let (auth, handler) = service(StatusCode::OK, "");
        auth.forgot_password("ops@shop.test").await.unwrap();
        let seen = handler.seen.lock().unwrap();
        assert_eq!(seen[0].url(), "http://api.test/auth/forgot-password");
        assert_eq!(seen[0].body().unwrap()["email"], "ops@shop.test");
    }
}
