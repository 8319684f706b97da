//! Request and response bodies of the auth endpoints

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::session::{BearerToken, Identity, Session};

/// Email and password for `POST /auth/login`
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login body
///
/// Deployments answer either with the identity under `user` or with the
/// identity fields next to the token.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LoginResponse {
    Nested {
        token: BearerToken,
        user: Identity,
    },
    Flat {
        token: BearerToken,
        #[serde(flatten)]
        identity: Identity,
    },
}

impl LoginResponse {
    /// Convert into a complete session
    pub fn into_session(self) -> Result<Session, SessionError> {
        match self {
            LoginResponse::Nested { token, user } => Session::new(token, user),
            LoginResponse::Flat { token, identity } => Session::new(token, identity),
        }
    }
}

/// Body of `POST /auth/forgot-password`
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPassword {
    pub email: String,
}

/// Body of `POST /auth/reset-password`
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordReset {
    pub fn new(
        token: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
        }
    }
}

/// Body of `POST /auth/change-password`
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn new(
        old_password: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            old_password: old_password.into(),
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credentials_debug_hides_password() {
        let creds = LoginCredentials::new("admin@admin.com", "admin@123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin@admin.com"));
        assert!(!debug.contains("admin@123"));
    }

    #[test]
    fn parses_nested_login_response() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "token": "jwt",
            "user": {"id": 1, "name": "Admin User", "email": "admin@admin.com", "role": "Admin"}
        }))
        .unwrap();
        let session = resp.into_session().unwrap();
        assert_eq!(session.token().expose(), "jwt");
        assert_eq!(session.identity().role.as_deref(), Some("Admin"));
    }

    #[test]
    fn nested_user_token_survives_persist_and_restore() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "token": "jwt",
            "user": {"id": 1, "name": "Admin", "token": "jwt", "storeId": 4}
        }))
        .unwrap();
        let session = resp.into_session().unwrap();

        let record = session.to_json().unwrap();
        assert_eq!(record.matches("\"token\"").count(), 1);

        let restored = Session::from_json(&record).unwrap();
        assert_eq!(restored, session);
        assert_eq!(restored.token().expose(), "jwt");
        assert_eq!(restored.identity().extra.get("storeId"), Some(&json!(4)));
    }

    #[test]
    fn parses_flat_login_response() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "token": "jwt", "id": 2, "name": "Jane Smith", "role": "Manager"
        }))
        .unwrap();
        assert!(matches!(resp, LoginResponse::Flat { .. }));
        let session = resp.into_session().unwrap();
        assert_eq!(session.identity().id, Some(2));
    }

    #[test]
    fn rejects_response_without_token() {
        let result = serde_json::from_value::<LoginResponse>(json!({"message": "ok"}));
        assert!(result.is_err());
    }

    #[test]
    fn empty_token_is_not_a_session() {
        let resp: LoginResponse = serde_json::from_value(json!({"token": ""})).unwrap();
        assert!(matches!(resp.into_session(), Err(SessionError::MissingToken)));
    }

    #[test]
    fn password_bodies_use_camel_case() {
        let reset = serde_json::to_value(PasswordReset::new("t", "new", "new")).unwrap();
        assert_eq!(reset, json!({"token": "t", "newPassword": "new", "confirmPassword": "new"}));

        let change = serde_json::to_value(PasswordChange::new("old", "new", "new")).unwrap();
        assert_eq!(
            change,
            json!({"oldPassword": "old", "newPassword": "new", "confirmPassword": "new"})
        );
    }
}
