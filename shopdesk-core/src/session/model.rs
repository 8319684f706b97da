//! Session and identity types
//!
//! The persisted record is a flat JSON object: the bearer token sits next
//! to the identity fields, and any field the backend adds is carried
//! through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SessionError;

/// Opaque bearer credential issued by the backend at login.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Header value in `Bearer <token>` form.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BearerToken([REDACTED])")
    }
}

/// Identity metadata returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Deployment-specific fields, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Best label for display: name, then email, then id.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            return email.to_string();
        }
        match self.id {
            Some(id) => format!("user #{}", id),
            None => "unknown user".to_string(),
        }
    }
}

const TOKEN_FIELD: &str = "token";

/// The authenticated identity plus its bearer credential
///
/// A session is always complete: construction rejects an empty token, and
/// the store only ever swaps whole `Session` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: BearerToken,
    #[serde(flatten)]
    identity: Identity,
}

impl Session {
    /// Build a session, rejecting a blank token.
    ///
    /// A `token` key among the identity's extra fields is dropped; the
    /// record is flat and holds a single token.
    pub fn new(token: BearerToken, mut identity: Identity) -> Result<Self, SessionError> {
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }
        identity.extra.remove(TOKEN_FIELD);
        Ok(Self { token, identity })
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Parse the persisted JSON record.
    pub fn from_json(raw: &str) -> Result<Self, SessionError> {
        let session: Session = serde_json::from_str(raw)?;
        Self::new(session.token, session.identity)
    }

    /// Serialize to the persisted JSON record.
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Session {
        Session::new(
            BearerToken::new("mock-jwt-token"),
            Identity::new()
                .with_id(1)
                .with_name("Admin User")
                .with_email("admin@admin.com")
                .with_role("Admin"),
        )
        .unwrap()
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = BearerToken::new("abc123");
        assert_eq!(format!("{:?}", token), "BearerToken([REDACTED])");
        assert_eq!(token.header_value(), "Bearer abc123");
    }

    #[test]
    fn session_rejects_blank_token() {
        let err = Session::new(BearerToken::new("  "), Identity::new()).unwrap_err();
        assert!(matches!(err, SessionError::MissingToken));
    }

    #[test]
    fn persisted_record_is_flat() {
        let json = admin().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["token"], "mock-jwt-token");
        assert_eq!(value["name"], "Admin User");
        assert_eq!(value["role"], "Admin");
        assert!(value.get("identity").is_none());
    }

    #[test]
    fn parses_record_with_extra_fields() {
        let raw = r#"{"token":"t1","id":7,"name":"Store Manager","storeId":42}"#;
        let session = Session::from_json(raw).unwrap();
        assert_eq!(session.token().expose(), "t1");
        assert_eq!(session.identity().id, Some(7));
        assert_eq!(session.identity().extra["storeId"], 42);
    }

    #[test]
    fn record_without_token_is_rejected() {
        let err = Session::from_json(r#"{"name":"nobody"}"#).unwrap_err();
        assert!(matches!(err, SessionError::Malformed(_)));
    }

    #[test]
    fn record_with_empty_token_is_rejected() {
        let err = Session::from_json(r#"{"token":""}"#).unwrap_err();
        assert!(matches!(err, SessionError::MissingToken));
    }

    #[test]
    fn display_name_falls_back() {
        assert_eq!(admin().identity().display_name(), "Admin User");
        assert_eq!(
            Identity::new().with_email("a@b.c").display_name(),
            "a@b.c"
        );
        assert_eq!(Identity::new().with_id(3).display_name(), "user #3");
        assert_eq!(Identity::new().display_name(), "unknown user");
    }
}
