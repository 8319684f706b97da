//! Route guard for protected screens

use std::sync::Arc;

use url::Url;

use super::Navigator;
use crate::session::SessionStore;

/// Query parameter carrying the originally requested location
pub const RETURN_URL_PARAM: &str = "returnUrl";

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Access refused; the user was sent to `redirect`
    Deny { redirect: String },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Allows navigation only while the session store is authenticated
pub struct AuthGuard {
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    login_route: String,
}

impl AuthGuard {
    pub fn new(
        store: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        login_route: impl Into<String>,
    ) -> Self {
        Self {
            store,
            navigator,
            login_route: login_route.into(),
        }
    }

    /// Check access to `target` against the current session snapshot.
    ///
    /// On denial the navigator is sent to the login route with `target`
    /// as the return location.
    pub fn can_activate(&self, target: &str) -> GuardDecision {
        if self.store.is_authenticated() {
            return GuardDecision::Allow;
        }

        let redirect = login_redirect(&self.login_route, target);
        tracing::debug!(target, redirect = %redirect, "Guard denied navigation");
        self.navigator.navigate(&redirect);
        GuardDecision::Deny { redirect }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }
}

/// Login location that returns to `target` afterwards.
///
/// Path separators stay readable; every other reserved character of the
/// target is percent-encoded.
pub fn login_redirect(login_route: &str, target: &str) -> String {
    let encoded = urlencoding::encode(target).replace("%2F", "/");
    format!("{}?{}={}", login_route, RETURN_URL_PARAM, encoded)
}

/// Extract the return location from a login location, if present
pub fn return_url(location: &str) -> Option<String> {
    let base = Url::parse("http://localhost").ok()?;
    let url = base.join(location).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == RETURN_URL_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| value.starts_with('/') && !value.starts_with("//"))
}
