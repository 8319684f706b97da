//! Authorization middleware
//!
//! Attaches the session's bearer token to outgoing requests, classifies
//! failed responses, and ends the session when the backend answers 401.

use std::sync::Arc;

use async_trait::async_trait;
use http::header::{AUTHORIZATION, HeaderValue};
use tracing::{debug, warn};

use super::{ApiError, ApiRequest, ApiResponse, HttpHandler};
use crate::config::ApiConfig;
use crate::navigation::Navigator;
use crate::session::SessionStore;

/// Middleware that authorizes requests against the session store
pub struct AuthInterceptor<H> {
    inner: H,
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    config: ApiConfig,
}

impl<H: HttpHandler> AuthInterceptor<H> {
    pub fn new(
        inner: H,
        store: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        config: &ApiConfig,
    ) -> Self {
        Self {
            inner,
            store,
            navigator,
            config: config.clone(),
        }
    }

    /// True if `url` must never carry a credential
    pub fn is_exempt(&self, url: &str) -> bool {
        self.config.is_exempt(url)
    }

    /// Copy of `request` carrying the session token.
    ///
    /// `None` when the request should go out as is: exempt endpoint, no
    /// session, or a token that is not a valid header value.
    pub fn authorize(&self, request: &ApiRequest) -> Option<ApiRequest> {
        if self.is_exempt(request.url()) {
            return None;
        }

        let session = self.store.current()?;
        match HeaderValue::from_str(&session.token().header_value()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                Some(request.clone().with_header(AUTHORIZATION, value))
            }
            Err(_) => {
                warn!("Session token is not a valid header value, sending request without it");
                None
            }
        }
    }

    async fn credential_rejected(&self) {
        if self.store.is_authenticated() {
            if let Err(e) = self.store.reject().await {
                warn!(error = %e, "Failed to clear rejected session");
            }
        }
        self.navigator.navigate(&self.config.login_route);
    }
}

#[async_trait]
impl<H: HttpHandler> HttpHandler for AuthInterceptor<H> {
    async fn handle(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let exempt = self.is_exempt(request.url());
        let outgoing = self.authorize(&request).unwrap_or(request);
        let method = outgoing.method().clone();
        let url = outgoing.url().to_string();

        let response = self.inner.handle(outgoing).await?;

        let Some(error) = ApiError::from_status(response.status()) else {
            return Ok(response);
        };

        debug!(%method, %url, status = response.status().as_u16(), error = %error, "Request failed");
        // A rejected login attempt carried no credential, so there is no
        // session to end
        if error == ApiError::Unauthorized && !exempt {
            self.credential_rejected().await;
        }
        Err(error)
    }
}
