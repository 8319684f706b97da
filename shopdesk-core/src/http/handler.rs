//! Handler chain: the trait every stage implements and the terminal
//! transport that talks to the network

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{ApiError, ApiRequest, ApiResponse};

/// One stage of the request chain
///
/// Middleware wraps another handler; the terminal handler performs I/O.
#[async_trait]
pub trait HttpHandler: Send + Sync {
    async fn handle(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[async_trait]
impl<H: HttpHandler + ?Sized> HttpHandler for Arc<H> {
    async fn handle(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).handle(request).await
    }
}

/// Terminal handler backed by `reqwest`
///
/// Every HTTP response, whatever its status, is returned as `Ok`; only
/// failures to obtain a response are errors.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shopdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpHandler for ReqwestTransport {
    async fn handle(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(url = %request.url(), error = %e, "Request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        tracing::debug!(method = %request.method(), url = %request.url(), status = status.as_u16(), "Response received");
        Ok(ApiResponse::new(status, body).with_headers(headers))
    }
}
