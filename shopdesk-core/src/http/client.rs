//! Typed client over the handler chain

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ApiError, ApiRequest, ApiResponse, HttpHandler};
use crate::config::ApiConfig;

/// JSON client for the admin backend
///
/// Paths are appended to the configured base URL. Response bodies are
/// parsed into the caller's type as soon as they arrive.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ApiConfig>,
    handler: Arc<dyn HttpHandler>,
}

impl ApiClient {
    pub fn new(config: Arc<ApiConfig>, handler: Arc<dyn HttpHandler>) -> Self {
        Self { config, handler }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET` and parse
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::get(self.config.url(path))).await?.json()
    }

    /// `POST` a JSON body and parse
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::post(self.config.url(path)).with_json(to_value(body)?);
        self.send(request).await?.json()
    }

    /// `PUT` a JSON body and parse
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::put(self.config.url(path)).with_json(to_value(body)?);
        self.send(request).await?.json()
    }

    /// `PATCH` a JSON body and parse
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::patch(self.config.url(path)).with_json(to_value(body)?);
        self.send(request).await?.json()
    }

    /// `DELETE`, ignoring any response body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(self.config.url(path))).await?;
        Ok(())
    }

    /// Send through the chain and require a success status
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self.handler.handle(request).await?;
        match ApiError::from_status(response.status()) {
            Some(error) => Err(error),
            None => Ok(response),
        }
    }
}

fn to_value<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}
