//! HTTP layer: request values, the handler chain, the authorization
//! middleware, and the typed client on top

mod client;
mod error;
mod handler;
mod interceptor;
mod request;

pub use client::ApiClient;
pub use error::ApiError;
pub use handler::{HttpHandler, ReqwestTransport};
pub use interceptor::AuthInterceptor;
pub use request::{ApiRequest, ApiResponse};
