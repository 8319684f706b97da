//! shopdesk-core: session, navigation, and request pipeline for the
//! shopdesk admin console
//!
//! - **Session store** - [`SessionStore`] owns the authenticated identity,
//!   persists it through a [`KeyValueStorage`], and notifies subscribers
//! - **Navigation guard** - [`AuthGuard`] and [`Router`] keep anonymous
//!   users out of protected pages and send them to login with a return URL
//! - **Request pipeline** - [`AuthInterceptor`] attaches the bearer token,
//!   maps failures to [`ApiError`], and ends the session on 401
//! - **Backend APIs** - [`AuthService`], [`CategoryApi`], [`InventoryApi`]
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use shopdesk_core::{ApiConfig, Console, LoginCredentials, MemoryStorage};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let console = Console::open(ApiConfig::default(), Arc::new(MemoryStorage::new())).await?;
//!     console
//!         .auth
//!         .login(&LoginCredentials::new("admin@shop.test", "secret"))
//!         .await?;
//!     let items = console.inventory.list().await?;
//!     println!("{} items", items.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod navigation;
pub mod session;

pub use auth::{AuthError, AuthService, LoginCredentials, PasswordChange, PasswordReset};
pub use catalog::{
    Category, CategoryApi, InventoryApi, InventoryItem, ListQuery, NewCategory, Page, Pagination,
    RentalFilter,
};
pub use config::{ApiConfig, EndpointConfig};
pub use console::Console;
pub use error::{ConfigError, SessionError, ShopdeskError};
pub use self::http::{
    ApiClient, ApiError, ApiRequest, ApiResponse, AuthInterceptor, HttpHandler, ReqwestTransport,
};
pub use navigation::{AuthGuard, GuardDecision, HistoryNavigator, Navigation, Navigator, Router};
pub use session::{
    AuthState, BearerToken, FileStorage, Identity, KeyValueStorage, MemoryStorage, Session,
    SessionEvent, SessionStore,
};
