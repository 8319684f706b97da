//! Backend and routing configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::session::DEFAULT_STORAGE_KEY;

/// Production backend
pub const DEFAULT_BASE_URL: &str = "https://backend-e-commerce-gndx.onrender.com";

/// Endpoint fragments that never carry a credential
pub const DEFAULT_EXEMPT_PATHS: &[&str] = &["/login", "/register", "/auth/refresh"];

/// Connection settings for the admin backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefixes of the backend's route groups
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// URL fragments exempt from the `Authorization` header
    #[serde(default = "default_exempt_paths")]
    pub exempt_paths: Vec<String>,

    /// Route shown to logged-out users
    #[serde(default = "default_login_route")]
    pub login_route: String,

    /// Route shown after login when there is nowhere to return to
    #[serde(default = "default_home_route")]
    pub home_route: String,

    /// Storage key of the persisted session
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Route-group prefixes, appended to `base_url`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_auth")]
    pub auth: String,
    #[serde(default = "default_categories")]
    pub categories: String,
    #[serde(default = "default_inventory")]
    pub inventory: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_exempt_paths() -> Vec<String> {
    DEFAULT_EXEMPT_PATHS.iter().map(|p| p.to_string()).collect()
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_home_route() -> String {
    "/dashboard".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_auth() -> String {
    "/auth".to_string()
}

fn default_categories() -> String {
    "/categories".to_string()
}

fn default_inventory() -> String {
    "/inventory".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            auth: default_auth(),
            categories: default_categories(),
            inventory: default_inventory(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoints: EndpointConfig::default(),
            exempt_paths: default_exempt_paths(),
            login_route: default_login_route(),
            home_route: default_home_route(),
            storage_key: default_storage_key(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Config pointing at another backend, other values default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse from TOML, applying defaults for absent keys
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Check that the base URL is absolute http(s) and routes are paths
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        for route in [&self.login_route, &self.home_route] {
            if !route.starts_with('/') {
                return Err(ConfigError::InvalidRoute(route.clone()));
            }
        }
        Ok(())
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// True if `url` contains any exempt fragment
    pub fn is_exempt(&self, url: &str) -> bool {
        self.exempt_paths
            .iter()
            .any(|fragment| !fragment.is_empty() && url.contains(fragment.as_str()))
    }
}
