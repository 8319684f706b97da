use serde::{Deserialize, Serialize};
use shopdesk_core::{ApiConfig, EndpointConfig};
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawShopdeskConfig {
    #[serde(default)]
    pub api: RawApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// API section as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawApiConfig {
    pub base_url: Option<String>,
    pub endpoints: Option<EndpointConfig>,
    pub exempt_paths: Option<Vec<String>>,
    pub login_route: Option<String>,
    pub home_route: Option<String>,
    pub storage_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShopdeskConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageConfig {
    /// Directory holding `storage.json`; the XDG data dir when unset
    pub dir: Option<PathBuf>,
}

impl ShopdeskConfig {
    /// Where the persisted session lives
    pub fn storage_dir(&self) -> PathBuf {
        self.storage
            .dir
            .clone()
            .unwrap_or_else(shopdesk_paths::data_dir)
    }
}
