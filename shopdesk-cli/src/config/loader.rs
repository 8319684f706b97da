use super::types::{RawApiConfig, RawShopdeskConfig, ShopdeskConfig, StorageConfig};
use anyhow::{Context, Result};
use shopdesk_core::ApiConfig;
use std::path::{Path, PathBuf};

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "SHOPDESK_API_URL";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project + environment)
    pub fn load() -> Result<ShopdeskConfig> {
        let mut raw = RawShopdeskConfig::default();

        // Layer 1: User config
        let user_path = Self::user_config_path();
        if user_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&project_path)?);
        }

        // Layer 3: Environment
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.is_empty()
        {
            raw.api.base_url = Some(url);
        }

        let config = Self::finalize(raw);
        config
            .api
            .validate()
            .context("Invalid shopdesk configuration")?;
        Ok(config)
    }

    /// Get user config path
    pub fn user_config_path() -> PathBuf {
        shopdesk_paths::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with SHOPDESK_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("SHOPDESK_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".shopdesk/config.toml")
        }
    }

    fn read_raw(path: &Path) -> Result<RawShopdeskConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawShopdeskConfig, overlay: RawShopdeskConfig) -> RawShopdeskConfig {
        RawShopdeskConfig {
            api: RawApiConfig {
                base_url: overlay.api.base_url.or(base.api.base_url),
                endpoints: overlay.api.endpoints.or(base.api.endpoints),
                exempt_paths: overlay.api.exempt_paths.or(base.api.exempt_paths),
                login_route: overlay.api.login_route.or(base.api.login_route),
                home_route: overlay.api.home_route.or(base.api.home_route),
                storage_key: overlay.api.storage_key.or(base.api.storage_key),
                timeout_secs: overlay.api.timeout_secs.or(base.api.timeout_secs),
            },
            storage: StorageConfig {
                dir: overlay.storage.dir.or(base.storage.dir),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawShopdeskConfig) -> ShopdeskConfig {
        let defaults = ApiConfig::default();
        ShopdeskConfig {
            api: ApiConfig {
                base_url: raw.api.base_url.unwrap_or(defaults.base_url),
                endpoints: raw.api.endpoints.unwrap_or(defaults.endpoints),
                exempt_paths: raw.api.exempt_paths.unwrap_or(defaults.exempt_paths),
                login_route: raw.api.login_route.unwrap_or(defaults.login_route),
                home_route: raw.api.home_route.unwrap_or(defaults.home_route),
                storage_key: raw.api.storage_key.unwrap_or(defaults.storage_key),
                timeout_secs: raw.api.timeout_secs.unwrap_or(defaults.timeout_secs),
            },
            storage: raw.storage,
        }
    }

    /// Load a single config file, defaults for anything it leaves out
    #[cfg(test)]
    pub fn load_from_path(path: &Path) -> Result<ShopdeskConfig> {
        if !path.exists() {
            return Ok(ShopdeskConfig::default());
        }
        Ok(Self::finalize(Self::read_raw(path)?))
    }
}
