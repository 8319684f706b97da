pub mod auth;
pub mod categories;
pub mod config;
pub mod inventory;
pub mod open;
pub mod password;

use std::sync::Arc;

use anyhow::{Context, Result};
use shopdesk_core::{Console, FileStorage};
use tracing::debug;

use crate::config::ConfigLoader;

/// Open the console with the merged configuration and the on-disk session
pub async fn open_console() -> Result<Console> {
    let config = ConfigLoader::load()?;
    let dir = config.storage_dir();
    debug!(dir = %dir.display(), "Loading session storage");
    let storage = FileStorage::load(&dir)
        .await
        .with_context(|| format!("Failed to open session storage in {}", dir.display()))?;
    Ok(Console::open(config.api, Arc::new(storage)).await?)
}
