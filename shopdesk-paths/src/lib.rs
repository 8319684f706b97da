//! XDG Base Directory paths for shopdesk.
//!
//! The CLI keeps its configuration and its persisted session in XDG
//! locations on every platform, the way gh and kubectl do.

use std::path::PathBuf;

/// Application directory name under the XDG roots.
const APP_DIR: &str = "shopdesk";

/// Get the shopdesk config directory.
///
/// Returns `$XDG_CONFIG_HOME/shopdesk` if set, otherwise `~/.config/shopdesk`.
///
/// # Examples
///
/// ```
/// use shopdesk_paths::config_dir;
///
/// let config_file = config_dir().join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Get the shopdesk data directory.
///
/// Returns `$XDG_DATA_HOME/shopdesk` if set, otherwise `~/.local/share/shopdesk`.
/// The persisted session lives here.
///
/// # Examples
///
/// ```
/// use shopdesk_paths::data_dir;
///
/// let storage = data_dir().join("storage.json");
/// ```
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

fn xdg_dir(env_var: &str, home_relative: &str) -> PathBuf {
    if let Ok(root) = std::env::var(env_var) {
        PathBuf::from(root).join(APP_DIR)
    } else if let Some(home) = dirs::home_dir() {
        home.join(home_relative).join(APP_DIR)
    } else {
        PathBuf::from(home_relative).join(APP_DIR)
    }
}
