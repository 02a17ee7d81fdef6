//! Configuration file location for the netpath CLI
//!
//! Loads and saves `NetpathConfig` from ~/.netpath/config.toml unless
//! `--config` / `NETPATH_CONFIG` points elsewhere.

use std::path::{Path, PathBuf};

use anyhow::Result;
use netpath::NetpathConfig;

/// Get the path to the config file
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".netpath")
        .join("config.toml")
}

/// Load configuration from file, or return defaults if not found
pub fn load(path: &Path) -> Result<NetpathConfig> {
    Ok(NetpathConfig::load_from(path)?)
}

/// Set a configuration value by key path and persist it
pub fn set(config: &mut NetpathConfig, path: &Path, key: &str, value: &str) -> Result<()> {
    config.set(key, value)?;
    config.save_to(path)?;
    Ok(())
}
