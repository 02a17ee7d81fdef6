//! Configuration for netpath
//!
//! Stored as TOML:
//!
//! ```toml
//! [costs]
//! router_router = 3.0
//!
//! [display]
//! color = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::topology::CostTable;
use crate::{NetpathError, Result};

/// Terminal output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,

    /// Print the full distance table after a path query
    #[serde(default)]
    pub show_distances: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_distances: false,
        }
    }
}

/// Core configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NetpathConfig {
    #[serde(default)]
    pub costs: CostTable,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl NetpathConfig {
    /// Load configuration from a file, or return defaults if it does not exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| NetpathError::ConfigError(e.to_string()))?;
        config.costs.validate()?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| NetpathError::ConfigError(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get a configuration value by key path (e.g., "costs.pc_router")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["costs", name] => self.costs.get(name).map(|v| v.to_string()),
            ["display", "color"] => Some(self.display.color.to_string()),
            ["display", "show_distances"] => Some(self.display.show_distances.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key path
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        let invalid = || NetpathError::ConfigError(format!("Invalid value for {}: {}", key, value));

        match parts.as_slice() {
            ["costs", name] => {
                let slot = self
                    .costs
                    .entry_mut(name)
                    .ok_or_else(|| NetpathError::ConfigError(format!("Unknown configuration key: {}", key)))?;
                let cost: f64 = value.parse().map_err(|_| invalid())?;
                CostTable::check_cost(name, cost)?;
                *slot = cost;
            }
            ["display", "color"] => self.display.color = value.parse().map_err(|_| invalid())?,
            ["display", "show_distances"] => {
                self.display.show_distances = value.parse().map_err(|_| invalid())?
            }
            _ => {
                return Err(NetpathError::ConfigError(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{CostModel, DeviceType};

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = NetpathConfig::from_toml("").unwrap();
        assert_eq!(config, NetpathConfig::default());
        assert!(config.display.color);
        assert_eq!(config.costs.router_router, 3.0);
    }

    #[test]
    fn test_partial_cost_table() {
        let config = NetpathConfig::from_toml("[costs]\nrouter_router = 7.5\n").unwrap();
        assert_eq!(
            config.costs.cost(DeviceType::Router, DeviceType::Router),
            7.5
        );
        assert_eq!(config.costs.cost(DeviceType::Pc, DeviceType::Router), 2.0);
    }

    #[test]
    fn test_invalid_toml() {
        let err = NetpathConfig::from_toml("[costs\n").unwrap_err();
        assert!(matches!(err, NetpathError::ConfigError(_)));
    }

    #[test]
    fn test_get_and_set() {
        let mut config = NetpathConfig::default();

        config.set("costs.pc_switch", "4").unwrap();
        config.set("display.show_distances", "true").unwrap();

        assert_eq!(config.get("costs.pc_switch").as_deref(), Some("4"));
        assert_eq!(config.get("display.show_distances").as_deref(), Some("true"));
        assert!(config.get("server.url").is_none());

        assert!(config.set("costs.pc_hub", "1").is_err());
        assert!(config.set("costs.pc_pc", "cheap").is_err());
        assert!(config.set("costs.pc_pc", "inf").is_err());
        assert!(config.set("display.color", "maybe").is_err());
    }

    #[test]
    fn test_non_finite_costs_in_file_rejected() {
        for content in ["[costs]\npc_switch = inf\n", "[costs]\npc_switch = nan\n"] {
            let err = NetpathConfig::from_toml(content).unwrap_err();
            assert!(matches!(err, NetpathError::ConfigError(_)));
        }
        assert!(NetpathConfig::from_toml("[costs]\nrouter_router = 0.25\n").is_err());
    }

    #[test]
    fn test_set_rejects_costs_below_one() {
        let mut config = NetpathConfig::default();

        assert!(config.set("costs.pc_switch", "-1").is_err());
        assert!(config.set("costs.pc_switch", "0").is_err());
        assert_eq!(config.costs.pc_switch, 1.0);

        config.set("costs.pc_switch", "1").unwrap();
    }

    #[test]
    fn test_route_over_configured_costs() {
        use crate::Network;

        let mut config = NetpathConfig::default();
        assert!(config.set("costs.pc_switch", "-1").is_err());

        let mut network = Network::new();
        let pc = network.add_device(DeviceType::Pc, 0.0, 0.0);
        let switch = network.add_device(DeviceType::Switch, 100.0, 0.0);
        network.add_connection(pc, switch).unwrap();

        let route = network.find_route(pc, switch, &config.costs).unwrap();
        assert_eq!(route.devices, vec![pc, switch]);
        assert_eq!(route.total_cost, 1.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".netpath").join("config.toml");

        let mut config = NetpathConfig::default();
        config.set("costs.switch_router", "2.5").unwrap();
        config.save_to(&path).unwrap();

        let loaded = NetpathConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = NetpathConfig::load_from(dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, NetpathConfig::default());
    }
}
