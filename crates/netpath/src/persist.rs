//! Network files - JSON save and load
//!
//! The file layout matches what the topology editor writes:
//!
//! ```json
//! {
//!   "device_counters": { "PC": 2, "Switch": 1, "Router": 0 },
//!   "devices": [ { "type": "PC", "id": 0, "x": 10.0, "y": 20.0 } ],
//!   "connections": [ [0, 1] ]
//! }
//! ```
//!
//! Connection endpoints are indices into `devices`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::topology::{Device, DeviceType, Network};
use crate::{NetpathError, Result};

/// One device entry in a network file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

/// On-disk representation of a [`Network`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkFile {
    #[serde(default)]
    pub device_counters: Option<BTreeMap<DeviceType, u32>>,
    pub devices: Vec<DeviceRecord>,
    #[serde(default)]
    pub connections: Vec<[usize; 2]>,
}

impl NetworkFile {
    pub fn from_network(network: &Network) -> Self {
        let devices = network
            .devices()
            .map(|d| DeviceRecord {
                device_type: d.device_type,
                id: d.number,
                x: d.x,
                y: d.y,
            })
            .collect();

        let connections = network
            .connections()
            .iter()
            .filter_map(|c| {
                let a = network.device_index(c.a)?;
                let b = network.device_index(c.b)?;
                Some([a.min(b), a.max(b)])
            })
            .collect();

        let device_counters = DeviceType::ALL
            .iter()
            .map(|t| (*t, network.counter(*t)))
            .collect();

        Self {
            device_counters: Some(device_counters),
            devices,
            connections,
        }
    }

    /// Rebuild a network, validating connection indices.
    ///
    /// Duplicate connections are dropped. Counters never fall behind the
    /// highest device number already in use.
    pub fn into_network(self) -> Result<Network> {
        let mut network = Network::new();

        let ids: Vec<_> = self
            .devices
            .into_iter()
            .map(|r| network.insert_device(Device::new(r.device_type, r.id, r.x, r.y)))
            .collect();

        for [i, j] in self.connections {
            let (a, b) = match (ids.get(i), ids.get(j)) {
                (Some(a), Some(b)) => (*a, *b),
                _ => {
                    return Err(NetpathError::InvalidNetwork(format!(
                        "connection [{}, {}] refers to a missing device ({} devices)",
                        i,
                        j,
                        ids.len()
                    )))
                }
            };

            if a == b {
                return Err(NetpathError::InvalidNetwork(format!(
                    "device {} is connected to itself",
                    i
                )));
            }

            if !network.add_connection(a, b)? {
                tracing::warn!(i, j, "Skipping duplicate connection");
            }
        }

        for (device_type, value) in self.device_counters.unwrap_or_default() {
            network.set_counter(device_type, value);
        }

        Ok(network)
    }
}

/// Load a network from a JSON file
pub fn load_network(path: impl AsRef<Path>) -> Result<Network> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let file: NetworkFile = serde_json::from_str(&content)?;
    let network = file.into_network()?;

    tracing::info!(
        path = %path.display(),
        devices = network.device_count(),
        connections = network.connections().len(),
        "Network loaded"
    );
    Ok(network)
}

/// Save a network as pretty-printed JSON
pub fn save_network(network: &Network, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(&NetworkFile::from_network(network))?;
    fs::write(path, content)?;

    tracing::info!(path = %path.display(), "Network saved");
    Ok(())
}
