//! # netpath - Network topology paths
//!
//! Models a small computer network of PCs, switches and routers and finds the
//! least-cost path between two devices.
//!
//! ## Core Capabilities
//!
//! - **Shortest paths**: Bellman-Ford over any weighted directed [`Graph`],
//!   with negative-cycle detection and path reconstruction
//! - **Topology**: devices, undirected connections and per-type link costs
//! - **Persistence**: the JSON network file written by the topology editor
//!
//! ```
//! use netpath::{CostTable, DeviceType, Network};
//!
//! let mut network = Network::new();
//! let pc = network.add_device(DeviceType::Pc, 0.0, 0.0);
//! let switch = network.add_device(DeviceType::Switch, 100.0, 0.0);
//! let router = network.add_device(DeviceType::Router, 200.0, 0.0);
//! network.add_connection(pc, switch).unwrap();
//! network.add_connection(switch, router).unwrap();
//!
//! let route = network.find_route(pc, router, &CostTable::default()).unwrap();
//! assert_eq!(route.total_cost, 3.0);
//! ```

pub mod config;
pub mod persist;
pub mod routing;
pub mod topology;

pub use config::{DisplayConfig, NetpathConfig};
pub use persist::{load_network, save_network, NetworkFile};
pub use routing::{
    Distance, DistanceMap, Edge, Graph, PathError, PredecessorMap, ShortestPathEngine,
    ShortestPaths,
};
pub use topology::{Connection, CostModel, CostTable, Device, DeviceType, Network, Route};

use uuid::Uuid;

/// Main error type for netpath operations
#[derive(Debug, thiserror::Error)]
pub enum NetpathError {
    #[error(transparent)]
    Path(#[from] PathError<Uuid>),

    #[error("No path found from {from} to {to}")]
    NoPath { from: Uuid, to: Uuid },

    #[error("Device not found: {0}")]
    DeviceNotFound(Uuid),

    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    #[error("Unknown device type: {0}")]
    UnknownDeviceType(String),

    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetpathError>;
