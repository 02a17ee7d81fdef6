//! Topology module - Devices, connections and the link cost model

pub mod cost;
pub mod device;
pub mod network;

pub use cost::{CostModel, CostTable, MIN_LINK_COST};
pub use device::{Device, DeviceType};
pub use network::{Connection, Network, Route};
