//! Network model - devices, connections and path queries

use std::collections::BTreeMap;

use indexmap::IndexMap;
use uuid::Uuid;

use super::cost::CostModel;
use super::device::{Device, DeviceType};
use crate::routing::{Graph, ShortestPathEngine, ShortestPaths};
use crate::{NetpathError, Result};

/// Half-width of the square around a device that counts as a hit
pub const DEVICE_HIT_RADIUS: f64 = 20.0;

/// Maximum distance from a connection line that counts as a hit
pub const CONNECTION_HIT_DISTANCE: f64 = 10.0;

/// An undirected link between two devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub a: Uuid,
    pub b: Uuid,
}

impl Connection {
    pub fn new(a: Uuid, b: Uuid) -> Self {
        Self { a, b }
    }

    /// True if this connection joins `x` and `y`, in either direction
    pub fn joins(&self, x: Uuid, y: Uuid) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    pub fn touches(&self, device: Uuid) -> bool {
        self.a == device || self.b == device
    }
}

/// Least-cost route between two devices
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub devices: Vec<Uuid>,
    pub total_cost: f64,
}

impl Route {
    pub fn hop_count(&self) -> usize {
        self.devices.len().saturating_sub(1)
    }
}

/// Devices and the connections between them
#[derive(Debug, Clone, Default)]
pub struct Network {
    devices: IndexMap<Uuid, Device>,
    connections: Vec<Connection>,
    counters: BTreeMap<DeviceType, u32>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new device, numbering it after the last one of its type
    pub fn add_device(&mut self, device_type: DeviceType, x: f64, y: f64) -> Uuid {
        let counter = self.counters.entry(device_type).or_insert(0);
        let device = Device::new(device_type, *counter, x, y);
        *counter += 1;

        let id = device.id;
        tracing::debug!(label = %device.label(), "Device added");
        self.devices.insert(id, device);
        id
    }

    /// Insert a device that already carries its number, keeping counters ahead of it
    pub(crate) fn insert_device(&mut self, device: Device) -> Uuid {
        let counter = self.counters.entry(device.device_type).or_insert(0);
        *counter = (*counter).max(device.number + 1);

        let id = device.id;
        self.devices.insert(id, device);
        id
    }

    /// Remove a device together with every connection touching it
    pub fn remove_device(&mut self, id: Uuid) -> Option<Device> {
        let device = self.devices.shift_remove(&id)?;
        self.connections.retain(|c| !c.touches(id));
        tracing::debug!(label = %device.label(), "Device removed");
        Some(device)
    }

    /// Connect two devices.
    ///
    /// Returns `Ok(false)` for a self connection or when the two devices are
    /// already connected.
    pub fn add_connection(&mut self, a: Uuid, b: Uuid) -> Result<bool> {
        self.require_device(a)?;
        self.require_device(b)?;

        if a == b || self.is_connected(a, b) {
            return Ok(false);
        }

        self.connections.push(Connection::new(a, b));
        Ok(true)
    }

    pub fn remove_connection(&mut self, a: Uuid, b: Uuid) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| !c.joins(a, b));
        self.connections.len() != before
    }

    pub fn is_connected(&self, a: Uuid, b: Uuid) -> bool {
        self.connections.iter().any(|c| c.joins(a, b))
    }

    pub fn device(&self, id: Uuid) -> Option<&Device> {
        self.devices.get(&id)
    }

    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Position of a device in placement order
    pub fn device_index(&self, id: Uuid) -> Option<usize> {
        self.devices.get_index_of(&id)
    }

    /// Next number that will be given to a device of this type
    pub fn counter(&self, device_type: DeviceType) -> u32 {
        self.counters.get(&device_type).copied().unwrap_or(0)
    }

    pub(crate) fn set_counter(&mut self, device_type: DeviceType, value: u32) {
        let counter = self.counters.entry(device_type).or_insert(0);
        *counter = (*counter).max(value);
    }

    /// Find a device by its label, e.g. "Router 1"
    pub fn device_by_label(&self, label: &str) -> Result<&Device> {
        let (device_type, number) = Device::parse_label(label)
            .ok_or_else(|| NetpathError::UnknownDevice(label.to_string()))?;

        self.devices
            .values()
            .find(|d| d.device_type == device_type && d.number == number)
            .ok_or_else(|| NetpathError::UnknownDevice(label.to_string()))
    }

    /// First device whose hit box contains the point
    pub fn device_at(&self, x: f64, y: f64) -> Option<&Device> {
        self.devices.values().find(|d| {
            (x - d.x).abs() < DEVICE_HIT_RADIUS && (y - d.y).abs() < DEVICE_HIT_RADIUS
        })
    }

    /// First connection passing near the point
    pub fn connection_at(&self, x: f64, y: f64) -> Option<Connection> {
        self.connections.iter().copied().find(|c| {
            match (self.devices.get(&c.a), self.devices.get(&c.b)) {
                (Some(a), Some(b)) => is_point_near_segment(x, y, (a.x, a.y), (b.x, b.y)),
                _ => false,
            }
        })
    }

    pub fn clear(&mut self) {
        self.devices.clear();
        self.connections.clear();
        self.counters.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.connections.is_empty()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Cost of the link between two devices under a cost model
    pub fn link_cost(&self, connection: &Connection, costs: &impl CostModel) -> Option<f64> {
        let a = self.devices.get(&connection.a)?;
        let b = self.devices.get(&connection.b)?;
        Some(costs.cost(a.device_type, b.device_type))
    }

    /// Snapshot the network as a graph: every device is a node, every
    /// connection becomes two directed edges of equal cost.
    pub fn to_graph(&self, costs: &impl CostModel) -> Graph<Uuid> {
        let mut graph = Graph::new();

        for id in self.devices.keys() {
            graph.add_node(*id);
        }

        for connection in &self.connections {
            if let Some(weight) = self.link_cost(connection, costs) {
                graph.add_undirected_edge(connection.a, connection.b, weight);
            }
        }

        graph
    }

    /// Distances and predecessors from one device to every other
    pub fn shortest_paths_from(
        &self,
        source: Uuid,
        costs: &impl CostModel,
    ) -> Result<ShortestPaths<Uuid>> {
        self.require_device(source)?;
        let graph = self.to_graph(costs);
        Ok(ShortestPathEngine::compute_distances(&graph, &source)?)
    }

    /// Find the least-cost route between two devices
    pub fn find_route(&self, source: Uuid, target: Uuid, costs: &impl CostModel) -> Result<Route> {
        self.require_device(target)?;
        let paths = self.shortest_paths_from(source, costs)?;

        let devices = paths.path_to(&target);
        let total_cost = paths
            .distance(&target)
            .value()
            .filter(|_| !devices.is_empty())
            .ok_or(NetpathError::NoPath {
                from: source,
                to: target,
            })?;

        tracing::debug!(hops = devices.len().saturating_sub(1), total_cost, "Route found");

        Ok(Route {
            devices,
            total_cost,
        })
    }

    /// Labels of the devices along a route
    pub fn route_labels(&self, route: &Route) -> Vec<String> {
        route
            .devices
            .iter()
            .filter_map(|id| self.devices.get(id))
            .map(Device::label)
            .collect()
    }

    fn require_device(&self, id: Uuid) -> Result<&Device> {
        self.devices.get(&id).ok_or(NetpathError::DeviceNotFound(id))
    }
}

/// True if the point lies within [`CONNECTION_HIT_DISTANCE`] of the line
/// through `p1` and `p2` and inside the segment's bounding box, padded by the
/// same distance so horizontal and vertical links stay clickable.
fn is_point_near_segment(px: f64, py: f64, p1: (f64, f64), p2: (f64, f64)) -> bool {
    let (x1, y1) = p1;
    let (x2, y2) = p2;

    let length = (y2 - y1).hypot(x2 - x1);
    if length == 0.0 {
        return false;
    }

    let distance = ((y2 - y1) * px - (x2 - x1) * py + x2 * y1 - y2 * x1).abs() / length;

    let pad = CONNECTION_HIT_DISTANCE;
    let in_box = x1.min(x2) - pad <= px
        && px <= x1.max(x2) + pad
        && y1.min(y2) - pad <= py
        && py <= y1.max(y2) + pad;

    in_box && distance < CONNECTION_HIT_DISTANCE
}
