//! Link costs between device types

use serde::{Deserialize, Serialize};

use super::device::DeviceType;
use crate::{NetpathError, Result};

/// Smallest cost a link may carry
pub const MIN_LINK_COST: f64 = 1.0;

const COST_KEYS: [&str; 6] = [
    "pc_pc",
    "pc_switch",
    "pc_router",
    "switch_switch",
    "switch_router",
    "router_router",
];

/// Cost of a link between two device types. Must be symmetric.
pub trait CostModel {
    fn cost(&self, a: DeviceType, b: DeviceType) -> f64;
}

impl<F> CostModel for F
where
    F: Fn(DeviceType, DeviceType) -> f64,
{
    fn cost(&self, a: DeviceType, b: DeviceType) -> f64 {
        self(a, b)
    }
}

/// Per-pair link costs, loaded from the `[costs]` config table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTable {
    #[serde(default = "default_pc_pc")]
    pub pc_pc: f64,
    #[serde(default = "default_pc_switch")]
    pub pc_switch: f64,
    #[serde(default = "default_pc_router")]
    pub pc_router: f64,
    #[serde(default = "default_switch_switch")]
    pub switch_switch: f64,
    #[serde(default = "default_switch_router")]
    pub switch_router: f64,
    #[serde(default = "default_router_router")]
    pub router_router: f64,
}

fn default_pc_pc() -> f64 {
    1.0
}

fn default_pc_switch() -> f64 {
    1.0
}

fn default_pc_router() -> f64 {
    2.0
}

fn default_switch_switch() -> f64 {
    2.0
}

fn default_switch_router() -> f64 {
    2.0
}

fn default_router_router() -> f64 {
    3.0
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            pc_pc: default_pc_pc(),
            pc_switch: default_pc_switch(),
            pc_router: default_pc_router(),
            switch_switch: default_switch_switch(),
            switch_router: default_switch_router(),
            router_router: default_router_router(),
        }
    }
}

impl CostTable {
    /// Check that a single cost is finite and at least `MIN_LINK_COST`
    pub fn check_cost(key: &str, cost: f64) -> Result<()> {
        if cost.is_finite() && cost >= MIN_LINK_COST {
            Ok(())
        } else {
            Err(NetpathError::ConfigError(format!(
                "Cost {} must be a finite number >= {}, got {}",
                key, MIN_LINK_COST, cost
            )))
        }
    }

    /// Check every cost in the table
    pub fn validate(&self) -> Result<()> {
        for key in COST_KEYS {
            if let Some(cost) = self.get(key) {
                Self::check_cost(key, cost)?;
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "pc_pc" => Some(self.pc_pc),
            "pc_switch" => Some(self.pc_switch),
            "pc_router" => Some(self.pc_router),
            "switch_switch" => Some(self.switch_switch),
            "switch_router" => Some(self.switch_router),
            "router_router" => Some(self.router_router),
            _ => None,
        }
    }

    /// Mutable slot for a cost key such as "pc_router"
    pub fn entry_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "pc_pc" => Some(&mut self.pc_pc),
            "pc_switch" => Some(&mut self.pc_switch),
            "pc_router" => Some(&mut self.pc_router),
            "switch_switch" => Some(&mut self.switch_switch),
            "switch_router" => Some(&mut self.switch_router),
            "router_router" => Some(&mut self.router_router),
            _ => None,
        }
    }
}

impl CostModel for CostTable {
    fn cost(&self, a: DeviceType, b: DeviceType) -> f64 {
        use DeviceType::*;

        match (a, b) {
            (Pc, Pc) => self.pc_pc,
            (Pc, Switch) | (Switch, Pc) => self.pc_switch,
            (Pc, Router) | (Router, Pc) => self.pc_router,
            (Switch, Switch) => self.switch_switch,
            (Switch, Router) | (Router, Switch) => self.switch_router,
            (Router, Router) => self.router_router,
        }
    }
}
