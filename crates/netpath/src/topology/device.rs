//! Devices placed in a network

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::NetpathError;

/// Kind of network device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeviceType {
    #[serde(rename = "PC")]
    Pc,
    Switch,
    Router,
}

impl DeviceType {
    pub const ALL: [DeviceType; 3] = [DeviceType::Pc, DeviceType::Switch, DeviceType::Router];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Pc => "PC",
            DeviceType::Switch => "Switch",
            DeviceType::Router => "Router",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = NetpathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pc" => Ok(DeviceType::Pc),
            "switch" => Ok(DeviceType::Switch),
            "router" => Ok(DeviceType::Router),
            _ => Err(NetpathError::UnknownDeviceType(s.to_string())),
        }
    }
}

/// A device on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: Uuid,
    pub device_type: DeviceType,
    /// Per-type sequence number, shown in labels such as "Router 2"
    pub number: u32,
    pub x: f64,
    pub y: f64,
}

impl Device {
    pub fn new(device_type: DeviceType, number: u32, x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            device_type,
            number,
            x,
            y,
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.device_type, self.number)
    }

    /// Parse a label such as "Switch 3" into its type and number
    pub fn parse_label(label: &str) -> Option<(DeviceType, u32)> {
        let mut parts = label.split_whitespace();
        let device_type = parts.next()?.parse().ok()?;
        let number = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some((device_type, number))
    }
}
