use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AssignError;
use crate::geo::Position;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Demand,
    Facility,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Demand => write!(f, "Demand"),
            NodeKind::Facility => write!(f, "Facility"),
        }
    }
}

impl FromStr for NodeKind {
    type Err = String;

    /// Case-insensitive. "Warehouse" is accepted as another name for a facility.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demand" => Ok(NodeKind::Demand),
            "facility" | "warehouse" => Ok(NodeKind::Facility),
            _ => Err(s.to_string()),
        }
    }
}

/// A located demand region or supply facility.
///
/// `volume` is demand for a `Demand` node and capacity for a `Facility`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub position: Position,
    pub volume: f64,
}

impl Node {
    /// Builds a node, rejecting negative or non-finite volumes and NaN or
    /// infinite coordinates. Finite coordinates are not range-checked.
    pub fn new(
        name: impl Into<String>,
        kind: NodeKind,
        position: Position,
        volume: f64,
    ) -> Result<Self, AssignError> {
        let name = name.into();
        if !position.lat.is_finite() || !position.lon.is_finite() {
            return Err(AssignError::InvalidPosition {
                name,
                lat: position.lat,
                lon: position.lon,
            });
        }
        if !volume.is_finite() || volume < 0.0 {
            return Err(AssignError::InvalidVolume { name, volume });
        }
        Ok(Self {
            name,
            kind,
            position,
            volume,
        })
    }

    pub fn demand(
        name: impl Into<String>,
        lat: f64,
        lon: f64,
        volume: f64,
    ) -> Result<Self, AssignError> {
        Node::new(name, NodeKind::Demand, Position::new(lat, lon), volume)
    }

    pub fn facility(
        name: impl Into<String>,
        lat: f64,
        lon: f64,
        volume: f64,
    ) -> Result<Self, AssignError> {
        Node::new(name, NodeKind::Facility, Position::new(lat, lon), volume)
    }

    pub fn is_facility(&self) -> bool {
        self.kind == NodeKind::Facility
    }
}
