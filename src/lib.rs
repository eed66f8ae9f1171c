//! Nearest-facility assignment for small distribution networks.
//!
//! Demand nodes are routed to the closest facility and the resulting network
//! is summarised with great-circle distances.

pub mod assign;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod node;
pub mod report;

pub use assign::{assign, Assignment, FacilityGroup, NetworkSummary, Route};
pub use error::AssignError;
pub use geo::{haversine_km, Position};
pub use node::{Node, NodeKind};
