use thiserror::Error;

use crate::node::NodeKind;

/// Everything that can stop an assignment run before it starts.
///
/// All variants except `Csv` are precondition violations: they are detected
/// while validating input, before any route is computed.
#[derive(Debug, Error)]
pub enum AssignError {
    #[error("no facilities given; nearest-facility assignment is undefined")]
    NoFacilities,

    #[error("node {name:?} has unknown kind {kind:?} (expected \"Demand\" or \"Facility\")")]
    UnknownKind { name: String, kind: String },

    #[error("node {name:?} has invalid volume {volume} (must be a finite, non-negative number)")]
    InvalidVolume { name: String, volume: f64 },

    #[error("node {name:?} has non-numeric position ({lat}, {lon})")]
    InvalidPosition { name: String, lat: f64, lon: f64 },

    #[error("duplicate node name {0:?}")]
    DuplicateName(String),

    #[error("node {name:?} is a {found} but was passed as a {expected}")]
    KindMismatch {
        name: String,
        expected: NodeKind,
        found: NodeKind,
    },

    #[error("reading node table: {0}")]
    Csv(#[from] csv::Error),
}
