use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::debug;

use crate::error::AssignError;
use crate::geo::Position;
use crate::node::{Node, NodeKind};

/// The 15-node US reference network: ten metro demand regions and five
/// distribution centers.
const REFERENCE_TABLE: &str = include_str!("../data/us_network.csv");

/// One row of a node table. Header names follow `name,kind,lat,lon,volume`;
/// the `Name,Type,Lat,Lon,Volume` spelling is accepted too.
#[derive(Debug, Deserialize)]
struct NodeRecord {
    #[serde(alias = "Name")]
    name: String,
    #[serde(alias = "Type", alias = "type")]
    kind: String,
    #[serde(alias = "Lat")]
    lat: f64,
    #[serde(alias = "Lon")]
    lon: f64,
    #[serde(alias = "Volume")]
    volume: f64,
}

impl TryFrom<NodeRecord> for Node {
    type Error = AssignError;

    fn try_from(record: NodeRecord) -> Result<Self, Self::Error> {
        let kind: NodeKind = record
            .kind
            .parse()
            .map_err(|kind| AssignError::UnknownKind {
                name: record.name.clone(),
                kind,
            })?;
        let position = Position::new(record.lat, record.lon);
        Node::new(record.name, kind, position, record.volume)
    }
}

/// Reads a node table from any CSV source with a header row.
pub fn read_nodes<R: Read>(reader: R) -> Result<Vec<Node>, AssignError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut nodes = Vec::new();
    for result in rdr.deserialize::<NodeRecord>() {
        nodes.push(Node::try_from(result?)?);
    }
    debug!(count = nodes.len(), "read node table");
    Ok(nodes)
}

pub fn load_nodes<P: AsRef<Path>>(path: P) -> Result<Vec<Node>, AssignError> {
    let file = File::open(path).map_err(csv::Error::from)?;
    read_nodes(file)
}

pub fn reference_nodes() -> Result<Vec<Node>, AssignError> {
    read_nodes(REFERENCE_TABLE.as_bytes())
}

/// Splits a mixed node list by kind, keeping input order within each side.
#[derive(Debug, Default)]
pub struct Partition {
    pub facilities: Vec<Node>,
    pub demands: Vec<Node>,
}

impl Partition {
    pub fn of(nodes: &[Node]) -> Self {
        let (facilities, demands): (Vec<Node>, Vec<Node>) =
            nodes.iter().cloned().partition(|n| n.is_facility());
        Self { facilities, demands }
    }
}
