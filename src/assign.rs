use fnv::FnvHashSet;
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::error::AssignError;
use crate::geo::{haversine_km, planar_sq, Position};
use crate::node::{Node, NodeKind};

fn serialize_name<S: Serializer>(node: &&Node, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&node.name)
}

/// One demand node served by its nearest facility.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Route<'a> {
    #[serde(serialize_with = "serialize_name")]
    pub origin: &'a Node,
    #[serde(serialize_with = "serialize_name")]
    pub destination: &'a Node,
    pub distance_km: f64,
}

/// The routes a single facility ended up serving, in demand input order.
#[derive(Clone, Debug, Serialize)]
pub struct FacilityGroup<'a> {
    #[serde(serialize_with = "serialize_name")]
    pub facility: &'a Node,
    pub routes: Vec<Route<'a>>,
}

impl FacilityGroup<'_> {
    /// Total demand volume routed through this facility.
    pub fn served_volume(&self) -> f64 {
        self.routes
            .iter()
            .fold(0.0, |acc, r| acc + r.destination.volume)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub node_count: usize,
    pub facility_count: usize,
    pub route_count: usize,
    pub total_distance_km: f64,
    /// Full precision; 0 when there are no routes.
    pub average_distance_km: f64,
}

impl NetworkSummary {
    fn from_routes(facility_count: usize, routes: &[Route<'_>]) -> Self {
        let route_count = routes.len();
        // fold from +0.0: an empty f64 sum() yields -0.0
        let total_distance_km = routes.iter().fold(0.0, |acc, r| acc + r.distance_km);
        let average_distance_km = if route_count > 0 {
            total_distance_km / route_count as f64
        } else {
            0.0
        };
        Self {
            node_count: facility_count + route_count,
            facility_count,
            route_count,
            total_distance_km,
            average_distance_km,
        }
    }

    /// Average distance truncated to whole kilometers, for display.
    pub fn average_distance_km_whole(&self) -> u64 {
        self.average_distance_km.trunc() as u64
    }
}

/// Result of one assignment pass. Borrows the node slices it was built from.
#[derive(Clone, Debug, Serialize)]
pub struct Assignment<'a> {
    pub routes: Vec<Route<'a>>,
    /// One entry per facility, in facility input order, including idle ones.
    pub groups: Vec<FacilityGroup<'a>>,
    pub summary: NetworkSummary,
}

impl<'a> Assignment<'a> {
    pub fn group(&self, facility_name: &str) -> Option<&FacilityGroup<'a>> {
        self.groups.iter().find(|g| g.facility.name == facility_name)
    }
}

/// Index of the facility closest to `target` by squared planar distance.
///
/// Scans in order and only moves on a strict improvement, so exact ties go to
/// the earliest facility. NaN distances never win over a real one.
pub fn nearest_facility(facilities: &[Node], target: Position) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, facility) in facilities.iter().enumerate() {
        let d = planar_sq(facility.position, target);
        let better = match best {
            None => true,
            Some((_, best_d)) => d < best_d || (best_d.is_nan() && !d.is_nan()),
        };
        if better {
            best = Some((idx, d));
        }
    }
    best.map(|(idx, _)| idx)
}

fn validate(facilities: &[Node], demands: &[Node]) -> Result<(), AssignError> {
    if facilities.is_empty() {
        return Err(AssignError::NoFacilities);
    }
    let expected = facilities
        .iter()
        .map(|n| (n, NodeKind::Facility))
        .chain(demands.iter().map(|n| (n, NodeKind::Demand)));

    let mut seen: FnvHashSet<&str> = FnvHashSet::default();
    for (node, kind) in expected {
        if node.kind != kind {
            return Err(AssignError::KindMismatch {
                name: node.name.clone(),
                expected: kind,
                found: node.kind,
            });
        }
        if !seen.insert(node.name.as_str()) {
            return Err(AssignError::DuplicateName(node.name.clone()));
        }
    }
    Ok(())
}

/// Routes every demand node to its nearest facility.
///
/// The facility is picked by planar distance in degree space; the distance
/// reported on the route is the great-circle one, computed separately. The
/// two can disagree on which facility is nearest for inputs straddling the
/// antimeridian or close to a pole.
///
/// Input is validated in full before anything is computed, so either every
/// demand gets a route or nothing is returned.
pub fn assign<'a>(
    facilities: &'a [Node],
    demands: &'a [Node],
) -> Result<Assignment<'a>, AssignError> {
    validate(facilities, demands)?;
    if demands.is_empty() {
        warn!(facilities = facilities.len(), "no demand nodes to assign");
    }

    let mut groups: Vec<FacilityGroup<'a>> = facilities
        .iter()
        .map(|facility| FacilityGroup {
            facility,
            routes: Vec::new(),
        })
        .collect();
    let mut routes = Vec::with_capacity(demands.len());

    for demand in demands {
        let idx =
            nearest_facility(facilities, demand.position).ok_or(AssignError::NoFacilities)?;
        let origin = &facilities[idx];
        let distance_km = haversine_km(origin.position, demand.position);
        debug!(
            demand = %demand.name,
            facility = %origin.name,
            distance_km,
            "assigned"
        );

        let route = Route {
            origin,
            destination: demand,
            distance_km,
        };
        groups[idx].routes.push(route);
        routes.push(route);
    }

    let summary = NetworkSummary::from_routes(facilities.len(), &routes);
    info!(
        nodes = summary.node_count,
        facilities = summary.facility_count,
        routes = summary.route_count,
        total_km = summary.total_distance_km,
        avg_km = summary.average_distance_km,
        "assignment complete"
    );

    Ok(Assignment {
        routes,
        groups,
        summary,
    })
}
