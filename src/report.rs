// Output surfaces for whatever draws the network: a flat routes table, a full
// JSON document and the plain-text KPI snapshot.
use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::assign::{Assignment, FacilityGroup, NetworkSummary, Route};
use crate::node::Node;

/// Writes `facility,demand,distance_km`, one row per route in route order.
pub fn write_routes_csv<W: Write>(
    writer: W,
    assignment: &Assignment<'_>,
) -> csv::Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["facility", "demand", "distance_km"])?;
    for route in &assignment.routes {
        let km = format!("{:.6}", route.distance_km);
        wtr.write_record([
            route.origin.name.as_str(),
            route.destination.name.as_str(),
            km.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct NetworkDocument<'a> {
    nodes: &'a [Node],
    routes: &'a [Route<'a>],
    groups: &'a [FacilityGroup<'a>],
    summary: &'a NetworkSummary,
}

/// Everything a map layer needs: node markers, routes, per-facility layers and
/// the summary, as pretty-printed JSON.
pub fn to_json(
    nodes: &[Node],
    assignment: &Assignment<'_>,
) -> serde_json::Result<String> {
    let doc = NetworkDocument {
        nodes,
        routes: &assignment.routes,
        groups: &assignment.groups,
        summary: &assignment.summary,
    };
    serde_json::to_string_pretty(&doc)
}

pub fn snapshot(summary: &NetworkSummary) -> String {
    format!(
        "Network Snapshot\n  \
         Active Nodes:  {}\n  \
         Dist Centres:  {}\n  \
         Routes:        {}\n  \
         Avg Delivery:  {} km",
        summary.node_count,
        summary.facility_count,
        summary.route_count,
        summary.average_distance_km_whole(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::assign;

    fn sample() -> (Vec<Node>, Vec<Node>) {
        let facilities = vec![
            Node::facility("F1", 0.0, 0.0, 100.0).unwrap(),
            Node::facility("F2", 0.0, 10.0, 50.0).unwrap(),
        ];
        let demands = vec![Node::demand("D", 0.0, 1.0, 7.0).unwrap()];
        (facilities, demands)
    }

    #[test]
    fn routes_csv() {
        let (facilities, demands) = sample();
        let result = assign(&facilities, &demands).unwrap();

        let mut buf = Vec::new();
        write_routes_csv(&mut buf, &result).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "facility,demand,distance_km");
        assert!(lines[1].starts_with("F1,D,111.19"), "got {}", lines[1]);
    }

    #[test]
    fn json_document_lists_every_facility() {
        let (facilities, demands) = sample();
        let result = assign(&facilities, &demands).unwrap();
        let mut nodes = facilities.clone();
        nodes.extend(demands.iter().cloned());

        let json = to_json(&nodes, &result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(value["nodes"][0]["kind"], "Facility");
        assert_eq!(value["nodes"][2]["position"]["lon"], 1.0);
        assert_eq!(value["routes"][0]["origin"], "F1");
        assert_eq!(value["routes"][0]["destination"], "D");
        assert_eq!(value["groups"].as_array().unwrap().len(), 2);
        assert_eq!(value["groups"][1]["facility"], "F2");
        assert!(value["groups"][1]["routes"].as_array().unwrap().is_empty());
        assert_eq!(value["summary"]["route_count"], 1);
    }

    #[test]
    fn json_without_demands_has_no_negative_zero() {
        let (facilities, _) = sample();
        let result = assign(&facilities, &[]).unwrap();

        let json = to_json(&facilities, &result).unwrap();
        assert!(!json.contains("-0.0"), "{}", json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["total_distance_km"], 0.0);
        assert_eq!(value["summary"]["average_distance_km"], 0.0);
    }

    #[test]
    fn snapshot_truncates_average() {
        let summary = NetworkSummary {
            node_count: 15,
            facility_count: 5,
            route_count: 10,
            total_distance_km: 2497.44,
            average_distance_km: 249.744,
        };
        let text = snapshot(&summary);
        assert!(text.contains("Active Nodes:  15"));
        assert!(text.contains("Dist Centres:  5"));
        assert!(text.contains("Avg Delivery:  249 km"));
    }

    #[test]
    fn snapshot_without_routes() {
        let text = snapshot(&NetworkSummary::default());
        assert!(text.contains("Avg Delivery:  0 km"));
    }
}
