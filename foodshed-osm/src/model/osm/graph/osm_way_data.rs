use super::{OsmNodeId, OsmNodes, OsmWayId};
use crate::model::TravelMode;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// the attributes of an OSM way needed to route over it.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmWayData {
    pub osmid: OsmWayId,
    pub nodes: Vec<OsmNodeId>,
    pub highway: Option<String>,
    pub oneway: Option<String>,
    pub junction: Option<String>,
}

/// directions a way may be traversed in, relative to its node ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WayDirection {
    Both,
    Forward,
    Reverse,
}

impl OsmWayData {
    /// oneway tag values treated as one-way, as in osmnx settings
    const ONEWAY_VALUES: [&'static str; 7] = ["yes", "true", "1", "-1", "reverse", "T", "F"];
    /// oneway tag values whose travel direction is opposite the node order
    const REVERSED_VALUES: [&'static str; 3] = ["-1", "reverse", "T"];

    pub fn new(way: &osmpbf::Way<'_>) -> OsmWayData {
        let refs = way.refs().map(OsmNodeId).collect_vec();
        let tags = way.tags().collect_vec();
        OsmWayData::from_tags(OsmWayId(way.id()), refs, &tags)
    }

    /// builds way data from a node path and a list of (key, value) tags.
    /// as in osmnx, consecutive duplicates in the node path are removed.
    pub fn from_tags(osmid: OsmWayId, mut nodes: Vec<OsmNodeId>, tags: &[(&str, &str)]) -> Self {
        nodes.dedup();
        if nodes.len() < 2 {
            log::debug!("way {osmid} has fewer than 2 distinct nodes");
        }
        let mut out = OsmWayData {
            osmid,
            nodes,
            ..Default::default()
        };
        for (k, v) in tags.iter() {
            match *k {
                "highway" => out.highway = Some(String::from(v.trim())),
                "oneway" => out.oneway = Some(String::from(v.trim())),
                "junction" => out.junction = Some(String::from(v.trim())),
                _ => {}
            }
        }
        out
    }

    /// the directions this way may be traversed for a travel mode.
    pub fn direction(&self, mode: &TravelMode) -> WayDirection {
        if mode.ignores_oneway() {
            return WayDirection::Both;
        }
        match self.oneway.as_deref() {
            Some(v) if Self::REVERSED_VALUES.contains(&v) => WayDirection::Reverse,
            Some(v) if Self::ONEWAY_VALUES.contains(&v) => WayDirection::Forward,
            Some(_) => WayDirection::Both,
            None if self.junction.as_deref() == Some("roundabout") => WayDirection::Forward,
            None => WayDirection::Both,
        }
    }

    /// splits this way into runs of consecutive nodes that exist in the node
    /// collection. runs with fewer than two nodes are discarded.
    pub fn split_on_missing_nodes(&self, nodes: &OsmNodes) -> Vec<OsmWayData> {
        let mut result = vec![];
        let mut run: Vec<OsmNodeId> = vec![];
        for node_id in self.nodes.iter() {
            if nodes.contains_key(node_id) {
                run.push(*node_id);
            } else {
                if run.len() > 1 {
                    result.push(self.with_nodes(std::mem::take(&mut run)));
                }
                run.clear();
            }
        }
        if run.len() > 1 {
            result.push(self.with_nodes(run));
        }
        result
    }

    fn with_nodes(&self, nodes: Vec<OsmNodeId>) -> OsmWayData {
        OsmWayData {
            osmid: self.osmid,
            nodes,
            highway: self.highway.clone(),
            oneway: self.oneway.clone(),
            junction: self.junction.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::osm::graph::OsmNodeData;

    fn way(tags: &[(&str, &str)]) -> OsmWayData {
        let nodes = vec![OsmNodeId(1), OsmNodeId(2), OsmNodeId(2), OsmNodeId(3)];
        OsmWayData::from_tags(OsmWayId(10), nodes, tags)
    }

    #[test]
    fn test_dedup_nodes() {
        let w = way(&[("highway", "residential")]);
        assert_eq!(w.nodes, vec![OsmNodeId(1), OsmNodeId(2), OsmNodeId(3)]);
        assert_eq!(w.highway.as_deref(), Some("residential"));
    }

    #[test]
    fn test_direction() {
        let two_way = way(&[("highway", "primary")]);
        let one_way = way(&[("highway", "primary"), ("oneway", "yes")]);
        let reversed = way(&[("highway", "primary"), ("oneway", "-1")]);
        let roundabout = way(&[("highway", "primary"), ("junction", "roundabout")]);
        let drive = TravelMode::Drive;
        assert_eq!(two_way.direction(&drive), WayDirection::Both);
        assert_eq!(one_way.direction(&drive), WayDirection::Forward);
        assert_eq!(reversed.direction(&drive), WayDirection::Reverse);
        assert_eq!(roundabout.direction(&drive), WayDirection::Forward);
        assert_eq!(one_way.direction(&TravelMode::Walk), WayDirection::Both);
    }

    #[test]
    fn test_split_on_missing_nodes() {
        let ids = [1, 2, 3, 4, 5, 6];
        let w = OsmWayData::from_tags(
            OsmWayId(7),
            ids.iter().map(|i| OsmNodeId(*i)).collect(),
            &[("highway", "footway")],
        );
        let nodes: OsmNodes = [1, 2, 4, 5, 6]
            .iter()
            .map(|i| (OsmNodeId(*i), OsmNodeData::new(OsmNodeId(*i), 0.0, 0.0)))
            .collect();
        let parts = w.split_on_missing_nodes(&nodes);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].nodes, vec![OsmNodeId(1), OsmNodeId(2)]);
        assert_eq!(parts[1].nodes, vec![OsmNodeId(4), OsmNodeId(5), OsmNodeId(6)]);
        assert!(parts.iter().all(|p| p.osmid == OsmWayId(7)));
    }
}
