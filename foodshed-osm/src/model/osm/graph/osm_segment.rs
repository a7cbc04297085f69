use std::fmt::Display;

use geo::LineString;
use serde::{Deserialize, Serialize};

use super::{OsmNodeId, OsmWayId};

/// a directed piece of a way between two graph nodes. the path holds every
/// node visited, including both endpoints. the geometry holds their WGS84
/// coordinates in the same order, so a simplified segment keeps its shape
/// after its interstitial nodes leave the graph.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OsmSegment {
    pub way_id: OsmWayId,
    pub path: Vec<OsmNodeId>,
    pub geometry: LineString<f64>,
    /// haversine length of the path in meters
    pub length_m: f64,
}

impl OsmSegment {
    pub fn new(
        way_id: OsmWayId,
        path: Vec<OsmNodeId>,
        geometry: LineString<f64>,
        length_m: f64,
    ) -> OsmSegment {
        OsmSegment {
            way_id,
            path,
            geometry,
            length_m,
        }
    }

    pub fn src(&self) -> Option<&OsmNodeId> {
        self.path.first()
    }

    pub fn dst(&self) -> Option<&OsmNodeId> {
        self.path.last()
    }
}

impl Display for OsmSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let src = self.src().map(|n| n.to_string()).unwrap_or_default();
        let dst = self.dst().map(|n| n.to_string()).unwrap_or_default();
        write!(
            f,
            "OsmSegment of {} from {} to {} over {} nodes ({:.1}m)",
            self.way_id,
            src,
            dst,
            self.path.len(),
            self.length_m
        )
    }
}
