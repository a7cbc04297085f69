use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

use super::OsmNodeId;

/// an OSM node in geographic coordinates (x = longitude, y = latitude, WGS84 degrees).
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmNodeData {
    pub osmid: OsmNodeId,
    pub x: f64,
    pub y: f64,
}

impl OsmNodeData {
    pub fn new(osmid: OsmNodeId, x: f64, y: f64) -> OsmNodeData {
        OsmNodeData { osmid, x, y }
    }

    pub fn get_point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }

    pub fn get_coord(&self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

impl From<&osmpbf::Node<'_>> for OsmNodeData {
    fn from(node: &osmpbf::Node<'_>) -> Self {
        OsmNodeData::new(OsmNodeId(node.id()), node.lon(), node.lat())
    }
}

impl From<&osmpbf::DenseNode<'_>> for OsmNodeData {
    fn from(node: &osmpbf::DenseNode<'_>) -> Self {
        OsmNodeData::new(OsmNodeId(node.id()), node.lon(), node.lat())
    }
}
