mod adjacency_direction;
pub mod osm_element_filter;
pub mod osm_graph;
pub mod osm_node_data;
mod osm_node_id;
pub mod osm_segment;
pub mod osm_way_data;
mod osm_way_id;
pub mod travel_graph;

pub use adjacency_direction::AdjacencyDirection;
pub use osm_graph::OsmGraph;
pub use osm_node_data::OsmNodeData;
pub use osm_node_id::OsmNodeId;
pub use osm_segment::OsmSegment;
pub use osm_way_data::{OsmWayData, WayDirection};
pub use osm_way_id::OsmWayId;
pub use travel_graph::{EdgeIndex, NodeIndex, TravelEdge, TravelGraph, TravelNode};

use std::collections::{HashMap, HashSet};

pub type OsmNodes = HashMap<OsmNodeId, OsmNodeData>;
/// ways may appear more than once per OSMID when a way was split
/// around nodes that were not imported.
pub type OsmWays = Vec<OsmWayData>;
/// parallel segments are stored wrt their src/dst node pairs
pub type OsmSegmentsByOd = HashMap<(OsmNodeId, OsmNodeId), Vec<OsmSegment>>;
pub type AdjacencyList = HashMap<(OsmNodeId, AdjacencyDirection), HashSet<OsmNodeId>>;
