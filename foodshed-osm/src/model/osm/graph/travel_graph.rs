use super::{OsmGraph, OsmNodeId};
use crate::{
    algorithm::projection::UtmZone,
    model::{osm::OsmError, TravelMode},
};
use geo::{Coord, LineString, Point};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// dense index of a node in a [`TravelGraph`]
pub type NodeIndex = usize;
/// dense index of an edge in a [`TravelGraph`]
pub type EdgeIndex = usize;

/// a graph node in projected coordinates (meters)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelNode {
    pub osmid: OsmNodeId,
    pub x: f64,
    pub y: f64,
}

impl TravelNode {
    pub fn point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}

/// a directed graph edge with projected geometry. length is in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelEdge {
    pub src: NodeIndex,
    pub dst: NodeIndex,
    pub length_m: f64,
    pub geometry: LineString<f64>,
}

/// the routable, projected network for one travel mode. built once per mode
/// and read-only thereafter, so it can be shared across worker threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelGraph {
    mode: TravelMode,
    crs: UtmZone,
    nodes: Vec<TravelNode>,
    edges: Vec<TravelEdge>,
    out_edges: Vec<Vec<EdgeIndex>>,
}

impl TravelGraph {
    /// creates a graph from projected nodes and edges, validating edge
    /// endpoints and lengths.
    pub fn new(
        mode: TravelMode,
        crs: UtmZone,
        nodes: Vec<TravelNode>,
        edges: Vec<TravelEdge>,
    ) -> Result<TravelGraph, OsmError> {
        let mut out_edges: Vec<Vec<EdgeIndex>> = vec![vec![]; nodes.len()];
        for (edge_idx, edge) in edges.iter().enumerate() {
            if edge.src >= nodes.len() || edge.dst >= nodes.len() {
                return Err(OsmError::GraphModificationError(format!(
                    "edge {edge_idx} connects ({}, {}) but graph has {} nodes",
                    edge.src,
                    edge.dst,
                    nodes.len()
                )));
            }
            if !edge.length_m.is_finite() || edge.length_m < 0.0 {
                return Err(OsmError::GraphModificationError(format!(
                    "edge {edge_idx} has invalid length {}",
                    edge.length_m
                )));
            }
            out_edges[edge.src].push(edge_idx);
        }
        Ok(TravelGraph {
            mode,
            crs,
            nodes,
            edges,
            out_edges,
        })
    }

    /// vectorizes an imported [`OsmGraph`] and projects its coordinates into
    /// the provided UTM zone. node indices follow sorted OSMID order.
    pub fn from_osm_graph(
        mode: TravelMode,
        graph: &OsmGraph,
        crs: UtmZone,
    ) -> Result<TravelGraph, OsmError> {
        let transformer = crs.transformer()?;
        let node_ids = graph.node_ids();
        let lookup: HashMap<OsmNodeId, NodeIndex> = node_ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (*id, idx))
            .collect();

        let nodes = node_ids
            .iter()
            .map(|id| {
                let node = graph.get_node_data(id)?;
                let projected = transformer.to_projected(node.get_coord())?;
                Ok(TravelNode {
                    osmid: *id,
                    x: projected.x,
                    y: projected.y,
                })
            })
            .collect::<Result<Vec<_>, OsmError>>()?;

        let edges = graph
            .segments_iter()
            .map(|segment| {
                let (src, dst) = match (segment.src(), segment.dst()) {
                    (Some(s), Some(d)) => (s, d),
                    _ => {
                        return Err(OsmError::InternalError(format!(
                            "segment without endpoints: {segment}"
                        )))
                    }
                };
                let src_idx = lookup
                    .get(src)
                    .ok_or(OsmError::GraphMissingNodeId(*src))?;
                let dst_idx = lookup
                    .get(dst)
                    .ok_or(OsmError::GraphMissingNodeId(*dst))?;
                let coords = segment
                    .geometry
                    .coords()
                    .map(|coord| transformer.to_projected(*coord))
                    .collect::<Result<Vec<Coord<f64>>, OsmError>>()?;
                Ok(TravelEdge {
                    src: *src_idx,
                    dst: *dst_idx,
                    length_m: segment.length_m,
                    geometry: LineString::new(coords),
                })
            })
            .collect::<Result<Vec<_>, OsmError>>()?;

        TravelGraph::new(mode, crs, nodes, edges)
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn crs(&self) -> UtmZone {
        self.crs
    }

    pub fn nodes(&self) -> &[TravelNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[TravelEdge] {
        &self.edges
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, node_idx: NodeIndex) -> Option<&TravelNode> {
        self.nodes.get(node_idx)
    }

    pub fn edge(&self, edge_idx: EdgeIndex) -> Option<&TravelEdge> {
        self.edges.get(edge_idx)
    }

    /// outgoing edge indices for a node, empty when the node does not exist
    pub fn out_edges(&self, node_idx: NodeIndex) -> &[EdgeIndex] {
        match self.out_edges.get(node_idx) {
            Some(edges) => edges.as_slice(),
            None => &[],
        }
    }

    /// osmids of the requested node indices, for fingerprinting
    pub fn osmids(&self, node_indices: &[NodeIndex]) -> Vec<OsmNodeId> {
        node_indices
            .iter()
            .filter_map(|idx| self.nodes.get(*idx).map(|n| n.osmid))
            .collect_vec()
    }
}
