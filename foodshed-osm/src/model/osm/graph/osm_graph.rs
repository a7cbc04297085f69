use super::{
    AdjacencyDirection as Dir, AdjacencyList, OsmNodeData, OsmNodeId, OsmNodes, OsmSegment,
    OsmSegmentsByOd, OsmWays, WayDirection,
};
use crate::model::{osm::OsmError, TravelMode};
use geo::{Distance, Haversine, LineString};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// a directed multigraph over OSM nodes used while importing a travel network.
/// nodes are only retained while they are connected to at least one segment.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct OsmGraph {
    /// the collection of OSM nodes associated via their OSMID
    nodes: OsmNodes,
    /// segments are stored wrt their src/dst node pairs
    segments: OsmSegmentsByOd,
    /// forward and reverse adjacency list
    adj: AdjacencyList,
}

impl OsmGraph {
    pub fn empty() -> OsmGraph {
        OsmGraph {
            nodes: HashMap::new(),
            segments: HashMap::new(),
            adj: HashMap::new(),
        }
    }

    /// creates a new graph from the provided nodes and ways. each consecutive
    /// pair of way nodes becomes a segment, added in the directions the
    /// travel mode allows along that way.
    pub fn new(nodes: &OsmNodes, ways: &OsmWays, mode: &TravelMode) -> Result<OsmGraph, OsmError> {
        let mut graph = OsmGraph::empty();
        // sorted for deterministic insertion order
        let sorted_ways = ways.iter().sorted_by_key(|w| w.osmid);
        for way in sorted_ways {
            let direction = way.direction(mode);
            for (src_id, dst_id) in way.nodes.iter().tuple_windows() {
                let src_node = nodes
                    .get(src_id)
                    .ok_or(OsmError::GraphMissingNodeId(*src_id))?;
                let dst_node = nodes
                    .get(dst_id)
                    .ok_or(OsmError::GraphMissingNodeId(*dst_id))?;
                let length_m = Haversine.distance(src_node.get_point(), dst_node.get_point());

                if !graph.contains_node(src_id) {
                    graph.insert_node(src_node.clone());
                }
                if !graph.contains_node(dst_id) {
                    graph.insert_node(dst_node.clone());
                }
                let (src_coord, dst_coord) = (src_node.get_coord(), dst_node.get_coord());
                if matches!(direction, WayDirection::Both | WayDirection::Forward) {
                    let segment = OsmSegment::new(
                        way.osmid,
                        vec![*src_id, *dst_id],
                        LineString::new(vec![src_coord, dst_coord]),
                        length_m,
                    );
                    graph.add_segment(segment)?;
                }
                if matches!(direction, WayDirection::Both | WayDirection::Reverse) {
                    let segment = OsmSegment::new(
                        way.osmid,
                        vec![*dst_id, *src_id],
                        LineString::new(vec![dst_coord, src_coord]),
                        length_m,
                    );
                    graph.add_segment(segment)?;
                }
            }
        }
        Ok(graph)
    }

    /// number of nodes currently in the graph
    pub fn n_connected_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// number of directed segments. since this is a multigraph, there may be
    /// more than 1 segment between some pair (u, v).
    pub fn n_segments(&self) -> usize {
        self.segments.values().map(|s| s.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains_node(&self, node_id: &OsmNodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// adds a node without connecting it. nodes with no segments are removed
    /// by [`OsmGraph::disconnect_node`] or ignored by vectorization.
    pub fn insert_node(&mut self, node: OsmNodeData) {
        self.nodes.insert(node.osmid, node);
    }

    /// helper with error handling for getting the node data for a given node id
    pub fn get_node_data(&self, node_id: &OsmNodeId) -> Result<&OsmNodeData, OsmError> {
        self.nodes
            .get(node_id)
            .ok_or(OsmError::GraphMissingNodeId(*node_id))
    }

    /// all node ids, sorted for deterministic iteration
    pub fn node_ids(&self) -> Vec<OsmNodeId> {
        self.nodes.keys().cloned().sorted().collect_vec()
    }

    /// adds a directed segment. both endpoints must already be in the graph.
    pub fn add_segment(&mut self, segment: OsmSegment) -> Result<(), OsmError> {
        let (src, dst) = match (segment.src(), segment.dst()) {
            (Some(src), Some(dst)) if segment.path.len() > 1 => (*src, *dst),
            _ => {
                return Err(OsmError::GraphModificationError(format!(
                    "cannot add segment with fewer than two nodes: {segment}"
                )))
            }
        };
        for node_id in [src, dst] {
            if !self.contains_node(&node_id) {
                return Err(OsmError::GraphMissingNodeId(node_id));
            }
        }
        self.segments.entry((src, dst)).or_default().push(segment);
        self.adj.entry((src, Dir::Forward)).or_default().insert(dst);
        self.adj.entry((dst, Dir::Reverse)).or_default().insert(src);
        Ok(())
    }

    /// neighbors of a node in one direction, sorted
    pub fn get_neighbors(&self, node_id: &OsmNodeId, direction: Dir) -> Vec<OsmNodeId> {
        match self.adj.get(&(*node_id, direction)) {
            Some(neighbors) => neighbors.iter().cloned().sorted().collect_vec(),
            None => vec![],
        }
    }

    pub fn get_out_neighbors(&self, node_id: &OsmNodeId) -> Vec<OsmNodeId> {
        self.get_neighbors(node_id, Dir::Forward)
    }

    pub fn get_in_neighbors(&self, node_id: &OsmNodeId) -> Vec<OsmNodeId> {
        self.get_neighbors(node_id, Dir::Reverse)
    }

    /// the union of successors and predecessors of a node
    pub fn get_undirected_neighbors(&self, node_id: &OsmNodeId) -> HashSet<OsmNodeId> {
        let mut neighbors: HashSet<OsmNodeId> = HashSet::new();
        for dir in [Dir::Forward, Dir::Reverse] {
            if let Some(adj) = self.adj.get(&(*node_id, dir)) {
                neighbors.extend(adj.iter().cloned());
            }
        }
        neighbors
    }

    /// segments from origin to destination, if any
    pub fn get_segments(&self, origin: &OsmNodeId, destination: &OsmNodeId) -> &[OsmSegment] {
        match self.segments.get(&(*origin, *destination)) {
            Some(segments) => segments.as_slice(),
            None => &[],
        }
    }

    /// number of segments incident to a node in one direction, counting parallel segments
    pub fn node_degree_for_direction(&self, node_id: &OsmNodeId, dir: Dir) -> usize {
        self.get_neighbors(node_id, dir)
            .iter()
            .map(|other| match dir {
                Dir::Forward => self.get_segments(node_id, other).len(),
                Dir::Reverse => self.get_segments(other, node_id).len(),
            })
            .sum()
    }

    /// number of in and out segments, matching a networkx MultiDiGraph degree
    pub fn node_degree(&self, node_id: &OsmNodeId) -> usize {
        self.node_degree_for_direction(node_id, Dir::Forward)
            + self.node_degree_for_direction(node_id, Dir::Reverse)
    }

    /// iterates over all segments in sorted (src, dst) order
    pub fn segments_iter(&self) -> impl Iterator<Item = &OsmSegment> {
        self.segments
            .iter()
            .sorted_by_key(|(od, _)| **od)
            .flat_map(|(_, segments)| segments.iter())
    }

    /// removes every segment from origin to destination, returning them
    pub fn remove_segments(&mut self, origin: &OsmNodeId, destination: &OsmNodeId) -> Vec<OsmSegment> {
        let removed = self
            .segments
            .remove(&(*origin, *destination))
            .unwrap_or_default();
        remove_adjacency(&mut self.adj, origin, Dir::Forward, destination);
        remove_adjacency(&mut self.adj, destination, Dir::Reverse, origin);
        removed
    }

    /// removes a node and every segment touching it.
    ///
    /// # Arguments
    /// * `node_id` - node to remove
    /// * `fail_if_missing` - if true, error when the node is not in the graph
    pub fn disconnect_node(
        &mut self,
        node_id: &OsmNodeId,
        fail_if_missing: bool,
    ) -> Result<(), OsmError> {
        if self.nodes.remove(node_id).is_none() && fail_if_missing {
            return Err(OsmError::GraphMissingNodeId(*node_id));
        }
        for dst in self.get_out_neighbors(node_id) {
            let _ = self.remove_segments(node_id, &dst);
        }
        for src in self.get_in_neighbors(node_id) {
            let _ = self.remove_segments(&src, node_id);
        }
        self.adj.remove(&(*node_id, Dir::Forward));
        self.adj.remove(&(*node_id, Dir::Reverse));
        Ok(())
    }

    /// drops any node that no longer has a segment attached.
    pub fn remove_isolated_nodes(&mut self) -> usize {
        let isolated = self
            .nodes
            .keys()
            .filter(|n| {
                self.adj.get(&(**n, Dir::Forward)).map_or(true, |a| a.is_empty())
                    && self.adj.get(&(**n, Dir::Reverse)).map_or(true, |a| a.is_empty())
            })
            .cloned()
            .collect_vec();
        for node_id in isolated.iter() {
            self.nodes.remove(node_id);
        }
        isolated.len()
    }
}

fn remove_adjacency(adj: &mut AdjacencyList, node_id: &OsmNodeId, dir: Dir, other: &OsmNodeId) {
    if let Some(neighbors) = adj.get_mut(&(*node_id, dir)) {
        neighbors.remove(other);
        if neighbors.is_empty() {
            adj.remove(&(*node_id, dir));
        }
    }
}
