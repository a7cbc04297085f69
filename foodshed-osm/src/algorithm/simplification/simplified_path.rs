use crate::model::osm::{
    graph::{OsmGraph, OsmNodeId, OsmSegment, OsmWayId},
    OsmError,
};
use geo::{Coord, LineString};
use itertools::Itertools;

/// a chain of segments between two endpoint nodes that will be merged into a
/// single segment during simplification.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplifiedPath {
    pub src_node_id: OsmNodeId,
    pub dst_node_id: OsmNodeId,
    pub way_id: OsmWayId,
    pub path: Vec<OsmNodeId>,
    pub segments: Vec<OsmSegment>,
}

impl SimplifiedPath {
    /// collects the segments along a node path. when parallel segments exist
    /// between a pair of nodes, the first one is used.
    pub fn new(path: Vec<OsmNodeId>, graph: &OsmGraph) -> Result<SimplifiedPath, OsmError> {
        if path.len() < 2 {
            return Err(OsmError::GraphSimplificationError(format!(
                "SimplifiedPath::new called with a path of {} node(s)",
                path.len()
            )));
        }
        let segments = path
            .iter()
            .tuple_windows()
            .map(|(u, v)| {
                let parallel = graph.get_segments(u, v);
                if parallel.len() > 1 {
                    log::debug!(
                        "found {} parallel segments between {u} and {v} during simplification",
                        parallel.len()
                    );
                }
                parallel.first().cloned().ok_or_else(|| {
                    OsmError::GraphSimplificationError(format!(
                        "path expects a segment from {u} to {v} but none exists"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let src_node_id = *path.first().ok_or_else(|| {
            OsmError::InternalError(String::from("non-empty path has no source node"))
        })?;
        let dst_node_id = *path.last().ok_or_else(|| {
            OsmError::InternalError(String::from("non-empty path has no destination node"))
        })?;
        let way_id = segments
            .first()
            .ok_or_else(|| {
                OsmError::GraphSimplificationError(String::from(
                    "SimplifiedPath created with zero segments",
                ))
            })?
            .way_id;
        Ok(SimplifiedPath {
            src_node_id,
            dst_node_id,
            way_id,
            path,
            segments,
        })
    }

    /// a single segment covering the whole path, with summed length and the
    /// full node and coordinate sequences. each segment after the first
    /// starts where the previous one ended, so its first entry is skipped.
    pub fn merged_segment(&self) -> OsmSegment {
        let mut nodes: Vec<OsmNodeId> = vec![];
        let mut coords: Vec<Coord<f64>> = vec![];
        for (idx, segment) in self.segments.iter().enumerate() {
            let skip = if idx == 0 { 0 } else { 1 };
            nodes.extend(segment.path.iter().skip(skip).cloned());
            coords.extend(segment.geometry.coords().skip(skip).cloned());
        }
        let length_m = self.segments.iter().map(|s| s.length_m).sum();
        OsmSegment::new(self.way_id, nodes, LineString::new(coords), length_m)
    }

    /// adds this path to the graph as one segment
    pub fn add_path_to_graph(&self, graph: &mut OsmGraph) -> Result<(), OsmError> {
        graph.add_segment(self.merged_segment())
    }

    /// remove all but the src and dst nodes for this path. if the node is not
    /// found, do not fail: a node can be interstitial to both directions of a
    /// bidirectional path and is removed once.
    pub fn remove_interstitial_nodes(&self, graph: &mut OsmGraph) -> Result<(), OsmError> {
        for node_id in self.path.iter().dropping(1).dropping_back(1) {
            graph.disconnect_node(node_id, false)?;
        }
        Ok(())
    }
}
