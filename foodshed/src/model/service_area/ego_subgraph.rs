use crate::model::CoverageError;
use foodshed_osm::model::osm::graph::{EdgeIndex, NodeIndex, TravelGraph};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

/// the nodes reachable from an origin within a path-length radius, and the
/// edges of the graph induced by those nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EgoSubgraph {
    pub nodes: Vec<NodeIndex>,
    pub edges: Vec<EdgeIndex>,
}

impl EgoSubgraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// expands shortest paths out of `origin` along edge lengths, keeping every
/// node whose distance is at most `radius_m`. the search is pruned at the
/// radius so it never visits the rest of the graph.
pub fn ego_subgraph(
    graph: &TravelGraph,
    origin: NodeIndex,
    radius_m: f64,
) -> Result<EgoSubgraph, CoverageError> {
    if origin >= graph.n_nodes() {
        return Err(CoverageError::InternalError(format!(
            "origin node {origin} not in graph with {} nodes",
            graph.n_nodes()
        )));
    }
    if !radius_m.is_finite() || radius_m < 0.0 {
        return Err(CoverageError::InternalError(format!(
            "invalid search radius {radius_m}"
        )));
    }

    let mut distances: HashMap<NodeIndex, f64> = HashMap::from([(origin, 0.0)]);
    let mut frontier: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeIndex)>> = BinaryHeap::new();
    frontier.push(Reverse((OrderedFloat(0.0), origin)));

    while let Some(Reverse((OrderedFloat(dist), node))) = frontier.pop() {
        if distances.get(&node).is_some_and(|best| dist > *best) {
            continue;
        }
        for edge_idx in graph.out_edges(node) {
            let edge = graph.edge(*edge_idx).ok_or_else(|| {
                CoverageError::InternalError(format!("edge {edge_idx} missing from graph"))
            })?;
            let next = dist + edge.length_m;
            if next > radius_m {
                continue;
            }
            let improved = distances.get(&edge.dst).map_or(true, |best| next < *best);
            if improved {
                distances.insert(edge.dst, next);
                frontier.push(Reverse((OrderedFloat(next), edge.dst)));
            }
        }
    }

    let nodes = distances.keys().cloned().sorted().collect_vec();
    let edges = nodes
        .iter()
        .flat_map(|n| graph.out_edges(*n).iter())
        .filter(|e| {
            graph
                .edge(**e)
                .is_some_and(|edge| distances.contains_key(&edge.dst))
        })
        .cloned()
        .sorted()
        .collect_vec();
    Ok(EgoSubgraph { nodes, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::service_area::tests::line_graph;

    #[test]
    fn test_radius_bounds_nodes() {
        let graph = line_graph(&[0.0, 100.0, 200.0, 300.0], 0.0);
        let sub = ego_subgraph(&graph, 0, 250.0).unwrap();
        assert_eq!(sub.nodes, vec![0, 1, 2]);
        // both directions between 0-1 and 1-2
        assert_eq!(sub.edges.len(), 4);
    }

    #[test]
    fn test_zero_radius_is_origin_only() {
        let graph = line_graph(&[0.0, 100.0], 0.0);
        let sub = ego_subgraph(&graph, 1, 0.0).unwrap();
        assert_eq!(sub.nodes, vec![1]);
        assert!(sub.edges.is_empty());
    }

    #[test]
    fn test_distance_is_inclusive() {
        let graph = line_graph(&[0.0, 100.0], 0.0);
        let sub = ego_subgraph(&graph, 0, 100.0).unwrap();
        assert_eq!(sub.nodes, vec![0, 1]);
    }

    #[test]
    fn test_invalid_origin() {
        let graph = line_graph(&[0.0, 100.0], 0.0);
        assert!(ego_subgraph(&graph, 5, 10.0).is_err());
        assert!(ego_subgraph(&graph, 0, f64::NAN).is_err());
    }
}
