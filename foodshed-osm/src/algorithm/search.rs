use crate::model::osm::{
    graph::{OsmGraph, OsmNodeId},
    OsmError,
};
use itertools::Itertools;
use std::collections::{HashSet, VecDeque};

/// finds the set of nodes reachable from `src` when segment direction is
/// ignored, using a breadth-first search.
///
/// # Arguments
///
/// * `src` - origin of the search
/// * `graph` - graph to search
/// * `valid_set` - set of valid nodes to visit, or None if all are acceptable.
///
/// # Returns
///
/// The set of node ids weakly connected to `src` within the valid_set.
pub fn bfs_undirected(
    src: OsmNodeId,
    graph: &OsmGraph,
    valid_set: Option<&HashSet<OsmNodeId>>,
) -> Result<HashSet<OsmNodeId>, OsmError> {
    if !graph.contains_node(&src) {
        return Err(OsmError::GraphMissingNodeId(src));
    }
    let mut visited: HashSet<OsmNodeId> = HashSet::from([src]);
    let mut frontier: VecDeque<OsmNodeId> = VecDeque::from([src]);

    while let Some(next_id) = frontier.pop_front() {
        // sorted for deterministic frontier insertion order
        let valid_neighbors = graph
            .get_undirected_neighbors(&next_id)
            .into_iter()
            .filter(|n| match &valid_set {
                Some(valid) => valid.contains(n),
                None => true,
            })
            .sorted();
        for neighbor in valid_neighbors {
            if visited.insert(neighbor) {
                frontier.push_back(neighbor);
            }
        }
    }

    Ok(visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        osm::graph::osm_graph::tests::{node, nodes, way},
        TravelMode,
    };

    #[test]
    fn test_bfs_ignores_direction() {
        let ns = nodes(vec![
            node(1, 0.0, 0.0),
            node(2, 1.0, 0.0),
            node(3, 2.0, 0.0),
            node(4, 5.0, 5.0),
            node(5, 6.0, 5.0),
        ]);
        let ways = vec![
            way(10, &[1, 2, 3], &[("highway", "primary"), ("oneway", "yes")]),
            way(11, &[4, 5], &[("highway", "primary")]),
        ];
        let graph = OsmGraph::new(&ns, &ways, &TravelMode::Drive).unwrap();
        let reached = bfs_undirected(OsmNodeId(3), &graph, None).unwrap();
        assert_eq!(reached.len(), 3);
        assert!(!reached.contains(&OsmNodeId(4)));

        let valid = HashSet::from([OsmNodeId(2), OsmNodeId(3)]);
        let limited = bfs_undirected(OsmNodeId(3), &graph, Some(&valid)).unwrap();
        assert_eq!(limited, valid);
    }
}
