use crate::{
    algorithm::bfs_undirected,
    model::osm::{
        graph::{OsmGraph, OsmNodeId},
        OsmError,
    },
};
use itertools::Itertools;
use kdam::tqdm;
use std::collections::HashSet;

/// collects the weakly-connected components of the graph, restricted to the
/// provided nodes. each component is returned sorted by node id, and
/// components are ordered by their smallest node id.
pub fn weakly_connected_components(
    graph: &OsmGraph,
    nodes: &[OsmNodeId],
) -> Result<Vec<Vec<OsmNodeId>>, OsmError> {
    let mut assigned: HashSet<OsmNodeId> = HashSet::new();
    let mut components: Vec<Vec<OsmNodeId>> = vec![];
    let iter = tqdm!(
        nodes.iter().sorted(),
        desc = "weakly connected components",
        total = nodes.len()
    );
    for node_id in iter {
        if assigned.contains(node_id) {
            continue;
        }
        let component = bfs_undirected(*node_id, graph, None)?;
        assigned.extend(component.iter().copied());
        components.push(component.into_iter().sorted().collect_vec());
    }
    eprintln!();
    log::debug!("found {} weakly connected components", components.len());
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        osm::graph::osm_graph::tests::{node, nodes, way},
        TravelMode,
    };

    #[test]
    fn test_two_components() {
        let ns = nodes(vec![
            node(1, 0.0, 0.0),
            node(2, 1.0, 0.0),
            node(3, 2.0, 0.0),
            node(4, 5.0, 5.0),
            node(5, 6.0, 5.0),
        ]);
        let ways = vec![
            way(10, &[1, 2, 3], &[("highway", "residential")]),
            way(11, &[4, 5], &[("highway", "residential")]),
        ];
        let graph = OsmGraph::new(&ns, &ways, &TravelMode::Walk).unwrap();
        let components = weakly_connected_components(&graph, &graph.node_ids()).unwrap();
        assert_eq!(
            components,
            vec![
                vec![OsmNodeId(1), OsmNodeId(2), OsmNodeId(3)],
                vec![OsmNodeId(4), OsmNodeId(5)]
            ]
        );
    }
}
