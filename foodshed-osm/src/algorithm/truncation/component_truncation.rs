use super::component_filter::ComponentFilter;
use crate::{
    algorithm::connected_components,
    model::osm::{graph::OsmGraph, OsmError},
};
use kdam::tqdm;
use std::collections::HashSet;

/// mutates the graph in place so that it only holds the weakly-connected
/// components selected by the filter. returns the number of nodes removed.
pub fn filter_components(graph: &mut OsmGraph, filter: &ComponentFilter) -> Result<usize, OsmError> {
    if matches!(filter, ComponentFilter::KeepAll) {
        return Ok(0);
    }
    // sorted for deterministic iteration
    let all_nodes = graph.node_ids();
    let components = connected_components::weakly_connected_components(graph, &all_nodes)?;
    let n_components = components.len();
    let filtered_components = filter.assign_components(components);
    log::info!(
        "retaining {} of {} graph components after filtering",
        filtered_components.len(),
        n_components
    );

    let keep_list = filtered_components
        .into_iter()
        .flatten()
        .collect::<HashSet<_>>();
    let iter = tqdm!(
        all_nodes.iter(),
        desc = format!("apply {filter} component filter"),
        total = all_nodes.len()
    );
    let mut n_removed = 0;
    for node_id in iter {
        if !keep_list.contains(node_id) {
            graph.disconnect_node(node_id, false)?;
            n_removed += 1;
        }
    }
    eprintln!();
    log::info!(
        "after filtering components, graph has {} nodes and {} segments",
        graph.n_connected_nodes(),
        graph.n_segments()
    );

    Ok(n_removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        osm::graph::{
            osm_graph::tests::{node, nodes, way},
            OsmNodeId,
        },
        TravelMode,
    };

    #[test]
    fn test_keeps_largest_component() {
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
        let mut graph = OsmGraph::new(&ns, &ways, &TravelMode::Walk).unwrap();
        let removed = filter_components(&mut graph, &ComponentFilter::Largest).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(
            graph.node_ids(),
            vec![OsmNodeId(1), OsmNodeId(2), OsmNodeId(3)]
        );
        assert_eq!(graph.n_segments(), 4);
    }
}
