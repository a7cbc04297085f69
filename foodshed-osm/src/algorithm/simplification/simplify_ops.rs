use super::SimplifiedPath;
use crate::model::osm::{
    graph::{AdjacencyDirection, OsmGraph, OsmNodeId, OsmWayId},
    OsmError,
};
use itertools::Itertools;
use kdam::tqdm;
use rayon::prelude::*;
use std::collections::HashSet;

/// removes interstitial nodes, merging each chain of segments between two
/// endpoints into a single segment whose length is the sum of its parts and
/// whose node path and coordinates keep the full geometry. returns the number
/// of nodes removed.
pub fn simplify_graph(graph: &mut OsmGraph) -> Result<usize, OsmError> {
    let n_nodes_before = graph.n_connected_nodes();
    let n_segments_before = graph.n_segments();

    let node_ids = graph.node_ids();
    let endpoints: HashSet<OsmNodeId> = node_ids
        .par_iter()
        .filter(|n| is_endpoint(graph, n))
        .cloned()
        .collect();
    log::info!(
        "identified {} edge endpoints out of {} nodes",
        endpoints.len(),
        n_nodes_before
    );

    let sorted_endpoints = endpoints.iter().sorted().collect_vec();
    let iter = tqdm!(
        sorted_endpoints.iter(),
        desc = "build simplified paths",
        total = sorted_endpoints.len()
    );
    let mut paths: Vec<SimplifiedPath> = vec![];
    for endpoint in iter {
        for successor in graph.get_out_neighbors(endpoint) {
            if endpoints.contains(&successor) {
                continue;
            }
            let path = build_path(graph, **endpoint, successor, &endpoints)?;
            if path.len() < 3 {
                log::debug!("skipping degenerate path from {endpoint} through {successor}");
                continue;
            }
            paths.push(SimplifiedPath::new(path, graph)?);
        }
    }
    eprintln!();

    for path in paths.iter() {
        path.add_path_to_graph(graph)?;
    }
    for path in paths.iter() {
        path.remove_interstitial_nodes(graph)?;
    }

    let n_removed = n_nodes_before - graph.n_connected_nodes();
    log::info!(
        "simplified graph: {} to {} nodes, {} to {} segments",
        n_nodes_before,
        graph.n_connected_nodes(),
        n_segments_before,
        graph.n_segments()
    );
    Ok(n_removed)
}

/// tests whether a node is an endpoint using the strict rule. a node is an
/// endpoint if it is a self-loop, a dead end or a source, does not have
/// exactly two neighbors with 2 or 4 incident segments, or joins segments from
/// more than one way.
pub fn is_endpoint(graph: &OsmGraph, node_id: &OsmNodeId) -> bool {
    let out_neighbors = graph.get_out_neighbors(node_id);
    let in_neighbors = graph.get_in_neighbors(node_id);
    if out_neighbors.contains(node_id) {
        return true;
    }
    let out_degree = graph.node_degree_for_direction(node_id, AdjacencyDirection::Forward);
    let in_degree = graph.node_degree_for_direction(node_id, AdjacencyDirection::Reverse);
    if out_degree == 0 || in_degree == 0 {
        return true;
    }
    let n_neighbors = out_neighbors
        .iter()
        .chain(in_neighbors.iter())
        .collect::<HashSet<_>>()
        .len();
    let degree = out_degree + in_degree;
    if !(n_neighbors == 2 && (degree == 2 || degree == 4)) {
        return true;
    }
    let out_ways = out_neighbors
        .iter()
        .flat_map(|dst| graph.get_segments(node_id, dst).iter().map(|s| s.way_id));
    let in_ways = in_neighbors
        .iter()
        .flat_map(|src| graph.get_segments(src, node_id).iter().map(|s| s.way_id));
    let way_ids: HashSet<OsmWayId> = out_ways.chain(in_ways).collect();
    way_ids.len() > 1
}

/// walks forward from an endpoint through its non-endpoint successor until
/// another endpoint is reached.
fn build_path(
    graph: &OsmGraph,
    endpoint: OsmNodeId,
    endpoint_successor: OsmNodeId,
    endpoints: &HashSet<OsmNodeId>,
) -> Result<Vec<OsmNodeId>, OsmError> {
    let mut path = vec![endpoint, endpoint_successor];
    for this_successor in graph.get_out_neighbors(&endpoint_successor) {
        if path.contains(&this_successor) {
            continue;
        }
        let mut successor = this_successor;
        path.push(successor);
        while !endpoints.contains(&successor) {
            let successors = graph
                .get_out_neighbors(&successor)
                .into_iter()
                .filter(|n| !path.contains(n))
                .collect_vec();
            match successors[..] {
                [next] => {
                    successor = next;
                    path.push(successor);
                }
                [] => {
                    if graph.get_out_neighbors(&successor).contains(&endpoint) {
                        // end of a self-looping chain, close it
                        path.push(endpoint);
                        return Ok(path);
                    }
                    log::warn!("unexpected simplify pattern handled near {successor}");
                    return Ok(path);
                }
                _ => {
                    return Err(OsmError::GraphSimplificationError(format!(
                        "impossible simplify pattern failed near {successor}"
                    )))
                }
            }
        }
        return Ok(path);
    }
    Ok(path)
}
